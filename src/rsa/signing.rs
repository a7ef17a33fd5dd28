//! RSA signatures: PSS and PKCS#1 v1.5 over a caller-chosen digest.
//!
//! ```text
//! message ──► D::digest ──┬──► PSS        (random salt)  ──► signature
//!                         └──► PKCS#1 v1.5 (deterministic) ──► signature
//! ```
//!
//! Verification returns `Ok(())` or `SignatureInvalid`. A PSS signature never
//! verifies under PKCS#1 v1.5 and vice versa.

use ::rsa::{Pkcs1v15Sign, Pss, RsaPublicKey};
use sha2::Digest;

use super::{RsaKeyPair, SignatureDigest};
use crate::error::{Error, Result};
use crate::random::{with_source, RandomSource};

/// Sign `message` with RSASSA-PSS over `D`
///
/// The salt is as long as the digest and drawn from `rng`.
pub fn sign_pss<D: SignatureDigest>(
    rng: &mut dyn RandomSource,
    pair: &RsaKeyPair,
    message: &[u8],
) -> Result<Vec<u8>> {
    let private = pair.require_private()?;
    let hashed = <D as Digest>::digest(message);

    with_source(rng, |rng| {
        private
            .sign_with_rng(rng, Pss::new::<D>(), &hashed)
            .map_err(|e| Error::InvalidParameter(format!("PSS signing failed: {}", e)))
    })
}

/// Sign `message` with RSASSA-PKCS1-v1_5 over `D`
///
/// Deterministic: the same key and message always give the same signature.
pub fn sign_pkcs1v15<D: SignatureDigest>(pair: &RsaKeyPair, message: &[u8]) -> Result<Vec<u8>> {
    let private = pair.require_private()?;
    let hashed = <D as Digest>::digest(message);

    private
        .sign(Pkcs1v15Sign::new::<D>(), &hashed)
        .map_err(|e| Error::InvalidParameter(format!("PKCS1v15 signing failed: {}", e)))
}

/// Verify an RSASSA-PSS signature over `D`
pub fn verify_pss<D: SignatureDigest>(
    public: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let hashed = <D as Digest>::digest(message);
    public
        .verify(Pss::new::<D>(), &hashed, signature)
        .map_err(|_| Error::SignatureInvalid)
}

/// Verify an RSASSA-PKCS1-v1_5 signature over `D`
pub fn verify_pkcs1v15<D: SignatureDigest>(
    public: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let hashed = <D as Digest>::digest(message);
    public
        .verify(Pkcs1v15Sign::new::<D>(), &hashed, signature)
        .map_err(|_| Error::SignatureInvalid)
}

// ============================================================================
// TESTS
// ============================================================================
