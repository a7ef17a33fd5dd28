//! # ECDH Key Exchange
//!
//! Elliptic-curve Diffie-Hellman over P-256, P-384 and P-521.
//!
//! ## Exchange
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ECDH KEY EXCHANGE                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Alice                                        Bob                      │
//! │  ─────                                        ───                      │
//! │  a, A = a·G                                   b, B = b·G               │
//! │        │                                            │                  │
//! │        │  ──────────── A ─────────────────────────► │                  │
//! │        │  ◄─────────── B ────────────────────────── │                  │
//! │        ▼                                            ▼                  │
//! │  ┌──────────────────────┐              ┌──────────────────────┐        │
//! │  │ same curve?          │              │ same curve?          │        │
//! │  │ B on the curve?      │              │ A on the curve?      │        │
//! │  │ S = a·B              │              │ S = b·A              │        │
//! │  └──────────┬───────────┘              └──────────┬───────────┘        │
//! │             ▼                                     ▼                    │
//! │      x(S), field-size bytes   ═══════════   x(S), field-size bytes     │
//! │             │                                                           │
//! │             ▼                                                           │
//! │      optional KDF (hash-counter or HKDF) → key of requested length     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The raw x-coordinate is not uniformly random. Feed it through one of the
//! KDF variants before using it as a symmetric key.

use sha2::digest::core_api::BlockSizeUser;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::keys::with_secret;
use super::signing::require_private;
use super::{Curve, EcPrivateKey, EcPublicKey};
use crate::error::{Error, Result};
use crate::kdf;
use crate::random::RandomSource;

// ============================================================================
// KEY PAIR
// ============================================================================

/// An ECDH key pair
#[derive(Debug, Clone)]
pub struct EcdhKeyPair {
    private: Option<EcPrivateKey>,
    public: EcPublicKey,
}

impl EcdhKeyPair {
    /// Generate a new key pair on `curve`
    pub fn generate(curve: Curve, rng: &mut dyn RandomSource) -> Result<Self> {
        let private = EcPrivateKey::generate(curve, rng)?;
        let public = private.public_key();

        tracing::debug!("Generated ECDH key pair on {}", curve);

        Ok(Self {
            private: Some(private),
            public,
        })
    }

    /// Generate a P-256 key pair
    pub fn generate_p256(rng: &mut dyn RandomSource) -> Result<Self> {
        Self::generate(Curve::P256, rng)
    }

    /// Generate a P-384 key pair
    pub fn generate_p384(rng: &mut dyn RandomSource) -> Result<Self> {
        Self::generate(Curve::P384, rng)
    }

    /// Generate a P-521 key pair
    pub fn generate_p521(rng: &mut dyn RandomSource) -> Result<Self> {
        Self::generate(Curve::P521, rng)
    }

    /// Assemble a pair from existing halves
    ///
    /// Nothing is checked here; see [`validate_key_pair`].
    pub fn from_parts(private: Option<EcPrivateKey>, public: EcPublicKey) -> Self {
        Self { private, public }
    }

    /// A pair holding only a peer's public key
    pub fn from_public(public: EcPublicKey) -> Self {
        Self {
            private: None,
            public,
        }
    }

    /// The curve of the public half
    pub fn curve(&self) -> Curve {
        self.public.curve()
    }

    /// The private half, if present
    pub fn private_key(&self) -> Option<&EcPrivateKey> {
        self.private.as_ref()
    }

    /// The public half
    pub fn public_key(&self) -> &EcPublicKey {
        &self.public
    }

    /// Serialize the private half as SEC1 PEM
    pub fn private_key_to_pem(&self) -> Result<Zeroizing<String>> {
        require_private(&self.private)?.to_pem()
    }

    /// Serialize the public half as PKIX PEM
    pub fn public_key_to_pem(&self) -> Result<String> {
        self.public.to_pem()
    }

    /// Load a full pair from a SEC1 or PKCS#8 private key PEM
    pub fn private_key_from_pem(pem_data: &[u8]) -> Result<Self> {
        let private = EcPrivateKey::from_pem(pem_data)?;
        let public = private.public_key();
        Ok(Self {
            private: Some(private),
            public,
        })
    }

    /// Load a peer's public key from PKIX PEM
    pub fn public_key_from_pem(pem_data: &[u8]) -> Result<Self> {
        Ok(Self::from_public(EcPublicKey::from_pem(pem_data)?))
    }
}

// ============================================================================
// SHARED SECRET
// ============================================================================

/// Compute the raw shared secret between `pair`'s private key and `public`
///
/// The result is the x-coordinate of the shared point, left-padded to the
/// curve's field size.
///
/// ## Errors
///
/// - `InvalidParameter` if `pair` has no private half
/// - `CurveMismatch` if the two keys are on different curves
/// - `PointNotOnCurve` if `public` fails the curve equation
pub fn compute_shared(pair: &EcdhKeyPair, public: &EcPublicKey) -> Result<Zeroizing<Vec<u8>>> {
    let private = require_private(&pair.private)?;

    if private.curve() != public.curve() {
        tracing::warn!(
            "ECDH curve mismatch: private {} vs public {}",
            private.curve(),
            public.curve()
        );
        return Err(Error::CurveMismatch {
            private: private.curve(),
            public: public.curve(),
        });
    }

    with_secret!(private, |secret: C| {
        let point = public.to_point::<C>().map_err(|e| {
            tracing::warn!("ECDH peer key rejected: {}", e);
            e
        })?;
        let shared =
            elliptic_curve::ecdh::diffie_hellman(secret.to_nonzero_scalar(), point.as_affine());
        Ok(Zeroizing::new(shared.raw_secret_bytes().to_vec()))
    })
}

/// Compute the shared secret and stretch it to `output_len` bytes with the
/// hash-counter KDF over `D`
pub fn compute_shared_with_kdf<D: Digest>(
    pair: &EcdhKeyPair,
    public: &EcPublicKey,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if output_len == 0 {
        return Err(Error::InvalidParameter(
            "key length must be greater than 0".into(),
        ));
    }

    let secret = compute_shared(pair, public)?;
    kdf::hash_counter::<D>(&secret, output_len)
}

/// [`compute_shared_with_kdf`] with SHA-256
pub fn compute_shared_sha256(
    pair: &EcdhKeyPair,
    public: &EcPublicKey,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    compute_shared_with_kdf::<Sha256>(pair, public, output_len)
}

/// Derive a symmetric key of `output_len` bytes from our pair and a peer's
/// public key
pub fn key_exchange(
    pair: &EcdhKeyPair,
    peer: &EcPublicKey,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    compute_shared_sha256(pair, peer, output_len)
}

/// Compute the shared secret and expand it with HKDF over `D`
pub fn compute_shared_hkdf<D>(
    pair: &EcdhKeyPair,
    public: &EcPublicKey,
    salt: &[u8],
    info: &[u8],
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    D: Digest + BlockSizeUser + Clone,
{
    if output_len == 0 {
        return Err(Error::InvalidParameter(
            "key length must be greater than 0".into(),
        ));
    }

    let secret = compute_shared(pair, public)?;
    kdf::hkdf::<D>(&secret, salt, info, output_len)
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check that a pair is internally consistent
///
/// Checks run in order and the first failure is returned: private half
/// present, both halves on the same curve, public point on the curve,
/// public point equal to the private scalar times the generator.
pub fn validate_key_pair(pair: &EcdhKeyPair) -> Result<()> {
    let private = require_private(&pair.private)?;
    let public = &pair.public;

    if private.curve() != public.curve() {
        return Err(Error::CurveMismatch {
            private: private.curve(),
            public: public.curve(),
        });
    }

    if !public.is_on_curve() {
        tracing::debug!("ECDH key pair has an off-curve public key");
        return Err(Error::PointNotOnCurve(public.curve()));
    }

    if private.public_key() != *public {
        tracing::debug!("ECDH key pair halves do not match");
        return Err(Error::KeyMismatch);
    }

    Ok(())
}

/// Check that two pairs agree on a shared secret
///
/// Computes `a.private × b.public` and `b.private × a.public` and compares
/// them in constant time. Errors from either computation propagate.
pub fn shared_secret_test(a: &EcdhKeyPair, b: &EcdhKeyPair) -> Result<bool> {
    let ours = compute_shared(a, &b.public)?;
    let theirs = compute_shared(b, &a.public)?;

    if ours.len() != theirs.len() {
        return Ok(false);
    }

    Ok(bool::from(ours.as_slice().ct_eq(theirs.as_slice())))
}

// ============================================================================
// TESTS
// ============================================================================
