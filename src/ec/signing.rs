//! # ECDSA Signatures
//!
//! Sign a message digest with an EC private key; verify with the public key.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ECDSA SIGN / VERIFY                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  message ──► D::digest ──► fit to field size ──► z                     │
//! │                              (left-pad short digests,                  │
//! │                               keep leftmost bytes of long ones)        │
//! │                                                                         │
//! │  SIGN:    (private scalar, z, fresh randomness) ──► (r, s)             │
//! │  VERIFY:  (public point, z, r, s)               ──► true / false       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Verification never errors. An off-curve key, empty or out-of-range
//! scalars and plain mismatches all answer `false`.

use ::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use elliptic_curve::FieldBytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use super::keys::with_curve;
use super::{Curve, EcPrivateKey, EcPublicKey};
use crate::error::{Error, Result};
use crate::random::{with_source, RandomSource};

// ============================================================================
// KEY PAIR
// ============================================================================

/// An ECDSA key pair
///
/// The private half is absent for pairs loaded from a public key.
#[derive(Debug, Clone)]
pub struct EcdsaKeyPair {
    private: Option<EcPrivateKey>,
    public: EcPublicKey,
}

impl EcdsaKeyPair {
    /// Generate a new key pair on `curve`
    pub fn generate(curve: Curve, rng: &mut dyn RandomSource) -> Result<Self> {
        let private = EcPrivateKey::generate(curve, rng)?;
        let public = private.public_key();

        tracing::debug!("Generated ECDSA key pair on {}", curve);

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

    /// Assemble a pair from existing halves without cross-checking them
    pub fn from_parts(private: Option<EcPrivateKey>, public: EcPublicKey) -> Self {
        Self { private, public }
    }

    /// A verification-only pair
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
    pub fn private_key_to_pem(&self) -> Result<zeroize::Zeroizing<String>> {
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

    /// Load a verification-only pair from a PKIX public key PEM
    pub fn public_key_from_pem(pem_data: &[u8]) -> Result<Self> {
        Ok(Self::from_public(EcPublicKey::from_pem(pem_data)?))
    }
}

pub(super) fn require_private(private: &Option<EcPrivateKey>) -> Result<&EcPrivateKey> {
    private
        .as_ref()
        .ok_or_else(|| Error::InvalidParameter("private key is required".into()))
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// An ECDSA signature as fixed-width big-endian scalars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// Curve the signature was produced on
    pub curve: Curve,
    /// The `r` scalar, field-size bytes
    #[serde(with = "hex::serde")]
    pub r: Vec<u8>,
    /// The `s` scalar, field-size bytes
    #[serde(with = "hex::serde")]
    pub s: Vec<u8>,
}

impl EcdsaSignature {
    /// Encode as ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`
    pub fn to_der(&self) -> Result<Vec<u8>> {
        with_curve!(self.curve, C => {
            let signature = signature_from_scalars::<C>(&self.r, &self.s).ok_or_else(|| {
                Error::EncodingFailure("signature scalars out of range".into())
            })?;
            Ok(signature.to_der().as_bytes().to_vec())
        })
    }

    /// Decode an ASN.1 DER signature produced on `curve`
    pub fn from_der(curve: Curve, der: &[u8]) -> Result<Self> {
        with_curve!(curve, C => {
            let signature = ::ecdsa::Signature::<C>::from_der(der)
                .map_err(|e| Error::EncodingFailure(format!("invalid DER signature: {}", e)))?;
            let (r, s) = signature.split_bytes();
            Ok(Self {
                curve,
                r: r.to_vec(),
                s: s.to_vec(),
            })
        })
    }

    /// Hex form of `r || s`, for logs and test vectors
    pub fn to_hex(&self) -> String {
        format!("{}{}", hex::encode(&self.r), hex::encode(&self.s))
    }
}

// ============================================================================
// SIGN / VERIFY
// ============================================================================

/// Sign `message` hashed with `D`
///
/// Draws fresh randomness for the nonce on every call, so signing the same
/// message twice yields different signatures. Fails with `InvalidParameter`
/// when the pair has no private half.
pub fn sign<D: Digest>(
    rng: &mut dyn RandomSource,
    pair: &EcdsaKeyPair,
    message: &[u8],
) -> Result<EcdsaSignature> {
    let private = require_private(&pair.private)?;
    let curve = private.curve();
    let z = fit_digest(&D::digest(message), curve.field_size());

    let (r, s) = with_source(rng, |rng| match private {
        EcPrivateKey::P256(secret) => {
            let signature: p256::ecdsa::Signature = p256::ecdsa::SigningKey::from(secret)
                .sign_prehash_with_rng(rng, &z)
                .map_err(signing_failed)?;
            let (r, s) = signature.split_bytes();
            Ok((r.to_vec(), s.to_vec()))
        }
        EcPrivateKey::P384(secret) => {
            let signature: p384::ecdsa::Signature = p384::ecdsa::SigningKey::from(secret)
                .sign_prehash_with_rng(rng, &z)
                .map_err(signing_failed)?;
            let (r, s) = signature.split_bytes();
            Ok((r.to_vec(), s.to_vec()))
        }
        EcPrivateKey::P521(secret) => {
            // The generic key has no randomized prehash signer on P-521;
            // the curve crate's wrapper supplies it.
            let generic = ::ecdsa::SigningKey::<p521::NistP521>::from(secret);
            let signature: p521::ecdsa::Signature = p521::ecdsa::SigningKey::from(generic)
                .sign_prehash_with_rng(rng, &z)
                .map_err(signing_failed)?;
            let (r, s) = signature.split_bytes();
            Ok((r.to_vec(), s.to_vec()))
        }
    })?;

    Ok(EcdsaSignature { curve, r, s })
}

fn signing_failed(err: ::ecdsa::Error) -> Error {
    Error::InvalidParameter(format!("ECDSA signing failed: {}", err))
}

/// Sign with SHA-256
pub fn sign_sha256(
    rng: &mut dyn RandomSource,
    pair: &EcdsaKeyPair,
    message: &[u8],
) -> Result<EcdsaSignature> {
    sign::<Sha256>(rng, pair, message)
}

/// Sign with SHA-512
pub fn sign_sha512(
    rng: &mut dyn RandomSource,
    pair: &EcdsaKeyPair,
    message: &[u8],
) -> Result<EcdsaSignature> {
    sign::<Sha512>(rng, pair, message)
}

/// Verify `(r, s)` over `message` hashed with `D`
///
/// Returns `false` for any failure, including an off-curve public key and
/// empty or out-of-range scalars.
pub fn verify<D: Digest>(public: &EcPublicKey, message: &[u8], r: &[u8], s: &[u8]) -> bool {
    let curve = public.curve();
    let z = fit_digest(&D::digest(message), curve.field_size());

    with_curve!(curve, C => {
        let Ok(point) = public.to_point::<C>() else {
            tracing::debug!("ECDSA verify rejected off-curve {} key", curve);
            return false;
        };
        let Some(signature) = signature_from_scalars::<C>(r, s) else {
            return false;
        };
        ::ecdsa::VerifyingKey::<C>::from(&point)
            .verify_prehash(&z, &signature)
            .is_ok()
    })
}

/// Verify with SHA-256
pub fn verify_sha256(public: &EcPublicKey, message: &[u8], r: &[u8], s: &[u8]) -> bool {
    verify::<Sha256>(public, message, r, s)
}

/// Verify with SHA-512
pub fn verify_sha512(public: &EcPublicKey, message: &[u8], r: &[u8], s: &[u8]) -> bool {
    verify::<Sha512>(public, message, r, s)
}

/// Fit a digest to exactly `size` bytes: left-pad short ones, keep the
/// leftmost bytes of long ones
fn fit_digest(digest: &[u8], size: usize) -> Vec<u8> {
    if digest.len() >= size {
        return digest[..size].to_vec();
    }
    let mut out = vec![0u8; size];
    out[size - digest.len()..].copy_from_slice(digest);
    out
}

/// Build a signature from big-endian scalars of any width up to the field size
fn signature_from_scalars<C>(r: &[u8], s: &[u8]) -> Option<::ecdsa::Signature<C>>
where
    C: ::ecdsa::PrimeCurve,
    ::ecdsa::SignatureSize<C>: elliptic_curve::generic_array::ArrayLength<u8>,
{
    let r = scalar_bytes::<C>(r)?;
    let s = scalar_bytes::<C>(s)?;
    ::ecdsa::Signature::<C>::from_scalars(r, s).ok()
}

fn scalar_bytes<C: elliptic_curve::Curve>(value: &[u8]) -> Option<FieldBytes<C>> {
    let start = value.iter().position(|&b| b != 0)?;
    let value = &value[start..];

    let mut out = FieldBytes::<C>::default();
    if value.len() > out.len() {
        return None;
    }
    let offset = out.len() - value.len();
    out[offset..].copy_from_slice(value);
    Some(out)
}

// ============================================================================
// TESTS
// ============================================================================
