//! RSA key pairs and their PEM forms.

use ::rsa::pkcs1::{self, DecodeRsaPrivateKey};
use ::rsa::pkcs8::spki::SubjectPublicKeyInfoRef;
use ::rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey};
use ::rsa::traits::PublicKeyParts;
use ::rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::config::KeyPolicy;
use crate::error::{Error, Result};
use crate::pem::{self, label, LINE_ENDING};
use crate::random::{with_source, RandomSource};

/// An RSA key pair
///
/// ## Invariants
///
/// When the private half is present the public half is derived from it.
/// Pairs loaded from a public key PEM carry no private half; decryption and
/// signing on them fail with `InvalidParameter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    private: Option<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl RsaKeyPair {
    /// Generate a new key pair with a `bits`-bit modulus
    ///
    /// Sizes below 1024 bits are rejected with `WeakParameter` before any
    /// randomness is consumed.
    pub fn generate(bits: usize, rng: &mut dyn RandomSource) -> Result<Self> {
        Self::generate_with_policy(bits, rng, &KeyPolicy::default())
    }

    /// Generate a new key pair, checking `bits` against `policy`
    pub fn generate_with_policy(
        bits: usize,
        rng: &mut dyn RandomSource,
        policy: &KeyPolicy,
    ) -> Result<Self> {
        policy.validate_rsa_bits(bits).map_err(|e| {
            tracing::warn!("Refused to generate {}-bit RSA key", bits);
            e
        })?;

        let private = with_source(rng, |rng| Ok(RsaPrivateKey::new(rng, bits)?))?;
        let public = private.to_public_key();

        tracing::debug!("Generated {}-bit RSA key pair", bits);

        Ok(Self {
            private: Some(private),
            public,
        })
    }

    /// Wrap an existing private key
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        Self {
            private: Some(private),
            public,
        }
    }

    /// A public-only pair, for encryption and verification
    pub fn from_public(public: RsaPublicKey) -> Self {
        Self {
            private: None,
            public,
        }
    }

    /// The private half, if present
    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        self.private.as_ref()
    }

    /// The public half
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Modulus size in bits
    pub fn key_size_bits(&self) -> usize {
        self.public.n().bits()
    }

    pub(super) fn require_private(&self) -> Result<&RsaPrivateKey> {
        self.private
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("private key is required".into()))
    }

    /// Serialize the private half as PKCS#8 `PRIVATE KEY` PEM
    pub fn private_key_to_pem(&self) -> Result<Zeroizing<String>> {
        Ok(self.require_private()?.to_pkcs8_pem(LINE_ENDING)?)
    }

    /// Serialize the public half as PKIX `PUBLIC KEY` PEM
    pub fn public_key_to_pem(&self) -> Result<String> {
        Ok(self.public.to_public_key_pem(LINE_ENDING)?)
    }

    /// Load a full pair from a PKCS#8 `PRIVATE KEY` or PKCS#1
    /// `RSA PRIVATE KEY` PEM block
    pub fn private_key_from_pem(pem_data: &[u8]) -> Result<Self> {
        let found = pem::expect_label(pem_data, &[label::PRIVATE_KEY, label::RSA_PRIVATE_KEY])?;
        let text = pem::as_text(pem_data)?;

        let private = match found {
            label::RSA_PRIVATE_KEY => RsaPrivateKey::from_pkcs1_pem(text)?,
            _ => RsaPrivateKey::from_pkcs8_pem(text)?,
        };

        Ok(Self::from_private(private))
    }

    /// Load a public-only pair from a PKIX `PUBLIC KEY` or PKCS#1
    /// `RSA PUBLIC KEY` PEM block
    ///
    /// Moduli up to the default policy's `max_rsa_bits` are accepted, so
    /// every key this crate generates can be loaded back.
    pub fn public_key_from_pem(pem_data: &[u8]) -> Result<Self> {
        let block = pem::decode_expecting(pem_data, &[label::PUBLIC_KEY, label::RSA_PUBLIC_KEY])?;
        let max_bits = KeyPolicy::default().max_rsa_bits;

        let public = if block.label == label::RSA_PUBLIC_KEY {
            public_key_from_pkcs1(&block.der, max_bits)?
        } else {
            public_key_from_spki(&block.der, max_bits)?
        };

        Ok(Self::from_public(public))
    }
}

/// Unwrap a PKIX `SubjectPublicKeyInfo` holding an `rsaEncryption` key
fn public_key_from_spki(der: &[u8], max_bits: usize) -> Result<RsaPublicKey> {
    let spki = SubjectPublicKeyInfoRef::try_from(der)
        .map_err(|e| Error::EncodingFailure(format!("Invalid SubjectPublicKeyInfo: {}", e)))?;
    spki.algorithm.assert_algorithm_oid(pkcs1::ALGORITHM_OID)?;

    let key = spki
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| Error::EncodingFailure("RSA public key bit string is not octet-aligned".into()))?;

    public_key_from_pkcs1(key, max_bits)
}

/// Build a key from PKCS#1 `RSAPublicKey` DER, allowing moduli up to `max_bits`
fn public_key_from_pkcs1(der: &[u8], max_bits: usize) -> Result<RsaPublicKey> {
    let key = pkcs1::RsaPublicKey::try_from(der)
        .map_err(|e| Error::EncodingFailure(format!("Invalid PKCS#1 document: {}", e)))?;
    let n = BigUint::from_bytes_be(key.modulus.as_bytes());
    let e = BigUint::from_bytes_be(key.public_exponent.as_bytes());

    RsaPublicKey::new_with_max_size(n, e, max_bits)
        .map_err(|e| Error::EncodingFailure(format!("invalid RSA public key: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================
