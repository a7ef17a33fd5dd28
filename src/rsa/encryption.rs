//! RSA envelopes: OAEP (SHA-256) and PKCS#1 v1.5.
//!
//! Encryption enforces the padding's plaintext limit up front. Decryption is
//! blinded with the caller's random source and reports every failure as the
//! same detail-free `CiphertextInvalid`.

use ::rsa::traits::PublicKeyParts;
use ::rsa::{Oaep, Pkcs1v15Encrypt, RsaPublicKey};
use sha2::Sha256;

use super::{Padding, RsaKeyPair};
use crate::error::{Error, Result};
use crate::random::{with_source, RandomSource};

/// Largest plaintext `public` can encrypt under `scheme`
///
/// `scheme` is `"OAEP"` or `"PKCS1v15"`, matched case-insensitively.
pub fn max_message_length(public: &RsaPublicKey, scheme: &str) -> Result<usize> {
    let padding: Padding = scheme.parse()?;
    Ok(padding.max_message_length(public.size()))
}

/// Encrypt with OAEP (SHA-256, empty label)
pub fn encrypt_oaep(
    rng: &mut dyn RandomSource,
    public: &RsaPublicKey,
    message: &[u8],
) -> Result<Vec<u8>> {
    encrypt(rng, public, Padding::Oaep, message)
}

/// Encrypt with PKCS#1 v1.5 padding
pub fn encrypt_pkcs1v15(
    rng: &mut dyn RandomSource,
    public: &RsaPublicKey,
    message: &[u8],
) -> Result<Vec<u8>> {
    encrypt(rng, public, Padding::Pkcs1v15, message)
}

/// Decrypt an OAEP (SHA-256) ciphertext
pub fn decrypt_oaep(
    rng: &mut dyn RandomSource,
    pair: &RsaKeyPair,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    decrypt(rng, pair, Padding::Oaep, ciphertext)
}

/// Decrypt a PKCS#1 v1.5 ciphertext
pub fn decrypt_pkcs1v15(
    rng: &mut dyn RandomSource,
    pair: &RsaKeyPair,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    decrypt(rng, pair, Padding::Pkcs1v15, ciphertext)
}

fn encrypt(
    rng: &mut dyn RandomSource,
    public: &RsaPublicKey,
    padding: Padding,
    message: &[u8],
) -> Result<Vec<u8>> {
    let max = padding.max_message_length(public.size());
    if message.len() > max {
        return Err(Error::InvalidParameter(format!(
            "message too long for {} padding: {} bytes, maximum is {}",
            padding,
            message.len(),
            max
        )));
    }

    with_source(rng, |rng| {
        let ciphertext = match padding {
            Padding::Oaep => public.encrypt(rng, Oaep::new::<Sha256>(), message),
            Padding::Pkcs1v15 => public.encrypt(rng, Pkcs1v15Encrypt, message),
        };
        ciphertext.map_err(|e| Error::InvalidParameter(format!("{} encryption failed: {}", padding, e)))
    })
}

fn decrypt(
    rng: &mut dyn RandomSource,
    pair: &RsaKeyPair,
    padding: Padding,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let private = pair.require_private()?;

    with_source(rng, |rng| {
        let plaintext = match padding {
            Padding::Oaep => private.decrypt_blinded(rng, Oaep::new::<Sha256>(), ciphertext),
            Padding::Pkcs1v15 => private.decrypt_blinded(rng, Pkcs1v15Encrypt, ciphertext),
        };
        plaintext.map_err(|_| Error::CiphertextInvalid)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FailingRandom, SystemRandom};

    fn test_pair() -> RsaKeyPair {
        RsaKeyPair::generate(1024, &mut SystemRandom).unwrap()
    }

    #[test]
    fn test_oaep_2048_round_trip() {
        let pair = RsaKeyPair::generate(2048, &mut SystemRandom).unwrap();

        let ciphertext = encrypt_oaep(&mut SystemRandom, pair.public_key(), b"test message").unwrap();
        assert_eq!(ciphertext.len(), 256);

        let plaintext = decrypt_oaep(&mut SystemRandom, &pair, &ciphertext).unwrap();
        assert_eq!(plaintext, b"test message");
    }

    #[test]
    fn test_oaep_every_length_round_trips() {
        let pair = test_pair();
        let max = max_message_length(pair.public_key(), "OAEP").unwrap();
        assert_eq!(max, 62);

        for len in 0..=max {
            let message = vec![0x5a; len];
            let ct = encrypt_oaep(&mut SystemRandom, pair.public_key(), &message).unwrap();
            assert_eq!(decrypt_oaep(&mut SystemRandom, &pair, &ct).unwrap(), message);
        }

        let too_long = vec![0u8; max + 1];
        assert!(matches!(
            encrypt_oaep(&mut SystemRandom, pair.public_key(), &too_long),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_pkcs1v15_every_length_round_trips() {
        let pair = test_pair();
        let max = max_message_length(pair.public_key(), "pkcs1v15").unwrap();
        assert_eq!(max, 117);

        for len in 0..=max {
            let message: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let ct = encrypt_pkcs1v15(&mut SystemRandom, pair.public_key(), &message).unwrap();
            assert_eq!(decrypt_pkcs1v15(&mut SystemRandom, &pair, &ct).unwrap(), message);
        }

        let too_long = vec![0u8; max + 1];
        assert!(matches!(
            encrypt_pkcs1v15(&mut SystemRandom, pair.public_key(), &too_long),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let pair = test_pair();
        assert!(matches!(
            max_message_length(pair.public_key(), "PSS"),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_encryption_is_randomized() {
        let pair = test_pair();
        let c1 = encrypt_oaep(&mut SystemRandom, pair.public_key(), b"same").unwrap();
        let c2 = encrypt_oaep(&mut SystemRandom, pair.public_key(), b"same").unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_wrong_key_fails() {
        let alice = test_pair();
        let eve = test_pair();

        let ct = encrypt_oaep(&mut SystemRandom, alice.public_key(), b"secret").unwrap();
        assert_eq!(
            decrypt_oaep(&mut SystemRandom, &eve, &ct),
            Err(Error::CiphertextInvalid)
        );

        let ct = encrypt_pkcs1v15(&mut SystemRandom, alice.public_key(), b"secret").unwrap();
        assert_eq!(
            decrypt_pkcs1v15(&mut SystemRandom, &eve, &ct),
            Err(Error::CiphertextInvalid)
        );
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let pair = test_pair();
        let mut ct = encrypt_oaep(&mut SystemRandom, pair.public_key(), b"secret").unwrap();
        ct[10] ^= 0x01;
        assert_eq!(
            decrypt_oaep(&mut SystemRandom, &pair, &ct),
            Err(Error::CiphertextInvalid)
        );
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        let pair = test_pair();
        for ct in [&[][..], &[0u8; 3][..], &[0xffu8; 129][..]] {
            assert_eq!(
                decrypt_oaep(&mut SystemRandom, &pair, ct),
                Err(Error::CiphertextInvalid)
            );
            assert_eq!(
                decrypt_pkcs1v15(&mut SystemRandom, &pair, ct),
                Err(Error::CiphertextInvalid)
            );
        }
    }

    #[test]
    fn test_schemes_do_not_cross_decrypt() {
        let pair = test_pair();
        let ct = encrypt_pkcs1v15(&mut SystemRandom, pair.public_key(), b"secret").unwrap();
        assert_eq!(
            decrypt_oaep(&mut SystemRandom, &pair, &ct),
            Err(Error::CiphertextInvalid)
        );
    }

    #[test]
    fn test_public_only_pair_cannot_decrypt() {
        let pair = test_pair();
        let ct = encrypt_oaep(&mut SystemRandom, pair.public_key(), b"secret").unwrap();
        let public_only = RsaKeyPair::from_public(pair.public_key().clone());
        assert!(matches!(
            decrypt_oaep(&mut SystemRandom, &public_only, &ct),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_entropy_failure() {
        let pair = test_pair();
        assert!(matches!(
            encrypt_oaep(&mut FailingRandom::new(), pair.public_key(), b"msg"),
            Err(Error::RandomnessFailure(_))
        ));
        assert!(matches!(
            encrypt_pkcs1v15(&mut FailingRandom::after(1), pair.public_key(), b"msg"),
            Err(Error::RandomnessFailure(_))
        ));

        let ct = encrypt_oaep(&mut SystemRandom, pair.public_key(), b"msg").unwrap();
        assert!(matches!(
            decrypt_oaep(&mut FailingRandom::new(), &pair, &ct),
            Err(Error::RandomnessFailure(_))
        ));
    }

    #[test]
    fn test_pkcs1v15_entropy_failure() {
        let pair = test_pair();

        for mut source in [FailingRandom::new(), FailingRandom::after(1)] {
            assert!(matches!(
                encrypt_pkcs1v15(&mut source, pair.public_key(), b"msg"),
                Err(Error::RandomnessFailure(_))
            ));
        }

        let ct = encrypt_pkcs1v15(&mut SystemRandom, pair.public_key(), b"msg").unwrap();
        for mut source in [FailingRandom::new(), FailingRandom::after(1)] {
            assert!(matches!(
                decrypt_pkcs1v15(&mut source, &pair, &ct),
                Err(Error::RandomnessFailure(_))
            ));
        }
    }

    #[test]
    fn test_uncommon_key_size_round_trip() {
        let pair = RsaKeyPair::generate(1536, &mut SystemRandom).unwrap();
        let max = max_message_length(pair.public_key(), "OAEP").unwrap();
        assert_eq!(max, 192 - 66);

        let message = vec![0x42; max];
        let ct = encrypt_oaep(&mut SystemRandom, pair.public_key(), &message).unwrap();
        assert_eq!(ct.len(), 192);
        assert_eq!(decrypt_oaep(&mut SystemRandom, &pair, &ct).unwrap(), message);
    }
}
