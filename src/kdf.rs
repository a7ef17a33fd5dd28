//! # Key Derivation Functions
//!
//! Turn a raw ECDH shared secret into key material of a chosen length.
//!
//! ## Derivation Modes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 SHARED SECRET → KEY MATERIAL                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HASH-COUNTER KDF                             │   │
//! │  │                                                                 │   │
//! │  │  len <= |D|:   D(secret)[..len]                                │   │
//! │  │                                                                 │   │
//! │  │  len >  |D|:   D(secret || 00000000)                           │   │
//! │  │             || D(secret || 00000001)                           │   │
//! │  │             || ...                       truncated to len      │   │
//! │  │                                                                 │   │
//! │  │  Counter is a 32-bit big-endian integer starting at zero.     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HKDF (RFC 5869)                              │   │
//! │  │                                                                 │   │
//! │  │  HKDF-D(                                                       │   │
//! │  │    ikm  = secret,                                             │   │
//! │  │    salt = caller salt (binds the key to a context),           │   │
//! │  │    info = caller info (separates purposes)                    │   │
//! │  │  )                                                            │   │
//! │  │                                                                 │   │
//! │  │  → at most 255 × |D| bytes                                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both modes take the secret exactly as `ec::compute_shared` returns it:
//! the fixed-width x-coordinate, leading zero bytes included. New
//! protocols should prefer HKDF.

use hkdf::SimpleHkdf;
use sha2::digest::core_api::BlockSizeUser;
use sha2::Digest;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Derive `output_len` bytes from `secret` with the hash-counter KDF
pub fn hash_counter<D: Digest>(secret: &[u8], output_len: usize) -> Result<Zeroizing<Vec<u8>>> {
    require_length(output_len)?;

    let single = D::digest(secret);
    if single.len() >= output_len {
        return Ok(Zeroizing::new(single[..output_len].to_vec()));
    }

    let mut out = Zeroizing::new(Vec::with_capacity(output_len + single.len()));
    let mut counter: u32 = 0;
    while out.len() < output_len {
        let mut hasher = D::new();
        hasher.update(secret);
        hasher.update(counter.to_be_bytes());
        out.extend_from_slice(&hasher.finalize());
        counter = counter.wrapping_add(1);
    }
    out.truncate(output_len);

    Ok(out)
}

/// Derive `output_len` bytes from `secret` with HKDF over `D`
pub fn hkdf<D>(
    secret: &[u8],
    salt: &[u8],
    info: &[u8],
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    D: Digest + BlockSizeUser + Clone,
{
    require_length(output_len)?;

    let hkdf = SimpleHkdf::<D>::new(Some(salt), secret);

    let mut okm = Zeroizing::new(vec![0u8; output_len]);
    hkdf.expand(info, &mut okm).map_err(|_| {
        Error::InvalidParameter(format!(
            "HKDF output length {} exceeds 255 hash blocks",
            output_len
        ))
    })?;

    Ok(okm)
}

fn require_length(output_len: usize) -> Result<()> {
    if output_len == 0 {
        return Err(Error::InvalidParameter(
            "key length must be greater than 0".into(),
        ));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Sha256, Sha512};

    #[test]
    fn test_short_output_is_truncated_digest() {
        let secret = [42u8; 32];
        let key = hash_counter::<Sha256>(&secret, 16).unwrap();
        assert_eq!(key.as_slice(), &Sha256::digest(secret)[..16]);
    }

    #[test]
    fn test_exact_digest_length() {
        let secret = b"shared";
        let key = hash_counter::<Sha256>(secret, 32).unwrap();
        assert_eq!(key.as_slice(), Sha256::digest(secret).as_slice());
    }

    #[test]
    fn test_counter_mode_extension() {
        let secret = b"shared";
        let key = hash_counter::<Sha256>(secret, 80).unwrap();
        assert_eq!(key.len(), 80);

        let block = |counter: u32| {
            let mut h = Sha256::new();
            h.update(secret);
            h.update(counter.to_be_bytes());
            h.finalize()
        };
        assert_eq!(&key[..32], block(0).as_slice());
        assert_eq!(&key[32..64], block(1).as_slice());
        assert_eq!(&key[64..], &block(2)[..16]);
    }

    #[test]
    fn test_counter_mode_differs_from_plain_digest() {
        // Once extension kicks in, block 0 includes the counter.
        let secret = b"shared";
        let key = hash_counter::<Sha256>(secret, 33).unwrap();
        assert_ne!(&key[..32], Sha256::digest(secret).as_slice());
    }

    #[test]
    fn test_leading_zeros_are_hashed() {
        let mut secret = [0x11u8; 32];
        secret[0] = 0;
        let derived = hash_counter::<Sha256>(&secret, 32).unwrap();
        assert_eq!(derived.as_slice(), Sha256::digest(secret).as_slice());
        assert_ne!(derived.as_slice(), Sha256::digest(&secret[1..]).as_slice());
    }

    #[test]
    fn test_hash_counter_deterministic() {
        let a = hash_counter::<Sha512>(b"secret", 100).unwrap();
        let b = hash_counter::<Sha512>(b"secret", 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            hash_counter::<Sha256>(b"secret", 0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            hkdf::<Sha256>(b"secret", b"salt", b"info", 0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_hkdf_context_separation() {
        let secret = [7u8; 32];
        let k1 = hkdf::<Sha256>(&secret, b"conv-1", b"message-key", 32).unwrap();
        let k2 = hkdf::<Sha256>(&secret, b"conv-2", b"message-key", 32).unwrap();
        let k3 = hkdf::<Sha256>(&secret, b"conv-1", b"storage-key", 32).unwrap();

        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
        assert_eq!(k1, hkdf::<Sha256>(&secret, b"conv-1", b"message-key", 32).unwrap());
    }

    #[test]
    fn test_hkdf_length_limit() {
        assert!(hkdf::<Sha256>(b"secret", b"", b"", 255 * 32).is_ok());
        assert!(matches!(
            hkdf::<Sha256>(b"secret", b"", b"", 255 * 32 + 1),
            Err(Error::InvalidParameter(_))
        ));
    }
}
