//! # RSA
//!
//! Key generation, PEM persistence, envelopes (OAEP / PKCS#1 v1.5) and
//! signatures (PSS / PKCS#1 v1.5).
//!
//! ## Operations
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          RSA OPERATIONS                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  keys                                                           │   │
//! │  │  RsaKeyPair::generate(bits, rng)   bits >= policy floor (1024)  │   │
//! │  │  PEM: PKCS#8 "PRIVATE KEY" / PKIX "PUBLIC KEY"                  │   │
//! │  │       (PKCS#1 "RSA PRIVATE KEY" / "RSA PUBLIC KEY" on decode)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌───────────────────────────────┐  ┌───────────────────────────────┐  │
//! │  │  encryption                   │  │  signing                      │  │
//! │  │  • OAEP (SHA-256)             │  │  • PSS (randomized salt)      │  │
//! │  │  • PKCS#1 v1.5                │  │  • PKCS#1 v1.5 (deterministic)│  │
//! │  │  • blinded decryption         │  │  • verify → Result<()>        │  │
//! │  └───────────────────────────────┘  └───────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Limits
//!
//! | Padding | Max plaintext (k = modulus bytes) | 2048-bit key |
//! |---------|-----------------------------------|--------------|
//! | OAEP (SHA-256) | k − 2·32 − 2 | 190 bytes |
//! | PKCS#1 v1.5 | k − 11 | 245 bytes |

use std::fmt;
use std::str::FromStr;

use sha2::digest::const_oid::AssociatedOid;
use sha2::digest::{Digest, DynDigest};

use crate::error::{Error, Result};

mod encryption;
mod keys;
mod signing;

pub use encryption::{
    decrypt_oaep, decrypt_pkcs1v15, encrypt_oaep, encrypt_pkcs1v15, max_message_length,
};
pub use keys::RsaKeyPair;
pub use signing::{sign_pkcs1v15, sign_pss, verify_pkcs1v15, verify_pss};

pub use ::rsa::{RsaPrivateKey, RsaPublicKey};

/// Length of the SHA-256 digest used as the OAEP label hash
const OAEP_HASH_LEN: usize = 32;

/// Hash functions usable for RSA signatures
///
/// Implemented for every RustCrypto digest that carries an ASN.1 OID,
/// e.g. `Sha256`, `Sha384` and `Sha512`.
pub trait SignatureDigest: Digest + DynDigest + AssociatedOid + Send + Sync + 'static {}

impl<D> SignatureDigest for D where D: Digest + DynDigest + AssociatedOid + Send + Sync + 'static {}

/// RSA encryption padding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// OAEP with SHA-256 and an empty label
    Oaep,
    /// PKCS#1 v1.5 type 2
    Pkcs1v15,
}

impl Padding {
    /// Largest plaintext this padding admits for a `key_bytes`-byte modulus
    pub fn max_message_length(&self, key_bytes: usize) -> usize {
        match self {
            Padding::Oaep => key_bytes.saturating_sub(2 * OAEP_HASH_LEN + 2),
            Padding::Pkcs1v15 => key_bytes.saturating_sub(11),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::Oaep => f.write_str("OAEP"),
            Padding::Pkcs1v15 => f.write_str("PKCS1v15"),
        }
    }
}

impl FromStr for Padding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "oaep" => Ok(Padding::Oaep),
            "pkcs1v15" | "pkcs1-v1_5" | "pkcs1" => Ok(Padding::Pkcs1v15),
            _ => Err(Error::InvalidParameter(format!("unsupported padding: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_parsing() {
        assert_eq!("OAEP".parse::<Padding>().unwrap(), Padding::Oaep);
        assert_eq!("oaep".parse::<Padding>().unwrap(), Padding::Oaep);
        assert_eq!("PKCS1v15".parse::<Padding>().unwrap(), Padding::Pkcs1v15);
        assert_eq!("pkcs1V15".parse::<Padding>().unwrap(), Padding::Pkcs1v15);
        assert!(matches!(
            "PSS".parse::<Padding>(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_max_message_length() {
        assert_eq!(Padding::Oaep.max_message_length(256), 190);
        assert_eq!(Padding::Pkcs1v15.max_message_length(256), 245);
        assert_eq!(Padding::Oaep.max_message_length(128), 62);
        assert_eq!(Padding::Pkcs1v15.max_message_length(128), 117);
        assert_eq!(Padding::Oaep.max_message_length(10), 0);
    }

    #[test]
    fn test_padding_display_round_trip() {
        for padding in [Padding::Oaep, Padding::Pkcs1v15] {
            assert_eq!(padding.to_string().parse::<Padding>().unwrap(), padding);
        }
    }
}
