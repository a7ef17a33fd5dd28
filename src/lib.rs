//! # asym-core
//!
//! Asymmetric-key primitives: RSA encryption and signatures, ECDSA on the
//! NIST prime curves, and ECDH key agreement, with PEM persistence for every
//! key family.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ASYM-CORE MODULES                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐  ┌────────────────┐  │
//! │  │        RSA          │  │       ECDSA         │  │      ECDH      │  │
//! │  │                     │  │                     │  │                │  │
//! │  │ - Keygen (≥1024)    │  │ - P-256/384/521     │  │ - Shared secret│  │
//! │  │ - OAEP / PKCS1v15   │  │ - sign → (r, s)     │  │ - KDF variants │  │
//! │  │ - PSS / PKCS1v15    │  │ - verify → bool     │  │ - Validation   │  │
//! │  └──────────┬──────────┘  └──────────┬──────────┘  └───────┬────────┘  │
//! │             │                        └──────────┬──────────┘           │
//! │             │                                   │                      │
//! │             │                        ┌──────────▼──────────┐           │
//! │             │                        │    ec (shared)      │           │
//! │             │                        │ Curve, EC key types │           │
//! │             │                        └──────────┬──────────┘           │
//! │             │                                   │                      │
//! │  ┌──────────▼───────────────────────────────────▼──────────────────┐   │
//! │  │  pem  ·  random (RandomSource)  ·  kdf  ·  config  ·  error     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error taxonomy with stable numeric codes
//! - [`random`] - Injectable entropy sources
//! - [`pem`] - PEM armor for DER-encoded keys
//! - [`rsa`] - RSA key pairs, envelopes and signatures
//! - [`ec`] - ECDSA and ECDH over P-256, P-384 and P-521
//! - [`kdf`] - Key derivation from shared secrets
//! - [`config`] - Parameter policy
//!
//! ## Randomness
//!
//! There is no global generator. Every operation that needs entropy takes a
//! `&mut dyn RandomSource`; pass [`SystemRandom`] in production and
//! [`FailingRandom`] to exercise failure paths.
//!
//! ```ignore
//! use asym_core::{ec, SystemRandom};
//! use sha2::Sha256;
//!
//! let pair = ec::EcdsaKeyPair::generate_p256(&mut SystemRandom)?;
//! let sig = ec::sign::<Sha256>(&mut SystemRandom, &pair, b"test")?;
//! assert!(ec::verify::<Sha256>(pair.public_key(), b"test", &sig.r, &sig.s));
//! ```
//!
//! ## Verification Conventions
//!
//! | Family | Verify returns | On mismatch |
//! |--------|----------------|-------------|
//! | RSA (PSS, PKCS1v15) | `Result<()>` | `Err(SignatureInvalid)` |
//! | ECDSA | `bool` | `false` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod ec;
pub mod error;
pub mod kdf;
pub mod pem;
pub mod random;
pub mod rsa;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::KeyPolicy;
pub use ec::{Curve, EcPrivateKey, EcPublicKey, EcdhKeyPair, EcdsaKeyPair, EcdsaSignature};
pub use error::{Error, Result};
pub use random::{FailingRandom, RandomSource, SystemRandom};
pub use crate::rsa::{Padding, RsaKeyPair};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_key_pairs_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RsaKeyPair>();
        assert_send_sync::<EcdsaKeyPair>();
        assert_send_sync::<EcdhKeyPair>();
        assert_send_sync::<EcPublicKey>();
    }
}
