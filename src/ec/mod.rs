//! # Elliptic-Curve Cryptography
//!
//! ECDSA signatures and ECDH key agreement over the NIST prime curves.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ELLIPTIC-CURVE LAYER                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  keys: Curve, EcPrivateKey, EcPublicKey, SEC1/PKIX PEM          │   │
//! │  └───────────────┬───────────────────────────────┬─────────────────┘   │
//! │                  │                               │                     │
//! │                  ▼                               ▼                     │
//! │  ┌───────────────────────────────┐  ┌───────────────────────────────┐  │
//! │  │  signing (ECDSA)              │  │  exchange (ECDH)              │  │
//! │  │  • EcdsaKeyPair               │  │  • EcdhKeyPair                │  │
//! │  │  • sign → EcdsaSignature      │  │  • compute_shared[_with_kdf]  │  │
//! │  │  • verify → bool              │  │  • validate_key_pair          │  │
//! │  │                               │  │  • shared_secret_test         │  │
//! │  └───────────────────────────────┘  └───────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Curves
//!
//! | Curve | Field size | Also known as |
//! |-------|------------|---------------|
//! | P-256 | 32 bytes | secp256r1, prime256v1 |
//! | P-384 | 48 bytes | secp384r1 |
//! | P-521 | 66 bytes | secp521r1 |
//!
//! Public keys are kept as raw affine coordinates, so an off-curve point can
//! be represented. Every operation that consumes a public key checks the
//! curve equation first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod exchange;
mod keys;
mod signing;

pub use exchange::{
    compute_shared, compute_shared_hkdf, compute_shared_sha256, compute_shared_with_kdf,
    key_exchange, shared_secret_test, validate_key_pair, EcdhKeyPair,
};
pub use keys::{EcPrivateKey, EcPublicKey};
pub use signing::{
    sign, sign_sha256, sign_sha512, verify, verify_sha256, verify_sha512, EcdsaKeyPair,
    EcdsaSignature,
};

/// A supported NIST prime curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// NIST P-256 (secp256r1)
    #[serde(rename = "P-256")]
    P256,
    /// NIST P-384 (secp384r1)
    #[serde(rename = "P-384")]
    P384,
    /// NIST P-521 (secp521r1)
    #[serde(rename = "P-521")]
    P521,
}

impl Curve {
    /// All supported curves, smallest first
    pub const ALL: [Curve; 3] = [Curve::P256, Curve::P384, Curve::P521];

    /// Canonical name, e.g. `"P-256"`
    pub fn name(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    /// Size of a field element (and of each coordinate) in bytes
    pub fn field_size(&self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = Error;

    /// Accepts `P-256`, `P256`, `secp256r1`, `prime256v1` and friends,
    /// ignoring case
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "secp256r1" | "prime256v1" => Ok(Curve::P256),
            "p-384" | "p384" | "secp384r1" => Ok(Curve::P384),
            "p-521" | "p521" | "secp521r1" => Ok(Curve::P521),
            _ => Err(Error::InvalidParameter(format!("unsupported curve: {}", s))),
        }
    }
}
