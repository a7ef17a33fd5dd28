//! # Key Policy
//!
//! Tunables that decide which parameters the suite accepts. The defaults
//! match the historic behavior: RSA keys below 1024 bits are refused,
//! 2048 bits is the recommended size and P-256 the recommended curve. The
//! RSA ceiling bounds both generation and the public keys the PEM codec
//! will load.
//!
//! A policy is plain data. Embedding applications can load it from JSON:
//!
//! ```ignore
//! let policy = KeyPolicy::from_json(r#"{ "min_rsa_bits": 2048 }"#)?;
//! let pair = RsaKeyPair::generate_with_policy(3072, &mut SystemRandom, &policy)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::ec::Curve;
use crate::error::{Error, Result};

/// Smallest RSA modulus accepted by the default policy
pub const MIN_RSA_BITS: usize = 1024;

/// Largest RSA modulus accepted by the default policy
pub const MAX_RSA_BITS: usize = 16384;

/// Recommended RSA modulus size
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Parameter policy for key generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyPolicy {
    /// RSA sizes below this are rejected with `WeakParameter`
    pub min_rsa_bits: usize,
    /// RSA sizes above this are rejected with `InvalidParameter`
    pub max_rsa_bits: usize,
    /// Size used when callers have no preference
    pub default_rsa_bits: usize,
    /// Curve used when callers have no preference
    pub default_curve: Curve,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self {
            min_rsa_bits: MIN_RSA_BITS,
            max_rsa_bits: MAX_RSA_BITS,
            default_rsa_bits: DEFAULT_RSA_BITS,
            default_curve: Curve::P256,
        }
    }
}

impl KeyPolicy {
    /// Parse a policy from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate_rsa_bits(policy.default_rsa_bits)?;
        Ok(policy)
    }

    /// Check an RSA modulus size against the floor and the ceiling
    pub fn validate_rsa_bits(&self, bits: usize) -> Result<()> {
        if bits < self.min_rsa_bits {
            return Err(Error::WeakParameter(format!(
                "RSA key size must be at least {} bits, got {}",
                self.min_rsa_bits, bits
            )));
        }
        if bits > self.max_rsa_bits {
            return Err(Error::InvalidParameter(format!(
                "RSA key size must be at most {} bits, got {}",
                self.max_rsa_bits, bits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = KeyPolicy::default();
        assert_eq!(policy.min_rsa_bits, 1024);
        assert_eq!(policy.max_rsa_bits, 16384);
        assert_eq!(policy.default_rsa_bits, 2048);
        assert_eq!(policy.default_curve, Curve::P256);
    }

    #[test]
    fn test_rsa_ceiling() {
        let policy = KeyPolicy::default();
        assert!(policy.validate_rsa_bits(4608).is_ok());
        assert!(policy.validate_rsa_bits(16384).is_ok());
        assert!(matches!(
            policy.validate_rsa_bits(16385),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rsa_floor() {
        let policy = KeyPolicy::default();
        assert!(policy.validate_rsa_bits(1024).is_ok());
        assert!(policy.validate_rsa_bits(4096).is_ok());
        assert!(matches!(
            policy.validate_rsa_bits(512),
            Err(Error::WeakParameter(_))
        ));
        assert!(matches!(
            policy.validate_rsa_bits(1023),
            Err(Error::WeakParameter(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy = KeyPolicy::from_json(r#"{ "min_rsa_bits": 2048 }"#).unwrap();
        assert_eq!(policy.min_rsa_bits, 2048);
        assert_eq!(policy.default_rsa_bits, 2048);
        assert_eq!(policy.default_curve, Curve::P256);
    }

    #[test]
    fn test_json_round_trip() {
        let policy = KeyPolicy {
            min_rsa_bits: 2048,
            max_rsa_bits: 8192,
            default_rsa_bits: 3072,
            default_curve: Curve::P384,
        };
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("P-384"));
        assert_eq!(KeyPolicy::from_json(&json).unwrap(), policy);
    }

    #[test]
    fn test_inconsistent_policy_rejected() {
        let result = KeyPolicy::from_json(r#"{ "min_rsa_bits": 4096, "default_rsa_bits": 2048 }"#);
        assert!(matches!(result, Err(Error::WeakParameter(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            KeyPolicy::from_json("not json"),
            Err(Error::InvalidParameter(_))
        ));
    }
}
