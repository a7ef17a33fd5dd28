//! # Error Handling
//!
//! This module provides the error taxonomy for every asymmetric operation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Parameter Errors                                                  │
//! │  │   ├── InvalidParameter      - Missing key half, bad length/scheme   │
//! │  │   └── WeakParameter         - Key size below the policy floor       │
//! │  │                                                                      │
//! │  ├── Entropy Errors                                                    │
//! │  │   └── RandomnessFailure     - RandomSource could not be read        │
//! │  │                                                                      │
//! │  ├── Encoding Errors                                                   │
//! │  │   └── EncodingFailure       - Malformed or wrong-type PEM/DER       │
//! │  │                                                                      │
//! │  ├── Curve Errors                                                      │
//! │  │   ├── CurveMismatch         - Private/public curves differ          │
//! │  │   ├── PointNotOnCurve       - Public point fails curve equation     │
//! │  │   └── KeyMismatch           - Public key not derived from private   │
//! │  │                                                                      │
//! │  └── Envelope Errors                                                   │
//! │      ├── CiphertextInvalid     - Decryption failed (no detail)         │
//! │      └── SignatureInvalid      - RSA signature did not verify          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation
//!
//! Every public operation returns `Result<T, Error>`. Nothing retries
//! internally: callers decide whether to regenerate keys or switch to a
//! different entropy source. ECDSA verification is the only operation that
//! answers with a plain `bool`.

use thiserror::Error;

use crate::ec::Curve;

/// Result type alias for asymmetric operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the asymmetric suite
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Parameter Errors (100-199)
    // ========================================================================

    /// A required argument is missing or out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A parameter is below the configured security floor
    #[error("Weak parameter: {0}")]
    WeakParameter(String),

    // ========================================================================
    // Entropy Errors (200-299)
    // ========================================================================

    /// The random source failed to produce bytes
    #[error("Randomness failure: {0}")]
    RandomnessFailure(String),

    // ========================================================================
    // Encoding Errors (300-399)
    // ========================================================================

    /// PEM or DER input could not be decoded, or a key could not be encoded
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    // ========================================================================
    // Curve Errors (400-499)
    // ========================================================================

    /// Private and public halves live on different curves
    #[error("Curve mismatch: private key is on {private}, public key is on {public}")]
    CurveMismatch {
        /// Curve of the private key
        private: Curve,
        /// Curve of the public key
        public: Curve,
    },

    /// The public point does not satisfy the curve equation
    #[error("Public key is not on the {0} curve")]
    PointNotOnCurve(Curve),

    /// The public key is a valid point but not the one derived from the private key
    #[error("Public key does not match private key")]
    KeyMismatch,

    // ========================================================================
    // Envelope Errors (500-599)
    // ========================================================================

    /// Decryption failed
    ///
    /// Padding failures, wrong keys and malformed input all map here and
    /// are indistinguishable to the caller.
    #[error("Ciphertext is invalid")]
    CiphertextInvalid,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureInvalid,
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Parameters
    /// - 200-299: Entropy
    /// - 300-399: Encoding
    /// - 400-499: Curves
    /// - 500-599: Envelopes and signatures
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidParameter(_) => 100,
            Error::WeakParameter(_) => 101,

            Error::RandomnessFailure(_) => 200,

            Error::EncodingFailure(_) => 300,

            Error::CurveMismatch { .. } => 400,
            Error::PointNotOnCurve(_) => 401,
            Error::KeyMismatch => 402,

            Error::CiphertextInvalid => 500,
            Error::SignatureInvalid => 501,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Only entropy failures can be resolved by retrying, possibly with a
    /// different random source. Everything else is a property of the inputs.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::RandomnessFailure(_))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<::rsa::pkcs8::der::pem::Error> for Error {
    fn from(err: ::rsa::pkcs8::der::pem::Error) -> Self {
        Error::EncodingFailure(format!("Invalid PEM document: {}", err))
    }
}

impl From<::rsa::pkcs8::Error> for Error {
    fn from(err: ::rsa::pkcs8::Error) -> Self {
        Error::EncodingFailure(format!("Invalid PKCS#8 document: {}", err))
    }
}

impl From<::rsa::pkcs8::spki::Error> for Error {
    fn from(err: ::rsa::pkcs8::spki::Error) -> Self {
        Error::EncodingFailure(format!("Invalid SubjectPublicKeyInfo: {}", err))
    }
}

impl From<::rsa::pkcs1::Error> for Error {
    fn from(err: ::rsa::pkcs1::Error) -> Self {
        Error::EncodingFailure(format!("Invalid PKCS#1 document: {}", err))
    }
}

/// Key-construction failures; decryption and verification map their own
/// errors so they never leak detail
impl From<::rsa::Error> for Error {
    fn from(err: ::rsa::Error) -> Self {
        Error::InvalidParameter(format!("RSA operation failed: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidParameter(format!("Invalid configuration: {}", err))
    }
}

// ============================================================================
// TESTS
// ============================================================================
