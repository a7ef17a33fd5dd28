//! # PEM Codec
//!
//! Text armor shared by all three key families, built on the RFC 7468
//! codec that ships with the RustCrypto `der` stack.
//!
//! ## Block Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PEM BLOCK                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  -----BEGIN <LABEL>-----                                               │
//! │  base64(DER), wrapped at 64 columns                                    │
//! │  ...                                                                   │
//! │  -----END <LABEL>-----                                                 │
//! │                                                                         │
//! │  Labels in use:                                                        │
//! │  ┌──────────────────┬───────────────┬──────────────────────────────┐   │
//! │  │ PRIVATE KEY      │ PKCS#8        │ RSA, EC (decode only)        │   │
//! │  │ RSA PRIVATE KEY  │ PKCS#1        │ RSA (decode only)            │   │
//! │  │ EC PRIVATE KEY   │ SEC1          │ EC                           │   │
//! │  │ PUBLIC KEY       │ PKIX / SPKI   │ RSA, EC                      │   │
//! │  │ RSA PUBLIC KEY   │ PKCS#1        │ RSA (decode only)            │   │
//! │  └──────────────────┴───────────────┴──────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding is strict: the input must be a single block with matching BEGIN
//! and END labels. Explanatory text around the block is rejected.
//!
//! The key types encode and decode themselves through the typed
//! `to_*_pem` / `from_*_pem` codecs. This module supplies the line ending
//! they share, the label dispatch for decoders that accept more than one
//! block type, and raw armor for DER the key codecs cannot parse directly.

use ::rsa::pkcs8::der::pem as armor;
use zeroize::Zeroizing;

pub use ::rsa::pkcs8::LineEnding;

use crate::error::{Error, Result};

/// Block labels understood by the key codecs
pub mod label {
    /// PKCS#8 private key
    pub const PRIVATE_KEY: &str = "PRIVATE KEY";
    /// PKCS#1 RSA private key
    pub const RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";
    /// SEC1 elliptic-curve private key
    pub const EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";
    /// PKIX SubjectPublicKeyInfo
    pub const PUBLIC_KEY: &str = "PUBLIC KEY";
    /// PKCS#1 RSA public key
    pub const RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
}

/// Line ending for every PEM document this crate writes
pub const LINE_ENDING: LineEnding = LineEnding::LF;

/// A decoded PEM block
///
/// The DER payload may hold private key material and is wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// The label between `BEGIN` and the trailing dashes
    pub label: String,
    /// Decoded DER payload
    pub der: Zeroizing<Vec<u8>>,
}

/// Wrap a DER payload in PEM armor
pub fn encode(label: &str, der: &[u8]) -> Result<String> {
    Ok(armor::encode_string(label, LINE_ENDING, der)?)
}

/// Decode a PEM document into its label and DER payload
pub fn decode(input: &[u8]) -> Result<PemBlock> {
    require_input(input)?;
    let (label, der) = armor::decode_vec(input)?;

    Ok(PemBlock {
        label: label.to_string(),
        der: Zeroizing::new(der),
    })
}

/// Decode a PEM document and require one of the `accepted` labels
pub fn decode_expecting(input: &[u8], accepted: &[&str]) -> Result<PemBlock> {
    expect_label(input, accepted)?;
    decode(input)
}

/// Read the label of a PEM document and require one of `accepted`
///
/// Only the BEGIN line is inspected; the typed decoder that runs next
/// validates the body.
pub fn expect_label<'a>(input: &'a [u8], accepted: &[&str]) -> Result<&'a str> {
    require_input(input)?;
    let label = armor::decode_label(input)?;

    if !accepted.contains(&label) {
        tracing::debug!("Rejected PEM block with label '{}'", label);
        return Err(Error::EncodingFailure(format!(
            "invalid PEM block type: expected one of {:?}, got '{}'",
            accepted, label
        )));
    }

    Ok(label)
}

/// View PEM input as text for the typed `from_*_pem` decoders
pub(crate) fn as_text(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input)
        .map_err(|_| Error::EncodingFailure("PEM data is not valid UTF-8".into()))
}

fn require_input(input: &[u8]) -> Result<()> {
    if input.is_empty() {
        return Err(Error::EncodingFailure("PEM data cannot be empty".into()));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
