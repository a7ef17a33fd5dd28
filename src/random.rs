//! # Random Sources
//!
//! Every operation that needs fresh entropy takes a [`RandomSource`]
//! argument. There is no process-wide generator to swap out: tests inject a
//! failing source at the call site and run concurrently with everything else.
//!
//! ## Entropy Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ENTROPY FLOW                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  caller                                                                │
//! │    │  &mut dyn RandomSource                                            │
//! │    ▼                                                                   │
//! │  ┌──────────────────────┐                                              │
//! │  │ SourceRng (adapter)  │── probe read ──► fails? ─► RandomnessFailure │
//! │  └──────────┬───────────┘                                              │
//! │             │ CryptoRngCore                                            │
//! │             ▼                                                          │
//! │  ┌──────────────────────┐                                              │
//! │  │ RustCrypto primitive │  (rsa / p256 / p384 / p521)                  │
//! │  └──────────┬───────────┘                                              │
//! │             │                                                          │
//! │             ▼                                                          │
//! │  failure recorded mid-operation? ─► output discarded, RandomnessFailure│
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! RustCrypto primitives pull bytes through the infallible
//! `RngCore::fill_bytes`, so the adapter cannot abort them midway. Once the
//! source fails the adapter keeps the primitive running on OS entropy and the
//! result is thrown away; the caller only ever sees the error.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// A provider of cryptographically secure random bytes
///
/// `read` fills as much of `buf` as it can and returns the number of bytes
/// written. Returning `Ok(0)` for a non-empty buffer is treated as
/// exhaustion.
pub trait RandomSource {
    /// Read random bytes into `buf`
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}

impl<R: RngCore + CryptoRng> RandomSource for R {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.try_fill_bytes(buf)
            .map_err(|e| Error::RandomnessFailure(e.to_string()))?;
        Ok(buf.len())
    }
}

/// The operating system's CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| Error::RandomnessFailure(format!("OS random source failed: {}", e)))?;
        Ok(buf.len())
    }
}

/// A random source that fails, for exercising error paths
///
/// `FailingRandom::new()` fails on the first read. `FailingRandom::after(n)`
/// serves `n` reads from the OS generator and fails on every read after
/// that, which simulates entropy running dry in the middle of an operation.
#[derive(Debug, Clone, Default)]
pub struct FailingRandom {
    reads_left: usize,
}

impl FailingRandom {
    /// A source that fails immediately
    pub fn new() -> Self {
        Self { reads_left: 0 }
    }

    /// A source that succeeds for `reads` reads, then fails
    pub fn after(reads: usize) -> Self {
        Self { reads_left: reads }
    }
}

impl RandomSource for FailingRandom {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.reads_left == 0 {
            return Err(Error::RandomnessFailure("entropy source unavailable".into()));
        }
        self.reads_left -= 1;
        OsRng.fill_bytes(buf);
        Ok(buf.len())
    }
}

// ============================================================================
// RUSTCRYPTO ADAPTER
// ============================================================================

/// Exposes a [`RandomSource`] as a `CryptoRngCore` and remembers failures
pub(crate) struct SourceRng<'a> {
    source: &'a mut dyn RandomSource,
    failure: Option<Error>,
}

impl<'a> SourceRng<'a> {
    fn new(source: &'a mut dyn RandomSource) -> Self {
        Self {
            source,
            failure: None,
        }
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < dest.len() {
            let n = self.source.read(&mut dest[filled..])?;
            if n == 0 {
                return Err(Error::RandomnessFailure(
                    "random source returned no bytes".into(),
                ));
            }
            filled += n.min(dest.len() - filled);
        }
        Ok(())
    }

    fn probe(&mut self) -> Result<()> {
        let mut byte = [0u8; 1];
        self.fill(&mut byte)
    }
}

impl RngCore for SourceRng<'_> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if self.failure.is_none() {
            match self.fill(dest) {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!("Random source failed mid-operation: {}", e);
                    self.failure = Some(e);
                }
            }
        }
        // The operation's output is discarded; this only lets it terminate.
        OsRng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for SourceRng<'_> {}

/// Run `op` with `source` adapted for RustCrypto
///
/// The source is probed before `op` runs so a dead source fails fast. A
/// failure recorded while `op` ran wins over whatever `op` returned.
pub(crate) fn with_source<T>(
    source: &mut dyn RandomSource,
    op: impl FnOnce(&mut SourceRng<'_>) -> Result<T>,
) -> Result<T> {
    let mut rng = SourceRng::new(source);
    if let Err(e) = rng.probe() {
        tracing::warn!("Random source unavailable: {}", e);
        return Err(e);
    }

    let outcome = op(&mut rng);

    match rng.failure.take() {
        Some(err) => Err(err),
        None => outcome,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per read
    struct Trickle(u8);

    impl RandomSource for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }
            self.0 = self.0.wrapping_add(1);
            buf[0] = self.0;
            Ok(1)
        }
    }

    /// Claims success without producing anything
    struct Exhausted;

    impl RandomSource for Exhausted {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_system_random_fills_buffer() {
        let mut buf = [0u8; 64];
        let n = SystemRandom.read(&mut buf).unwrap();
        assert_eq!(n, 64);
        assert_ne!(buf, [0u8; 64]);
    }

    #[test]
    fn test_rng_core_is_a_random_source() {
        let mut rng = OsRng;
        let mut buf = [0u8; 16];
        assert_eq!(RandomSource::read(&mut rng, &mut buf).unwrap(), 16);
    }

    #[test]
    fn test_failing_random_fails_immediately() {
        let mut buf = [0u8; 8];
        let err = FailingRandom::new().read(&mut buf).unwrap_err();
        assert!(matches!(err, Error::RandomnessFailure(_)));
    }

    #[test]
    fn test_failing_random_after_n_reads() {
        let mut source = FailingRandom::after(2);
        let mut buf = [0u8; 8];
        assert!(source.read(&mut buf).is_ok());
        assert!(source.read(&mut buf).is_ok());
        assert!(source.read(&mut buf).is_err());
    }

    #[test]
    fn test_short_reads_are_accumulated() {
        let mut source = Trickle(0);
        let out = with_source(&mut source, |rng| {
            let mut buf = [0u8; 4];
            rng.fill_bytes(&mut buf);
            Ok(buf)
        })
        .unwrap();
        // The probe consumed the first byte.
        assert_eq!(out, [2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_byte_read_is_a_failure() {
        let result = with_source(&mut Exhausted, |_| Ok(()));
        assert!(matches!(result, Err(Error::RandomnessFailure(_))));
    }

    #[test]
    fn test_dead_source_skips_operation() {
        let mut ran = false;
        let result = with_source(&mut FailingRandom::new(), |_| {
            ran = true;
            Ok(())
        });
        assert!(matches!(result, Err(Error::RandomnessFailure(_))));
        assert!(!ran);
    }

    #[test]
    fn test_mid_operation_failure_discards_output() {
        // Probe succeeds, the operation's own read fails.
        let mut source = FailingRandom::after(1);
        let result = with_source(&mut source, |rng| {
            let mut buf = [0u8; 32];
            rng.fill_bytes(&mut buf);
            Ok(buf)
        });
        assert!(matches!(result, Err(Error::RandomnessFailure(_))));
    }

    #[test]
    fn test_recorded_failure_wins_over_operation_error() {
        let mut source = FailingRandom::after(1);
        let result: Result<()> = with_source(&mut source, |rng| {
            rng.next_u64();
            Err(Error::CiphertextInvalid)
        });
        assert!(matches!(result, Err(Error::RandomnessFailure(_))));
    }
}
