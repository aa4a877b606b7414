//! Operating system entropy source.

use super::{check_bound, RandomSource, SourceError};
use rand_core::{OsRng, RngCore};

/// Draws from the operating system's entropy pool.
///
/// Each draw is independent. Bounded integers are produced by rejecting
/// the tail of the `u32` range that would bias the modulo reduction, so
/// every value in `[0, max)` is equally likely.
#[derive(Debug, Default)]
pub struct OsSource {
    draws: u64,
}

impl OsSource {
    /// Opens the OS source, probing the entropy facility once.
    ///
    /// Fails with [`SourceError::EntropyUnavailable`] instead of falling
    /// back to anything weaker.
    pub fn new() -> Result<Self, SourceError> {
        let mut probe = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut probe)
            .map_err(|e| SourceError::EntropyUnavailable(e.to_string()))?;

        tracing::debug!("OS entropy source opened");
        Ok(Self { draws: 0 })
    }

    /// Returns the number of bounded draws served so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn next_u32(&mut self) -> Result<u32, SourceError> {
        let mut buf = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| SourceError::EntropyUnavailable(e.to_string()))?;
        Ok(u32::from_le_bytes(buf))
    }
}

impl RandomSource for OsSource {
    fn next(&mut self, max: usize) -> Result<usize, SourceError> {
        let bound = check_bound(max)?;

        // 2^32 mod bound: values below this would be over-represented.
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u32()?;
            if value >= threshold {
                self.draws += 1;
                return Ok((value % bound) as usize);
            }
        }
    }
}
