//! Pluggable randomness sources.
//!
//! Generators never talk to the operating system or a hash function
//! directly. They draw bounded integers from a [`RandomSource`], which is
//! either backed by OS entropy ([`OsSource`]) or by a deterministic digest
//! stream derived from a file ([`DigestSource`]).

mod digest;
mod os;

pub use digest::{DigestAlgorithm, DigestSource};
pub use os::OsSource;

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or drawing from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("seed source unreadable: {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("invalid draw bound {0} (must be in 1..=4294967295)")]
    InvalidBound(usize),
}

/// A source of bounded, uniformly distributed integers.
///
/// Implementations carry a mutable cursor, so a single instance must not
/// be shared across threads without external synchronization. Reusing one
/// instance across many passwords is what makes a seeded batch
/// reproducible.
pub trait RandomSource {
    /// Returns an integer in `[0, max)`.
    fn next(&mut self, max: usize) -> Result<usize, SourceError>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next(&mut self, max: usize) -> Result<usize, SourceError> {
        (**self).next(max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next(&mut self, max: usize) -> Result<usize, SourceError> {
        (**self).next(max)
    }
}

/// Validates a draw bound and narrows it to `u32`.
pub(crate) fn check_bound(max: usize) -> Result<u32, SourceError> {
    match u32::try_from(max) {
        Ok(bound) if bound > 0 => Ok(bound),
        _ => Err(SourceError::InvalidBound(max)),
    }
}

/// Which randomness source a run should use.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceSpec {
    /// Operating system entropy.
    #[default]
    Os,
    /// Deterministic stream from a file digest.
    Digest {
        path: PathBuf,
        seed: Option<u64>,
        algorithm: DigestAlgorithm,
    },
}

impl SourceSpec {
    /// Parses a `path[#seed]` argument into a digest source spec.
    ///
    /// The seed is whatever follows the last `#` and must be a decimal
    /// `u64`. Without `#` no seed is mixed in.
    pub fn digest(arg: &str, algorithm: DigestAlgorithm) -> Result<Self, ConfigError> {
        let (path, seed) = match arg.rsplit_once('#') {
            Some((path, seed)) => {
                let seed = seed
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(arg.to_string()))?;
                (path, Some(seed))
            }
            None => (arg, None),
        };

        if path.is_empty() {
            return Err(ConfigError::InvalidSeed(arg.to_string()));
        }

        Ok(SourceSpec::Digest {
            path: PathBuf::from(path),
            seed,
            algorithm,
        })
    }

    /// Opens the source. There is no fallback between variants: a failure
    /// here is fatal to the requesting call.
    pub fn open(&self) -> Result<Box<dyn RandomSource>, SourceError> {
        match self {
            SourceSpec::Os => Ok(Box::new(OsSource::new()?)),
            SourceSpec::Digest {
                path,
                seed,
                algorithm,
            } => Ok(Box::new(DigestSource::from_file(path, *seed, *algorithm)?)),
        }
    }
}

/// Replays a fixed list of raw values, reduced modulo the requested bound.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    values: Vec<usize>,
    index: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(values: Vec<usize>) -> Self {
        Self { values, index: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next(&mut self, max: usize) -> Result<usize, SourceError> {
        check_bound(max)?;
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        Ok(value % max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bound_rejected() {
        assert!(matches!(check_bound(0), Err(SourceError::InvalidBound(0))));
        assert_eq!(check_bound(26).unwrap(), 26);
    }

    #[test]
    fn test_parse_digest_without_seed() {
        let spec = SourceSpec::digest("/etc/hostname", DigestAlgorithm::Sha1).unwrap();
        assert_eq!(
            spec,
            SourceSpec::Digest {
                path: PathBuf::from("/etc/hostname"),
                seed: None,
                algorithm: DigestAlgorithm::Sha1,
            }
        );
    }

    #[test]
    fn test_parse_digest_with_seed() {
        let spec = SourceSpec::digest("notes#with#hash#17", DigestAlgorithm::Sha256).unwrap();
        assert_eq!(
            spec,
            SourceSpec::Digest {
                path: PathBuf::from("notes#with#hash"),
                seed: Some(17),
                algorithm: DigestAlgorithm::Sha256,
            }
        );
    }

    #[test]
    fn test_parse_digest_bad_seed() {
        assert!(matches!(
            SourceSpec::digest("file#abc", DigestAlgorithm::Sha1),
            Err(ConfigError::InvalidSeed(_))
        ));
        assert!(matches!(
            SourceSpec::digest("#12", DigestAlgorithm::Sha1),
            Err(ConfigError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_open_missing_file_is_unreadable() {
        let spec = SourceSpec::digest("/nonexistent/pwgen-seed-file", DigestAlgorithm::Sha1)
            .unwrap();
        assert!(matches!(
            spec.open(),
            Err(SourceError::SourceUnreadable { .. })
        ));
    }

    #[test]
    fn test_scripted_source_reduces_modulo() {
        let mut source = ScriptedSource::new(vec![7, 30]);
        assert_eq!(source.next(5).unwrap(), 2);
        assert_eq!(source.next(26).unwrap(), 4);
        assert_eq!(source.next(10).unwrap(), 7);
    }
}
