//! Password generation algorithms.
//!
//! Two interchangeable generators share one contract: given a validated
//! [`Configuration`] and a [`RandomSource`], return a password of exactly
//! `length` characters containing every required character class.
//!
//! - [`PhonemeGenerator`] concatenates syllable-like units into
//!   pronounceable strings.
//! - [`FlatGenerator`] draws each character independently.

mod charset;
mod constraints;
mod flat;
mod phoneme;

pub use charset::{is_ambiguous, CharClass, AMBIGUOUS, DIGITS, LOWERCASE, UPPERCASE};
pub use flat::FlatGenerator;
pub use phoneme::{PhonemeClass, PhonemeGenerator, PhonemeUnit, PHONEMES};

use crate::config::{ConfigError, Configuration};
use crate::source::{RandomSource, SourceError};
use thiserror::Error;

/// Maximum draws spent on a single rejection-sampled choice.
///
/// Reaching it means the table or alphabet cannot produce an acceptable
/// candidate, not bad luck.
pub const MAX_ATTEMPTS: usize = 1000;

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("randomness source failed: {0}")]
    Source(#[from] SourceError),
    #[error("no acceptable candidate after {attempts} draws")]
    RejectionLimit { attempts: usize },
    #[error("no position can carry the required character class")]
    Unsatisfiable,
}

/// A password generation strategy.
pub trait PasswordGenerator {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Generates one password.
    fn generate(
        &self,
        config: &Configuration,
        rng: &mut dyn RandomSource,
    ) -> Result<String, GenerateError>;
}

/// Converts generated ASCII bytes into a `String`.
pub(crate) fn into_password(buf: Vec<u8>) -> String {
    buf.into_iter().map(char::from).collect()
}
