//! Per-run generation constraints.

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Shortest length for which pronounceable generation is attempted.
pub const PHONEME_MIN_LENGTH: usize = 5;

/// Constraints for one run of password generation.
///
/// Immutable once validated; every password of a batch shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Exact number of characters per password.
    pub length: usize,
    /// Require at least one uppercase letter.
    pub require_uppercase: bool,
    /// Require at least one digit.
    pub require_digit: bool,
    /// Never emit visually ambiguous characters.
    pub avoid_ambiguous: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            length: 8,
            require_uppercase: false,
            require_digit: false,
            avoid_ambiguous: false,
        }
    }
}

impl Configuration {
    /// Creates a configuration with the given length and no constraints.
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Number of character classes that must appear.
    pub fn required_classes(&self) -> usize {
        usize::from(self.require_uppercase) + usize::from(self.require_digit)
    }

    /// Whether the phoneme generator can be used at this length.
    pub fn supports_phonemes(&self) -> bool {
        self.length >= PHONEME_MIN_LENGTH
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::InvalidLength(self.length));
        }
        if self.length < self.required_classes() {
            return Err(ConfigError::TooShortForConstraints {
                length: self.length,
                required: self.required_classes(),
            });
        }
        Ok(())
    }
}
