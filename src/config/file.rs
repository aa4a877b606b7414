//! TOML defaults file.
//!
//! Every field is optional. Values present here replace the built-in
//! defaults and are in turn replaced by command-line flags.

use super::ConfigError;
use crate::source::DigestAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub password: PasswordSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub source: SourceSection,
}

/// Password shape defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PasswordSection {
    /// Password length.
    pub length: Option<usize>,
    /// Require an uppercase letter.
    pub capitalize: Option<bool>,
    /// Require a digit.
    pub numerals: Option<bool>,
    /// Avoid ambiguous characters.
    pub ambiguous: Option<bool>,
    /// Use the flat random generator instead of phonemes.
    pub secure: Option<bool>,
}

/// Output layout defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Print in columns.
    pub columns: Option<bool>,
    /// Number of passwords.
    pub count: Option<usize>,
}

/// Randomness source defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// `path[#seed]` for the digest-seeded source.
    pub sha1: Option<String>,
    /// Digest used by the seeded source.
    pub digest: Option<DigestAlgorithm>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded config file");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config.password.length == Some(0) {
            return Err(ConfigError::InvalidLength(0));
        }
        if config.output.count == Some(0) {
            return Err(ConfigError::InvalidCount(0));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_full_file() {
        let config = FileConfig::from_toml(
            r#"
            [password]
            length = 12
            capitalize = true
            numerals = false
            ambiguous = true
            secure = true

            [output]
            columns = false
            count = 3

            [source]
            sha1 = "/tmp/seed#5"
            digest = "sha256"
            "#,
        )
        .unwrap();

        assert_eq!(config.password.length, Some(12));
        assert_eq!(config.password.capitalize, Some(true));
        assert_eq!(config.password.numerals, Some(false));
        assert_eq!(config.output.count, Some(3));
        assert_eq!(config.source.sha1.as_deref(), Some("/tmp/seed#5"));
        assert_eq!(config.source.digest, Some(DigestAlgorithm::Sha256));
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            FileConfig::from_toml("[password]\nlength = 0\n"),
            Err(ConfigError::InvalidLength(0))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            FileConfig::from_toml("[password]\nlenght = 9\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FileConfig::from_file("/nonexistent/pwgen.toml"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
