//! Generation constraints and configuration files.
//!
//! [`Configuration`] is the per-run value object handed to generators.
//! [`FileConfig`] holds optional defaults loaded from TOML, which the
//! command line overrides.

mod file;
mod settings;

pub use file::{FileConfig, OutputSection, PasswordSection, SourceSection};
pub use settings::{Configuration, PHONEME_MIN_LENGTH};

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid password length: {0}")]
    InvalidLength(usize),
    #[error("invalid number of passwords: {0}")]
    InvalidCount(usize),
    #[error("password length {length} cannot hold {required} required character classes")]
    TooShortForConstraints { length: usize, required: usize },
    #[error("invalid seed source (expected path[#seed]): {0}")]
    InvalidSeed(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}
