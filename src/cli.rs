//! Command-line arguments and run planning.
//!
//! Precedence, lowest to highest: built-in defaults (which depend on
//! whether stdout is a terminal), the TOML config file, command-line flags.

use crate::config::{ConfigError, Configuration, FileConfig};
use crate::driver::{GeneratorKind, Layout};
use crate::source::{DigestAlgorithm, SourceSpec};
use clap::Parser;
use std::path::PathBuf;

/// Default password length.
pub const DEFAULT_LENGTH: usize = 8;

/// Generate pronounceable or completely random passwords.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pwgen", version)]
pub struct Args {
    /// Length of each password.
    #[arg(value_name = "PW_LENGTH")]
    pub pw_length: Option<usize>,

    /// Number of passwords to generate.
    #[arg(value_name = "NUM_PW")]
    pub num_pw: Option<usize>,

    /// Include at least one capital letter in the password.
    #[arg(short = 'c', long, overrides_with = "no_capitalize")]
    pub capitalize: bool,

    /// Don't require a capital letter.
    #[arg(long, overrides_with = "capitalize")]
    pub no_capitalize: bool,

    /// Include at least one number in the password.
    #[arg(short = 'n', long, overrides_with = "no_numerals")]
    pub numerals: bool,

    /// Don't require a number.
    #[arg(long, overrides_with = "numerals")]
    pub no_numerals: bool,

    /// Generate completely random passwords.
    #[arg(short = 's', long)]
    pub secure: bool,

    /// Accepted for compatibility; has no effect.
    #[arg(short = 'a', long = "alt-phonics", hide = true)]
    pub alt_phonics: bool,

    /// Don't include ambiguous characters in the password.
    #[arg(short = 'B', long)]
    pub ambiguous: bool,

    /// Number of passwords to generate.
    #[arg(short = 'N', long = "num-passwords", value_name = "NUM")]
    pub num_passwords: Option<usize>,

    /// Use the hash of a file as a (not so) random generator.
    #[arg(short = 'H', long = "sha1", value_name = "FILE[#SEED]")]
    pub sha1: Option<String>,

    /// Digest used with --sha1.
    #[arg(long, value_enum, value_name = "DIGEST")]
    pub digest: Option<DigestAlgorithm>,

    /// Print the generated passwords in columns.
    #[arg(short = 'C', overrides_with = "one_column")]
    pub columns: bool,

    /// Don't print the generated passwords in columns.
    #[arg(short = '1', overrides_with = "columns")]
    pub one_column: bool,

    /// Read defaults from a TOML file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug information to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Everything needed to run one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub config: Configuration,
    pub kind: GeneratorKind,
    pub source: SourceSpec,
    pub layout: Layout,
    pub count: usize,
}

/// Resolves a three-level boolean: flag pair, then file, then default.
fn resolve_flag(on: bool, off: bool, file: Option<bool>, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        file.unwrap_or(default)
    }
}

impl Args {
    /// Combines arguments, file defaults and terminal defaults.
    pub fn plan(&self, file: &FileConfig, is_tty: bool) -> Result<RunPlan, ConfigError> {
        let length = self
            .pw_length
            .or(file.password.length)
            .unwrap_or(DEFAULT_LENGTH);

        let config = Configuration {
            length,
            require_uppercase: resolve_flag(
                self.capitalize,
                self.no_capitalize,
                file.password.capitalize,
                is_tty,
            ),
            require_digit: resolve_flag(
                self.numerals,
                self.no_numerals,
                file.password.numerals,
                is_tty,
            ),
            avoid_ambiguous: self.ambiguous || file.password.ambiguous.unwrap_or(false),
        };
        config.validate()?;

        let kind = if self.secure || file.password.secure.unwrap_or(false) {
            GeneratorKind::Flat
        } else {
            GeneratorKind::Phoneme
        }
        .select(&config);

        let algorithm = self.digest.or(file.source.digest).unwrap_or_default();
        let source = match self.sha1.as_deref().or(file.source.sha1.as_deref()) {
            Some(arg) => SourceSpec::digest(arg, algorithm)?,
            None => SourceSpec::Os,
        };

        let columns = resolve_flag(self.columns, self.one_column, file.output.columns, is_tty);
        let layout = Layout::for_length(columns, length);

        let count = self
            .num_pw
            .or(self.num_passwords)
            .or(file.output.count)
            .unwrap_or_else(|| layout.default_count());
        if count == 0 {
            return Err(ConfigError::InvalidCount(count));
        }

        Ok(RunPlan {
            config,
            kind,
            source,
            layout,
            count,
        })
    }
}
