//! Batch generation.
//!
//! The driver ties one validated [`Configuration`], one generator and one
//! randomness source together. The source is opened once and shared by
//! every password of the batch, so a digest-seeded batch is reproducible
//! as a whole.

pub mod output;

use crate::config::{ConfigError, Configuration};
use crate::generator::{FlatGenerator, GenerateError, PasswordGenerator, PhonemeGenerator};
use crate::source::{RandomSource, SourceError, SourceSpec};
use thiserror::Error;

pub use output::{write_passwords, Layout, TERM_WIDTH};

/// Errors that abort a batch.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("failed to write passwords: {0}")]
    Io(#[from] std::io::Error),
}

/// Which generation algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    /// Pronounceable passwords.
    #[default]
    Phoneme,
    /// Independent random characters.
    Flat,
}

impl GeneratorKind {
    /// Falls back to [`GeneratorKind::Flat`] when the configured length is
    /// too short for phoneme generation.
    pub fn select(self, config: &Configuration) -> Self {
        match self {
            GeneratorKind::Phoneme if !config.supports_phonemes() => GeneratorKind::Flat,
            kind => kind,
        }
    }

    fn generator(self) -> Box<dyn PasswordGenerator> {
        match self {
            GeneratorKind::Phoneme => Box::new(PhonemeGenerator::new()),
            GeneratorKind::Flat => Box::new(FlatGenerator::new()),
        }
    }
}

/// Generates passwords for one run.
pub struct Driver {
    config: Configuration,
    kind: GeneratorKind,
    generator: Box<dyn PasswordGenerator>,
    source: Box<dyn RandomSource>,
    generated: u64,
}

impl Driver {
    /// Creates a driver around an already opened source.
    pub fn new(
        config: Configuration,
        requested: GeneratorKind,
        source: Box<dyn RandomSource>,
    ) -> Result<Self, DriverError> {
        config.validate()?;

        let kind = requested.select(&config);
        if kind != requested {
            tracing::info!(
                length = config.length,
                "Password too short for phonemes, using flat generator"
            );
        }

        Ok(Self {
            config,
            kind,
            generator: kind.generator(),
            source,
            generated: 0,
        })
    }

    /// Validates the configuration, then opens the source described by
    /// `spec`.
    pub fn from_spec(
        config: Configuration,
        requested: GeneratorKind,
        spec: &SourceSpec,
    ) -> Result<Self, DriverError> {
        config.validate()?;
        let source = spec.open()?;
        Self::new(config, requested, source)
    }

    /// Returns the generator actually in use.
    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Returns the number of passwords generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Generates one password.
    pub fn generate(&mut self) -> Result<String, DriverError> {
        let password = self
            .generator
            .generate(&self.config, self.source.as_mut())?;
        self.generated += 1;
        Ok(password)
    }

    /// Generates `count` passwords. The first failure aborts the batch and
    /// nothing is returned.
    pub fn generate_batch(&mut self, count: usize) -> Result<Vec<String>, DriverError> {
        if count == 0 {
            return Err(ConfigError::InvalidCount(count).into());
        }

        let passwords = (0..count)
            .map(|_| self.generate())
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            count,
            generator = self.generator.name(),
            length = self.config.length,
            "Generated password batch"
        );
        Ok(passwords)
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("config", &self.config)
            .field("kind", &self.kind)
            .field("generated", &self.generated)
            .finish_non_exhaustive()
    }
}
