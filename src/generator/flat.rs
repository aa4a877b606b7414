//! Flat random-character generation.

use super::charset::{self, CharClass, DIGITS, UPPERCASE};
use super::constraints::{self, Obligations};
use super::{into_password, GenerateError, PasswordGenerator};
use crate::config::Configuration;
use crate::source::RandomSource;

/// Draws every character independently from one alphabet.
///
/// The alphabet is lowercase letters, plus uppercase letters and digits
/// when those classes are required. If a required class is missing after
/// all draws, one eligible position is overwritten from that class.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatGenerator;

impl FlatGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordGenerator for FlatGenerator {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn generate(
        &self,
        config: &Configuration,
        rng: &mut dyn RandomSource,
    ) -> Result<String, GenerateError> {
        config.validate()?;

        let alphabet = charset::flat_alphabet(config);
        let mut buf = Vec::with_capacity(config.length);
        for _ in 0..config.length {
            buf.push(constraints::draw_from(&alphabet, rng)?);
        }

        let mut owed = Obligations::new(config);
        owed.observe_all(&buf);

        if owed.needs_digit() {
            let digits = charset::filtered(DIGITS, config.avoid_ambiguous);
            constraints::force_class(&mut buf, config, CharClass::Digit, &digits, rng)?;
        }
        if owed.needs_uppercase() {
            let uppers = charset::filtered(UPPERCASE, config.avoid_ambiguous);
            constraints::force_class(&mut buf, config, CharClass::Uppercase, &uppers, rng)?;
        }

        Ok(into_password(buf))
    }
}
