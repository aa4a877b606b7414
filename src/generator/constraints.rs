//! Obligation tracking shared by both generators.
//!
//! An obligation is a required character class not yet present in the
//! output. It is cleared the moment a qualifying character is emitted.
//! Anything still owed when generation ends is forced by overwriting a
//! position chosen with the same random source, so a seeded run stays
//! reproducible end to end.

use super::charset::CharClass;
use super::{GenerateError, MAX_ATTEMPTS};
use crate::config::Configuration;
use crate::source::RandomSource;

/// Outstanding character-class requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Obligations {
    digit: bool,
    uppercase: bool,
}

impl Obligations {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            digit: config.require_digit,
            uppercase: config.require_uppercase,
        }
    }

    pub(crate) fn observe(&mut self, byte: u8) {
        match CharClass::of(byte) {
            CharClass::Digit => self.digit = false,
            CharClass::Uppercase => self.uppercase = false,
            _ => {}
        }
    }

    pub(crate) fn observe_all(&mut self, bytes: &[u8]) {
        bytes.iter().for_each(|&b| self.observe(b));
    }

    pub(crate) fn needs_digit(&self) -> bool {
        self.digit
    }

    pub(crate) fn needs_uppercase(&self) -> bool {
        self.uppercase
    }
}

/// Positions that can be overwritten with `target` without removing the
/// last character of another required class.
pub(crate) fn eligible_positions(
    buf: &[u8],
    config: &Configuration,
    target: CharClass,
) -> Vec<usize> {
    let count = |class: CharClass| buf.iter().filter(|&&b| CharClass::of(b) == class).count();
    let uppers = count(CharClass::Uppercase);
    let digits = count(CharClass::Digit);

    buf.iter()
        .enumerate()
        .filter(|&(_, &b)| match CharClass::of(b) {
            class if class == target => false,
            CharClass::Uppercase => !config.require_uppercase || uppers > 1,
            CharClass::Digit => !config.require_digit || digits > 1,
            CharClass::Lowercase | CharClass::Other => true,
        })
        .map(|(i, _)| i)
        .collect()
}

/// Picks one of `candidates` with a single draw.
pub(crate) fn pick(candidates: &[usize], rng: &mut dyn RandomSource) -> Result<usize, GenerateError> {
    if candidates.is_empty() {
        return Err(GenerateError::Unsatisfiable);
    }
    Ok(candidates[rng.next(candidates.len())?])
}

/// Draws one byte from `set`.
pub(crate) fn draw_from(set: &[u8], rng: &mut dyn RandomSource) -> Result<u8, GenerateError> {
    if set.is_empty() {
        return Err(GenerateError::Unsatisfiable);
    }
    Ok(set[rng.next(set.len())?])
}

/// Draws from `set` until `accept` passes, giving up after
/// [`MAX_ATTEMPTS`] draws.
pub(crate) fn draw_until<T: Copy>(
    set: &[T],
    rng: &mut dyn RandomSource,
    mut accept: impl FnMut(T) -> bool,
) -> Result<T, GenerateError> {
    if set.is_empty() {
        return Err(GenerateError::Unsatisfiable);
    }
    for _ in 0..MAX_ATTEMPTS {
        let candidate = set[rng.next(set.len())?];
        if accept(candidate) {
            return Ok(candidate);
        }
    }
    Err(GenerateError::RejectionLimit {
        attempts: MAX_ATTEMPTS,
    })
}

/// Overwrites one eligible position with a character from `replacements`.
pub(crate) fn force_class(
    buf: &mut [u8],
    config: &Configuration,
    target: CharClass,
    replacements: &[u8],
    rng: &mut dyn RandomSource,
) -> Result<usize, GenerateError> {
    let position = pick(&eligible_positions(buf, config, target), rng)?;
    buf[position] = draw_from(replacements, rng)?;
    tracing::trace!(position, ?target, "Forced character class");
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;

    fn both() -> Configuration {
        Configuration {
            length: 4,
            require_uppercase: true,
            require_digit: true,
            avoid_ambiguous: false,
        }
    }

    #[test]
    fn test_obligations_cleared_on_observe() {
        let mut owed = Obligations::new(&both());
        assert!(owed.needs_digit() && owed.needs_uppercase());

        owed.observe_all(b"ab3");
        assert!(!owed.needs_digit());
        assert!(owed.needs_uppercase());

        owed.observe(b'K');
        assert!(!owed.needs_uppercase());
    }

    #[test]
    fn test_sole_representative_not_eligible() {
        // 'A' is the only uppercase letter, so it must survive.
        assert_eq!(
            eligible_positions(b"Abcd", &both(), CharClass::Digit),
            vec![1, 2, 3]
        );
        // With two uppercase letters either may go.
        assert_eq!(
            eligible_positions(b"AB", &both(), CharClass::Digit),
            vec![0, 1]
        );
    }

    #[test]
    fn test_unrequired_classes_are_eligible() {
        let config = Configuration {
            require_uppercase: false,
            ..both()
        };
        assert_eq!(
            eligible_positions(b"Ab", &config, CharClass::Digit),
            vec![0, 1]
        );
    }

    #[test]
    fn test_force_class_is_deterministic() {
        let mut buf = *b"abcd";
        let mut rng = ScriptedSource::new(vec![2, 7]);
        let position = force_class(&mut buf, &both(), CharClass::Digit, b"0123456789", &mut rng)
            .unwrap();
        assert_eq!(position, 2);
        assert_eq!(&buf, b"ab7d");
    }

    #[test]
    fn test_draw_until_gives_up() {
        let mut rng = ScriptedSource::new(vec![0]);
        let result = draw_until(&b"ab"[..], &mut rng, |b| b == b'b');
        assert!(matches!(
            result,
            Err(GenerateError::RejectionLimit { attempts: MAX_ATTEMPTS })
        ));
    }

    #[test]
    fn test_pick_from_nothing_is_unsatisfiable() {
        let mut rng = ScriptedSource::new(vec![0]);
        assert!(matches!(
            pick(&[], &mut rng),
            Err(GenerateError::Unsatisfiable)
        ));
    }
}
