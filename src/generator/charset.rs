//! Character classes and alphabets.

use crate::config::Configuration;

pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";

/// Characters that are easily confused with one another when printed.
pub const AMBIGUOUS: &[u8] = b"B8G6I1l0OQDS5Z2";

/// Classification of a single password character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Other,
}

impl CharClass {
    /// Classifies an ASCII byte.
    pub fn of(byte: u8) -> Self {
        if byte.is_ascii_lowercase() {
            CharClass::Lowercase
        } else if byte.is_ascii_uppercase() {
            CharClass::Uppercase
        } else if byte.is_ascii_digit() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }
}

/// Returns true if `byte` is visually ambiguous.
#[inline]
pub fn is_ambiguous(byte: u8) -> bool {
    AMBIGUOUS.contains(&byte)
}

/// Returns `set`, minus ambiguous characters when requested.
pub(crate) fn filtered(set: &[u8], avoid_ambiguous: bool) -> Vec<u8> {
    set.iter()
        .copied()
        .filter(|&b| !(avoid_ambiguous && is_ambiguous(b)))
        .collect()
}

/// Alphabet for flat random generation.
///
/// Lowercase letters always; uppercase letters and digits only when the
/// configuration requires them.
pub(crate) fn flat_alphabet(config: &Configuration) -> Vec<u8> {
    let mut alphabet = filtered(LOWERCASE, config.avoid_ambiguous);
    if config.require_uppercase {
        alphabet.extend(filtered(UPPERCASE, config.avoid_ambiguous));
    }
    if config.require_digit {
        alphabet.extend(filtered(DIGITS, config.avoid_ambiguous));
    }
    alphabet
}
