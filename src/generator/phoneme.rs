//! Pronounceable password generation.
//!
//! Passwords are built by alternating consonant-like and vowel-like units
//! drawn from [`PHONEMES`]. Digits and capital letters are injected at unit
//! boundaries while they are still owed; near the end of the password the
//! injection becomes certain, and whatever is still owed afterwards is
//! forced regardless of how it reads.

use super::charset::{self, CharClass, DIGITS, UPPERCASE};
use super::constraints::{self, Obligations};
use super::{into_password, GenerateError, PasswordGenerator, MAX_ATTEMPTS};
use crate::config::Configuration;
use crate::source::RandomSource;

/// Sound class of a phoneme unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhonemeClass {
    Consonant,
    Vowel,
}

impl PhonemeClass {
    fn coin_flip(rng: &mut dyn RandomSource) -> Result<Self, GenerateError> {
        Ok(if rng.next(2)? == 0 {
            PhonemeClass::Vowel
        } else {
            PhonemeClass::Consonant
        })
    }
}

/// One entry of the phoneme table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhonemeUnit {
    /// Lowercase letters of the unit.
    pub text: &'static str,
    /// Sound class.
    pub class: PhonemeClass,
    /// May not open a syllable (and so never opens a password).
    pub no_start: bool,
    /// May not be the unit that fills the last slot.
    pub no_final: bool,
}

impl PhonemeUnit {
    const fn consonant(text: &'static str) -> Self {
        Self {
            text,
            class: PhonemeClass::Consonant,
            no_start: false,
            no_final: false,
        }
    }

    const fn vowel(text: &'static str) -> Self {
        Self {
            text,
            class: PhonemeClass::Vowel,
            no_start: false,
            no_final: false,
        }
    }

    const fn no_start(self) -> Self {
        Self {
            no_start: true,
            ..self
        }
    }

    const fn no_final(self) -> Self {
        Self {
            no_final: true,
            ..self
        }
    }

    /// True for multi-letter units.
    pub fn is_digraph(&self) -> bool {
        self.text.len() > 1
    }

    pub fn is_vowel(&self) -> bool {
        self.class == PhonemeClass::Vowel
    }

    pub fn is_consonant(&self) -> bool {
        self.class == PhonemeClass::Consonant
    }
}

/// The phoneme table. Read-only; looked up by index only.
pub static PHONEMES: [PhonemeUnit; 40] = [
    PhonemeUnit::vowel("a"),
    PhonemeUnit::vowel("ae"),
    PhonemeUnit::vowel("ah"),
    PhonemeUnit::vowel("ai"),
    PhonemeUnit::consonant("b"),
    PhonemeUnit::consonant("c"),
    PhonemeUnit::consonant("ch"),
    PhonemeUnit::consonant("d"),
    PhonemeUnit::vowel("e"),
    PhonemeUnit::vowel("ee"),
    PhonemeUnit::vowel("ei"),
    PhonemeUnit::consonant("f"),
    PhonemeUnit::consonant("g"),
    PhonemeUnit::consonant("gh").no_start(),
    PhonemeUnit::consonant("h"),
    PhonemeUnit::vowel("i"),
    PhonemeUnit::vowel("ie"),
    PhonemeUnit::consonant("j").no_final(),
    PhonemeUnit::consonant("k"),
    PhonemeUnit::consonant("l"),
    PhonemeUnit::consonant("m"),
    PhonemeUnit::consonant("n"),
    PhonemeUnit::consonant("ng").no_start(),
    PhonemeUnit::vowel("o"),
    PhonemeUnit::vowel("oh"),
    PhonemeUnit::vowel("oo"),
    PhonemeUnit::consonant("p"),
    PhonemeUnit::consonant("ph"),
    PhonemeUnit::consonant("qu").no_final(),
    PhonemeUnit::consonant("r"),
    PhonemeUnit::consonant("s"),
    PhonemeUnit::consonant("sh"),
    PhonemeUnit::consonant("t"),
    PhonemeUnit::consonant("th"),
    PhonemeUnit::vowel("u"),
    PhonemeUnit::consonant("v").no_final(),
    PhonemeUnit::consonant("w"),
    PhonemeUnit::consonant("x"),
    PhonemeUnit::consonant("y"),
    PhonemeUnit::consonant("z"),
];

/// Chance, out of ten, of capitalizing an eligible unit.
const UPPERCASE_CHANCE: usize = 2;
/// Chance, out of ten, of appending a digit after a unit.
const DIGIT_CHANCE: usize = 3;
/// Once this few slots remain, owed characters are injected for certain.
const CLOSING_SLOTS: usize = 2;

/// Generates pronounceable passwords from a phoneme table.
#[derive(Debug, Clone, Copy)]
pub struct PhonemeGenerator {
    table: &'static [PhonemeUnit],
}

impl Default for PhonemeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the builder stands between two units.
struct Cursor<'a> {
    expect: PhonemeClass,
    prev: Option<&'a PhonemeUnit>,
    /// Next unit opens a syllable.
    first: bool,
}

impl PhonemeGenerator {
    /// Creates a generator over the built-in table.
    pub fn new() -> Self {
        Self { table: &PHONEMES }
    }

    /// Creates a generator over a custom table.
    pub fn with_table(table: &'static [PhonemeUnit]) -> Self {
        Self { table }
    }

    fn pick_unit(
        &self,
        cursor: &Cursor<'_>,
        remaining: usize,
        config: &Configuration,
        rng: &mut dyn RandomSource,
    ) -> Result<&'static PhonemeUnit, GenerateError> {
        let after_vowel = cursor.prev.is_some_and(PhonemeUnit::is_vowel);

        for _ in 0..MAX_ATTEMPTS {
            let unit = &self.table[rng.next(self.table.len())?];
            if unit.class != cursor.expect
                || (cursor.first && unit.no_start)
                || (unit.no_final && unit.text.len() >= remaining)
                || (after_vowel && unit.is_vowel() && unit.is_digraph())
                || (config.avoid_ambiguous && unit.text.bytes().any(charset::is_ambiguous))
            {
                continue;
            }
            return Ok(unit);
        }

        tracing::warn!(table_len = self.table.len(), "Phoneme table exhausted rejection budget");
        Err(GenerateError::RejectionLimit {
            attempts: MAX_ATTEMPTS,
        })
    }

    fn draw_digit(
        config: &Configuration,
        rng: &mut dyn RandomSource,
    ) -> Result<u8, GenerateError> {
        constraints::draw_from(&charset::filtered(DIGITS, config.avoid_ambiguous), rng)
    }
}

impl PasswordGenerator for PhonemeGenerator {
    fn name(&self) -> &'static str {
        "phoneme"
    }

    fn generate(
        &self,
        config: &Configuration,
        rng: &mut dyn RandomSource,
    ) -> Result<String, GenerateError> {
        config.validate()?;

        let size = config.length;
        let mut buf: Vec<u8> = Vec::with_capacity(size);
        let mut owed = Obligations::new(config);
        let mut cursor = Cursor {
            expect: PhonemeClass::coin_flip(rng)?,
            prev: None,
            first: true,
        };

        while buf.len() < size {
            let remaining = size - buf.len();

            // The last slot belongs to an owed digit, whatever it sounds like.
            if remaining == 1 && owed.needs_digit() {
                let digit = Self::draw_digit(config, rng)?;
                buf.push(digit);
                owed.observe(digit);
                break;
            }

            let unit = self.pick_unit(&cursor, remaining, config, rng)?;
            let start = buf.len();
            // An owed digit keeps the last slot for itself.
            let room = remaining - usize::from(owed.needs_digit());
            let take = unit.text.len().min(room);
            buf.extend_from_slice(&unit.text.as_bytes()[..take]);

            let closing = size - buf.len() <= CLOSING_SLOTS;
            if owed.needs_uppercase()
                && (cursor.first || unit.is_consonant())
                && (closing || rng.next(10)? < UPPERCASE_CHANCE)
            {
                let upper = buf[start].to_ascii_uppercase();
                if !(config.avoid_ambiguous && charset::is_ambiguous(upper)) {
                    buf[start] = upper;
                }
            }
            owed.observe_all(&buf[start..]);

            if buf.len() >= size {
                break;
            }

            if owed.needs_digit()
                && (closing || (!cursor.first && rng.next(10)? < DIGIT_CHANCE))
            {
                let digit = Self::draw_digit(config, rng)?;
                buf.push(digit);
                owed.observe(digit);
                cursor = Cursor {
                    expect: PhonemeClass::coin_flip(rng)?,
                    prev: None,
                    first: true,
                };
                continue;
            }

            cursor.expect = match cursor.expect {
                PhonemeClass::Consonant => PhonemeClass::Vowel,
                PhonemeClass::Vowel => {
                    if cursor.prev.is_some_and(PhonemeUnit::is_vowel)
                        || unit.is_digraph()
                        || rng.next(10)? > 3
                    {
                        PhonemeClass::Consonant
                    } else {
                        PhonemeClass::Vowel
                    }
                }
            };
            cursor.prev = Some(unit);
            cursor.first = false;
        }

        if owed.needs_uppercase() {
            let candidates: Vec<usize> = buf
                .iter()
                .enumerate()
                .filter(|&(_, &b)| {
                    CharClass::of(b) == CharClass::Lowercase
                        && !(config.avoid_ambiguous
                            && charset::is_ambiguous(b.to_ascii_uppercase()))
                })
                .map(|(i, _)| i)
                .collect();

            if candidates.is_empty() {
                let uppers = charset::filtered(UPPERCASE, config.avoid_ambiguous);
                constraints::force_class(&mut buf, config, CharClass::Uppercase, &uppers, rng)?;
            } else {
                let position = constraints::pick(&candidates, rng)?;
                buf[position] = buf[position].to_ascii_uppercase();
            }
            tracing::trace!("Uppercase forced after phoneme pass");
        }

        Ok(into_password(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DigestAlgorithm, DigestSource, OsSource};

    fn all_flags(length: usize) -> Configuration {
        Configuration {
            length,
            require_uppercase: true,
            require_digit: true,
            avoid_ambiguous: false,
        }
    }

    #[test]
    fn test_table_shape() {
        for unit in PHONEMES.iter() {
            assert!((1..=3).contains(&unit.text.len()), "{}", unit.text);
            assert!(unit.text.bytes().all(|b| b.is_ascii_lowercase()));
        }
        // Single-letter units of both classes guarantee progress.
        assert!(PHONEMES
            .iter()
            .any(|u| u.is_vowel() && !u.is_digraph() && !u.no_start && !u.no_final));
        assert!(PHONEMES
            .iter()
            .any(|u| u.is_consonant() && !u.is_digraph() && !u.no_start && !u.no_final));
    }

    #[test]
    fn test_exact_length_and_constraints() {
        let mut rng = OsSource::new().unwrap();
        let generator = PhonemeGenerator::new();
        for length in [2, 3, 5, 8, 13, 64] {
            for _ in 0..50 {
                let pw = generator.generate(&all_flags(length), &mut rng).unwrap();
                assert_eq!(pw.len(), length, "{pw}");
                assert!(pw.bytes().any(|b| b.is_ascii_uppercase()), "{pw}");
                assert!(pw.bytes().any(|b| b.is_ascii_digit()), "{pw}");
            }
        }
    }

    #[test]
    fn test_unconstrained_is_lowercase() {
        let mut rng = OsSource::new().unwrap();
        let generator = PhonemeGenerator::new();
        for _ in 0..100 {
            let pw = generator
                .generate(&Configuration::with_length(10), &mut rng)
                .unwrap();
            assert!(pw.bytes().all(|b| b.is_ascii_lowercase()), "{pw}");
        }
    }

    #[test]
    fn test_never_opens_with_no_start_unit() {
        let mut rng = OsSource::new().unwrap();
        let generator = PhonemeGenerator::new();
        for _ in 0..500 {
            let pw = generator
                .generate(&Configuration::with_length(8), &mut rng)
                .unwrap();
            assert!(!pw.starts_with("gh") && !pw.starts_with("ng"), "{pw}");
        }
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let generator = PhonemeGenerator::new();
        let run = || {
            let mut rng = DigestSource::from_bytes(b"phonemes", Some(3), DigestAlgorithm::Sha1);
            (0..10)
                .map(|_| generator.generate(&all_flags(8), &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_avoid_ambiguous() {
        let mut rng = OsSource::new().unwrap();
        let generator = PhonemeGenerator::new();
        let config = Configuration {
            avoid_ambiguous: true,
            ..all_flags(12)
        };
        for _ in 0..100 {
            let pw = generator.generate(&config, &mut rng).unwrap();
            assert!(!pw.bytes().any(charset::is_ambiguous), "{pw}");
            assert!(pw.bytes().any(|b| b.is_ascii_uppercase()), "{pw}");
            assert!(pw.bytes().any(|b| b.is_ascii_digit()), "{pw}");
        }
    }

    #[test]
    fn test_corrupted_table_fails_loudly() {
        static VOWELS_ONLY: [PhonemeUnit; 2] = [PhonemeUnit::vowel("a"), PhonemeUnit::vowel("e")];
        let generator = PhonemeGenerator::with_table(&VOWELS_ONLY);
        let mut rng = OsSource::new().unwrap();

        // Sooner or later a consonant is expected and never found.
        let failed = (0..20).any(|_| {
            matches!(
                generator.generate(&Configuration::with_length(8), &mut rng),
                Err(GenerateError::RejectionLimit { .. })
            )
        });
        assert!(failed);
    }
}
