//! Password Generation Library
//!
//! Generates human-usable passwords under length and character-class
//! constraints, using a pluggable source of randomness.
//!
//! # Architecture
//!
//! ```text
//! config ──► driver ──► generator (phoneme | flat)
//!               │            │
//!               └──► source (os | digest) ◄┘
//! ```
//!
//! # Design Principles
//!
//! - **Constraints first**: a required digit or capital letter is always
//!   present, even where that costs pronounceability
//! - **No hidden state**: generators and sources are passed explicitly,
//!   never selected through globals
//! - **No silent fallback**: a source that cannot be opened aborts the run
//! - **Reproducible when asked**: the digest-seeded source replays the same
//!   passwords for the same file and seed
//!
//! # Example
//!
//! ```no_run
//! use pwgen::{Configuration, Driver, GeneratorKind, SourceSpec};
//!
//! let config = Configuration {
//!     length: 10,
//!     require_uppercase: true,
//!     require_digit: true,
//!     avoid_ambiguous: false,
//! };
//!
//! let mut driver = Driver::from_spec(config, GeneratorKind::Phoneme, &SourceSpec::Os).unwrap();
//! for password in driver.generate_batch(5).unwrap() {
//!     println!("{password}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod generator;
pub mod source;

// Re-export commonly used types at crate root
pub use config::{ConfigError, Configuration, FileConfig};
pub use driver::{Driver, DriverError, GeneratorKind, Layout};
pub use generator::{FlatGenerator, GenerateError, PasswordGenerator, PhonemeGenerator};
pub use source::{DigestAlgorithm, DigestSource, OsSource, RandomSource, SourceError, SourceSpec};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
