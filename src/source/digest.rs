//! Digest-seeded deterministic source.
//!
//! The "not so random" mode: a file's bytes, optionally followed by the
//! decimal text of a numeric seed, are hashed into an initial block. Draws
//! consume bytes from the block; when a draw needs more bytes than remain,
//! the block is replaced by the digest of itself and the cursor restarts at
//! zero. Values are reduced modulo the bound, so small bounds that do not
//! divide 256 carry a slight bias. That is accepted in exchange for exact
//! reproducibility across runs.

use super::{check_bound, RandomSource, SourceError};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Supported digests for the seeded source.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-1, 20-byte blocks. The classic choice.
    #[default]
    Sha1,
    /// SHA-256, 32-byte blocks.
    Sha256,
    /// BLAKE3, 32-byte blocks.
    Blake3,
}

impl DigestAlgorithm {
    /// Size in bytes of one stream block.
    pub fn block_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Blake3 => 32,
        }
    }

    fn hasher(self) -> StreamHasher {
        match self {
            DigestAlgorithm::Sha1 => StreamHasher::Sha1(Sha1::new()),
            DigestAlgorithm::Sha256 => StreamHasher::Sha256(Sha256::new()),
            DigestAlgorithm::Blake3 => StreamHasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Sha1 => f.write_str("sha1"),
            DigestAlgorithm::Sha256 => f.write_str("sha256"),
            DigestAlgorithm::Blake3 => f.write_str("blake3"),
        }
    }
}

enum StreamHasher {
    Sha1(Sha1),
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl StreamHasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            StreamHasher::Sha1(h) => h.update(data),
            StreamHasher::Sha256(h) => h.update(data),
            StreamHasher::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            StreamHasher::Sha1(h) => h.finalize().to_vec(),
            StreamHasher::Sha256(h) => h.finalize().to_vec(),
            StreamHasher::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

/// Deterministic source derived from a file digest.
pub struct DigestSource {
    algorithm: DigestAlgorithm,
    block: Vec<u8>,
    cursor: usize,
    /// Number of times the block has been re-hashed.
    extensions: u64,
}

impl DigestSource {
    /// Hashes the full content of `path`, then the seed (if any).
    ///
    /// Fails with [`SourceError::SourceUnreadable`] if the file cannot be
    /// opened or read.
    pub fn from_file(
        path: impl AsRef<Path>,
        seed: Option<u64>,
        algorithm: DigestAlgorithm,
    ) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let unreadable = |source| SourceError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = BufReader::new(File::open(path).map_err(unreadable)?);
        let mut hasher = algorithm.hasher();
        let mut buf = [0u8; 8192];
        let mut total = 0usize;
        loop {
            let n = reader.read(&mut buf).map_err(unreadable)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            total += n;
        }

        tracing::debug!(
            path = %path.display(),
            bytes = total,
            seeded = seed.is_some(),
            algorithm = %algorithm,
            "Digest source opened"
        );

        Ok(Self::finish(hasher, seed, algorithm))
    }

    /// Builds a source from in-memory content instead of a file.
    pub fn from_bytes(content: &[u8], seed: Option<u64>, algorithm: DigestAlgorithm) -> Self {
        let mut hasher = algorithm.hasher();
        hasher.update(content);
        Self::finish(hasher, seed, algorithm)
    }

    fn finish(mut hasher: StreamHasher, seed: Option<u64>, algorithm: DigestAlgorithm) -> Self {
        if let Some(seed) = seed {
            hasher.update(seed.to_string().as_bytes());
        }

        Self {
            algorithm,
            block: hasher.finalize(),
            cursor: 0,
            extensions: 0,
        }
    }

    /// Returns the digest algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Returns how many times the stream has been extended.
    pub fn extensions(&self) -> u64 {
        self.extensions
    }

    /// Takes `n` bytes from the stream, re-hashing the block when it
    /// cannot serve them. Leftover bytes of the old block are discarded.
    fn take(&mut self, n: usize) -> &[u8] {
        if self.cursor + n > self.block.len() {
            self.block = self.algorithm.digest(&self.block);
            self.cursor = 0;
            self.extensions += 1;
            tracing::trace!(extensions = self.extensions, "Digest stream extended");
        }

        let start = self.cursor;
        self.cursor += n;
        &self.block[start..self.cursor]
    }
}

/// Bytes consumed by one draw against `bound`.
fn draw_width(bound: u32) -> usize {
    match bound {
        0..=0x100 => 1,
        0x101..=0x1_0000 => 2,
        _ => 4,
    }
}

impl RandomSource for DigestSource {
    fn next(&mut self, max: usize) -> Result<usize, SourceError> {
        let bound = check_bound(max)?;
        let value = self
            .take(draw_width(bound))
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        Ok((value % u64::from(bound)) as usize)
    }
}

impl std::fmt::Debug for DigestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestSource")
            .field("algorithm", &self.algorithm)
            .field("cursor", &self.cursor)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}
