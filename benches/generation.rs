//! Benchmarks for password generation.
//!
//! Measures per-password cost of both generators against the deterministic
//! digest source (so runs are comparable) and the OS source.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pwgen::{
    Configuration, DigestAlgorithm, DigestSource, FlatGenerator, OsSource, PasswordGenerator,
    PhonemeGenerator,
};

/// Seed material used consistently across benchmarks.
const BENCH_SEED: &[u8] = b"BenchmarkSeedMaterial2024";

fn constrained(length: usize) -> Configuration {
    Configuration {
        length,
        require_uppercase: true,
        require_digit: true,
        avoid_ambiguous: false,
    }
}

/// Benchmarks both generators across password lengths.
fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let generators: [(&str, &dyn PasswordGenerator); 2] = [
        ("phoneme", &PhonemeGenerator::new()),
        ("flat", &FlatGenerator),
    ];

    for (name, generator) in generators {
        for length in [8usize, 16, 64] {
            let config = constrained(length);
            group.bench_with_input(BenchmarkId::new(name, length), &config, |b, config| {
                let mut rng = DigestSource::from_bytes(BENCH_SEED, Some(1), DigestAlgorithm::Sha1);
                b.iter(|| generator.generate(black_box(config), &mut rng).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmarks raw draws from each source.
fn bench_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_next");

    for algorithm in [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Blake3,
    ] {
        group.bench_function(BenchmarkId::new("digest", algorithm), |b| {
            let mut rng = DigestSource::from_bytes(BENCH_SEED, None, algorithm);
            b.iter(|| pwgen::RandomSource::next(&mut rng, black_box(40)).unwrap());
        });
    }

    group.bench_function("os", |b| {
        let mut rng = OsSource::new().unwrap();
        b.iter(|| pwgen::RandomSource::next(&mut rng, black_box(40)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_generators, bench_sources);
criterion_main!(benches);
