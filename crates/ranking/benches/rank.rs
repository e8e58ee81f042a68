//! Benchmarks for similarity ranking
//!
//! Run with: cargo bench --package ranking
//!
//! Uses a synthetic catalog so the benchmark needs no data files.

use catalog::{CandidateTable, SongRecord};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use encoder::{Embedder, HashEmbedder};
use ranking::rank;

const MOODS: [&str; 6] = [
    "calm acoustic evening",
    "energetic dance floor anthem",
    "melancholic rainy piano",
    "aggressive metal workout",
    "nostalgic city pop drive",
    "dreamy ambient soundscape",
];

fn synthetic_table(size: usize, embedder: &HashEmbedder) -> CandidateTable {
    let records = (0..size)
        .map(|i| SongRecord {
            id: i as u32 + 1,
            title: format!("Song {i}"),
            artist: format!("Artist {}", i % 97),
            mood: format!("{} {}", MOODS[i % MOODS.len()], i % 13),
        })
        .collect();
    CandidateTable::build(records, embedder).expect("Failed to build synthetic table")
}

fn bench_rank(c: &mut Criterion) {
    let embedder = HashEmbedder::new();
    let user_vector = embedder
        .embed("Age: 25\nPreferred genres: jazz, city pop\nPreferred languages: Korean")
        .expect("Failed to embed profile");

    for size in [100, 1_000, 10_000] {
        let table = synthetic_table(size, &embedder);
        c.bench_function(&format!("rank_top5_{size}"), |b| {
            b.iter(|| {
                let ranked = rank(black_box(&user_vector), black_box(&table), black_box(5));
                black_box(ranked)
            })
        });
    }
}

fn bench_build_table(c: &mut Criterion) {
    let embedder = HashEmbedder::new();

    c.bench_function("build_table_1000", |b| {
        b.iter(|| black_box(synthetic_table(black_box(1_000), &embedder)))
    });
}

criterion_group!(benches, bench_rank, bench_build_table);
criterion_main!(benches);
