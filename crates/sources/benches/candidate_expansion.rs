//! Benchmarks for snapshot correction and candidate expansion
//!
//! Run with: cargo bench --package sources

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sources::{sample, CandidateExpander, SnapshotCorrector};

fn bench_correct_snapshot(c: &mut Criterion) {
    let raw = sample::reference_record();
    let raw = raw.as_object().expect("reference record is an object").clone();
    let corrector = SnapshotCorrector::new();

    c.bench_function("correct_snapshot", |b| {
        b.iter(|| black_box(corrector.correct(black_box(&raw))))
    });
}

fn bench_expand_candidates(c: &mut Criterion) {
    let raw = sample::reference_record();
    let raw = raw.as_object().expect("reference record is an object").clone();
    let snapshot = SnapshotCorrector::new().correct(&raw);
    let expander = CandidateExpander::default();

    c.bench_function("expand_candidates", |b| {
        b.iter(|| black_box(expander.expand(black_box(snapshot.clone()))))
    });
}

criterion_group!(benches, bench_correct_snapshot, bench_expand_candidates);
criterion_main!(benches);
