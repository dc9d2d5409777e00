use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use verificator::embedding::HashingEmbedder;
use verificator::lexical::{levenshtein, lexical_score};
use verificator::normalize::normalize;

const REFERENCE: &str = "Mitosis is cell division producing two identical daughter cells.";
const CANDIDATE: &str = "Mitosis is when a cell divides into two daughter cells.";

fn long_text(words: usize) -> String {
    (0..words)
        .map(|i| format!("token{}", i % 97))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_normalize(c: &mut Criterion) {
    let long = long_text(500);
    let mut group = c.benchmark_group("normalize");

    group.bench_function("sentence", |b| b.iter(|| normalize(black_box(CANDIDATE))));
    group.bench_function("500_words", |b| b.iter(|| normalize(black_box(&long))));

    group.finish();
}

fn bench_lexical_score(c: &mut Criterion) {
    let reference = normalize(REFERENCE);
    let candidate = normalize(CANDIDATE);
    let long_reference = normalize(&long_text(500));
    let long_candidate = normalize(&long_text(450));

    let mut group = c.benchmark_group("lexical_score");

    group.bench_function("sentence", |b| {
        b.iter(|| lexical_score(black_box(&reference), black_box(&candidate)))
    });
    group.bench_function("500_words", |b| {
        b.iter(|| lexical_score(black_box(&long_reference), black_box(&long_candidate)))
    });

    group.finish();
}

fn bench_levenshtein(c: &mut Criterion) {
    let a: Vec<u32> = (0..256).collect();
    let b: Vec<u32> = (0..256).rev().collect();

    c.bench_function("levenshtein_256", |bench| {
        bench.iter(|| levenshtein(black_box(&a), black_box(&b)))
    });
}

fn bench_hashing_embedder(c: &mut Criterion) {
    let embedder = HashingEmbedder::default();

    c.bench_function("hashing_embed_sentence", |b| {
        b.iter(|| embedder.embed_sync(black_box(REFERENCE)))
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_lexical_score,
    bench_levenshtein,
    bench_hashing_embedder
);
criterion_main!(benches);
