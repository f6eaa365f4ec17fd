use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fzr_core::{CandidateStore, Limits};

const DIRS: &[&str] = &[
    "src", "src/engine", "src/ui", "tests", "docs", "benches", "crates/core", "crates/cli",
];
const STEMS: &[&str] = &[
    "main", "lib", "score", "store", "rank", "walk", "error", "types", "config", "handler",
    "service", "router", "model", "view", "component",
];

fn generate_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let dir = DIRS[i % DIRS.len()];
            let stem = STEMS[(i / DIRS.len()) % STEMS.len()];
            format!("{dir}/{stem}_{i}.rs")
        })
        .collect()
}

fn bench_rerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rerank");

    for &count in &[1_000usize, 10_000, 100_000] {
        let names = generate_names(count);

        group.bench_with_input(BenchmarkId::new("cold_query", count), &names, |b, names| {
            let mut store = CandidateStore::new(Limits::default()).unwrap();
            store.load(names).unwrap();
            b.iter(|| {
                // erase back to empty first so nothing is cache-skipped
                store.rerank("").unwrap();
                store.rerank(black_box("score")).unwrap();
                black_box(store.shortlist_len())
            });
        });

        group.bench_with_input(
            BenchmarkId::new("typed_incrementally", count),
            &names,
            |b, names| {
                let mut store = CandidateStore::new(Limits::default()).unwrap();
                store.load(names).unwrap();
                b.iter(|| {
                    store.rerank("").unwrap();
                    for len in 1..="score".len() {
                        store.rerank(black_box(&"score"[..len])).unwrap();
                    }
                    black_box(store.shortlist_len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rerank);
criterion_main!(benches);
