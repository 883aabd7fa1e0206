//! Benchmarks for molsift selection and sampling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use molsift::prelude::*;
use rand::prelude::*;

fn generate_scores(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// Append, stable-sort, truncate on every offer.
fn sorted_list_top(scores: &[f64], k: usize) -> Vec<(f64, usize)> {
    let mut list = Vec::with_capacity(k + 1);
    for (i, &s) in scores.iter().enumerate() {
        list.push((s, i));
        list.sort_by(|a: &(f64, usize), b| b.0.total_cmp(&a.0));
        list.truncate(k);
    }
    list
}

fn benchmark_top_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_k");
    let scores = generate_scores(100_000, 42);

    for &k in &[10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("heap", k), &k, |b, &k| {
            b.iter(|| {
                let mut top = TopKSelector::new(k);
                for (i, &s) in scores.iter().enumerate() {
                    top.offer(s, i, "").unwrap();
                }
                black_box(top.into_sorted_vec())
            })
        });
    }

    // The list strategy is quadratic in k; keep it to small k.
    for &k in &[10, 100] {
        group.bench_with_input(BenchmarkId::new("sorted_list", k), &k, |b, &k| {
            b.iter(|| black_box(sorted_list_top(&scores, k)))
        });
    }

    group.finish();
}

fn benchmark_reservoir(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservoir");

    for &n in &[10, 1000] {
        group.bench_with_input(BenchmarkId::new("offer_100k", n), &n, |b, &n| {
            b.iter(|| {
                let mut sampler = ReservoirSampler::with_seed(n, 7);
                for i in 0..100_000u64 {
                    sampler.offer(i).unwrap();
                }
                black_box(sampler.into_sample())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_top_k, benchmark_reservoir);
criterion_main!(benches);
