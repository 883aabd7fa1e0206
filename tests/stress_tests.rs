//! Stress tests for molsift.
//!
//! These tests check statistical and ordering properties over long streams.

use molsift::prelude::*;
use rand::prelude::*;
use std::time::Instant;

#[test]
fn stress_test_reservoir_uniformity() {
    const M: usize = 1000;
    const N: usize = 10;
    const TRIALS: u64 = 10_000;

    let mut hits = vec![0u32; M];
    for trial in 0..TRIALS {
        let mut sampler = ReservoirSampler::with_seed(N, trial);
        for item in 0..M {
            sampler.offer(item).unwrap();
        }
        for &item in sampler.sample() {
            hits[item] += 1;
        }
    }

    // Each item should land in the sample N/M = 1% of the time.
    let expected = TRIALS as f64 * N as f64 / M as f64;
    let sd = (expected * (1.0 - N as f64 / M as f64)).sqrt();
    for (item, &h) in hits.iter().enumerate() {
        assert!(
            (h as f64 - expected).abs() < 6.0 * sd,
            "item {item} sampled {h} times, expected about {expected}"
        );
    }

    let chi_square: f64 = hits
        .iter()
        .map(|&h| (h as f64 - expected).powi(2) / expected)
        .sum();
    // M - 1 degrees of freedom: mean 999, standard deviation ~45.
    assert!(
        (700.0..1300.0).contains(&chi_square),
        "chi-square {chi_square} outside the plausible band"
    );
}

#[test]
fn stress_test_reservoir_early_and_late_items_equally_likely() {
    const M: usize = 200;
    const N: usize = 5;
    const TRIALS: u64 = 20_000;

    let mut first_half = 0u64;
    let mut second_half = 0u64;
    for trial in 0..TRIALS {
        let mut sampler = ReservoirSampler::with_seed(N, trial ^ 0x5eed);
        for item in 0..M {
            sampler.offer(item).unwrap();
        }
        for &item in sampler.sample() {
            if item < M / 2 {
                first_half += 1;
            } else {
                second_half += 1;
            }
        }
    }

    let total = (first_half + second_half) as f64;
    let share = first_half as f64 / total;
    assert!((share - 0.5).abs() < 0.02, "first-half share {share}");
}

#[test]
fn stress_test_top_k_long_stream() {
    const L: usize = 200_000;
    const K: usize = 100;

    let mut rng = StdRng::seed_from_u64(7);
    let scores: Vec<f64> = (0..L).map(|_| (rng.gen::<f64>() * 1000.0).round() / 1000.0).collect();

    let start = Instant::now();
    let mut top = TopKSelector::new(K);
    for (i, &s) in scores.iter().enumerate() {
        top.offer(s, i, "c").unwrap();
    }
    let elapsed = start.elapsed();

    // Stable sort of the whole stream gives the expected survivors.
    let mut all: Vec<(f64, usize)> = scores.iter().copied().zip(0..).collect();
    all.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
    all.truncate(K);

    let got: Vec<(f64, usize)> = top.top().iter().map(|c| (c.score, c.item)).collect();
    assert_eq!(got, all);

    println!("Top-{K} over {L} candidates in {elapsed:?}");
}

#[test]
fn stress_test_top_k_partial_results_are_prefix_consistent() {
    // Reading the selector mid-stream reflects exactly the offers so far.
    let mut rng = StdRng::seed_from_u64(19);
    let scores: Vec<f64> = (0..5_000).map(|_| rng.gen_range(0..50) as f64).collect();
    let mut top = TopKSelector::new(20);

    for (i, &s) in scores.iter().enumerate() {
        top.offer(s, i, "c").unwrap();
        if i % 997 == 0 {
            let mut prefix: Vec<(f64, usize)> = scores[..=i].iter().copied().zip(0..).collect();
            prefix.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
            prefix.truncate(20);
            let got: Vec<(f64, usize)> = top.top().iter().map(|c| (c.score, c.item)).collect();
            assert_eq!(got, prefix, "after {} offers", i + 1);
        }
    }
}
