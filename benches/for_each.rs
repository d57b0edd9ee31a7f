//! Traversal Benchmarks
//!
//! Compares a plain indexed loop against `for_each` / `for_each_mut` for a read-only
//! reduction and an in-place scale, across sizes that sit in different cache levels.
//!
//! # Benchmark Categories
//!
//! ## 1. **Sum (read-only)**
//! - Naive iterator fold (baseline)
//! - `for_each` with the native window
//!
//! ## 2. **Scale (read-modify-write)**
//! - Naive indexed loop (baseline)
//! - `for_each_mut` with the native window
//! - `for_each_mut` starting one element past an aligned boundary

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdwalk::ops::{Scale, Sum};
use simdwalk::utils::AlignedVec;

// ================================================================================================
// BENCHMARK CONFIGURATION
// ================================================================================================

/// Element counts from L1-resident to memory-bound (f32 = 4 bytes).
const SIZES: &[usize] = &[
    1_023,     // ~4 KiB - L1 cache, ragged tail
    16_384,    // 64 KiB - L1→L2 transition
    262_144,   // 1 MiB - L2 cache
    4_194_304, // 16 MiB - L3 cache
];

/// Reproducible data in [0, 1).
fn generate_data(len: usize) -> AlignedVec<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<f32> = (0..len).map(|_| rng.random::<f32>()).collect();
    // 64 covers every backend's register alignment
    AlignedVec::from_slice(&values, 64).unwrap()
}

// ================================================================================================
// BENCHMARK IMPLEMENTATIONS
// ================================================================================================

fn benchmark_sum(c: &mut Criterion) {
    for &size in SIZES {
        let mut group = c.benchmark_group(format!("Sum_{}", format_size(size)));
        group.throughput(Throughput::Bytes((size * std::mem::size_of::<f32>()) as u64));

        let data = generate_data(size);

        group.bench_with_input(BenchmarkId::new("naive", size), &data[..], |b, data| {
            b.iter(|| black_box(data.iter().fold(0.0f32, |acc, &x| acc + x)))
        });

        group.bench_with_input(BenchmarkId::new("for_each", size), &data[..], |b, data| {
            b.iter(|| black_box(simdwalk::for_each(data, Sum::<f32>::default()).value()))
        });

        group.finish();
    }
}

fn benchmark_scale(c: &mut Criterion) {
    for &size in SIZES {
        let mut group = c.benchmark_group(format!("Scale_{}", format_size(size)));
        group.throughput(Throughput::Bytes(
            (size * std::mem::size_of::<f32>() * 2) as u64, // read + write
        ));

        let mut data = generate_data(size);

        group.bench_function(BenchmarkId::new("naive", size), |b| {
            b.iter(|| {
                for i in 0..data.len() {
                    data[i] *= black_box(1.0001);
                }
            })
        });

        group.bench_function(BenchmarkId::new("for_each_mut", size), |b| {
            b.iter(|| simdwalk::for_each_mut(&mut data[..], Scale::new(black_box(1.0001f32))))
        });

        group.bench_function(BenchmarkId::new("for_each_mut_offset", size), |b| {
            b.iter(|| simdwalk::for_each_mut(&mut data[1..], Scale::new(black_box(1.0001f32))))
        });

        group.finish();
    }
}

// ================================================================================================
// UTILITY FUNCTIONS
// ================================================================================================

/// Formats an f32 element count as a human-readable byte size.
fn format_size(elements: usize) -> String {
    let bytes = elements * std::mem::size_of::<f32>();

    if bytes >= 1_048_576 {
        format!("{:.1}_MiB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}_KiB", bytes as f64 / 1024.0)
    } else {
        format!("{}_B", bytes)
    }
}

// ================================================================================================
// CRITERION INTEGRATION
// ================================================================================================

criterion_group!(benches, benchmark_sum, benchmark_scale);
criterion_main!(benches);
