//! Comparative benchmarks against `Vec` and `smallvec` for the workloads the
//! inline buffer is meant to win: short-lived collections that usually stay
//! under the inline capacity.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use smallvec::SmallVec;
use spillvec::SpillVec;

const INLINE: usize = 16;

fn data(len: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..len).map(|_| rng.random()).collect()
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    // 12 stays inline, 100 forces the spill.
    for len in [12usize, 100] {
        let input = data(len);

        group.bench_with_input(BenchmarkId::new("spillvec", len), &input, |b, input| {
            b.iter(|| {
                let mut vec: SpillVec<u64, INLINE> = SpillVec::new();
                for &x in input {
                    vec.push(x);
                }
                black_box(vec.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("smallvec", len), &input, |b, input| {
            b.iter(|| {
                let mut vec: SmallVec<[u64; INLINE]> = SmallVec::new();
                for &x in input {
                    vec.push(x);
                }
                black_box(vec.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("std_vec", len), &input, |b, input| {
            b.iter(|| {
                let mut vec: Vec<u64> = Vec::new();
                for &x in input {
                    vec.push(x);
                }
                black_box(vec.len())
            })
        });
    }
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate_sum");
    for len in [12usize, 100] {
        let input = data(len);

        let vec: SpillVec<u64, INLINE> = input.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("spillvec", len), &vec, |b, vec| {
            b.iter(|| black_box(vec.iter().copied().fold(0u64, u64::wrapping_add)))
        });

        let vec: SmallVec<[u64; INLINE]> = input.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("smallvec", len), &vec, |b, vec| {
            b.iter(|| black_box(vec.iter().copied().fold(0u64, u64::wrapping_add)))
        });

        let vec: Vec<u64> = input.clone();
        group.bench_with_input(BenchmarkId::new("std_vec", len), &vec, |b, vec| {
            b.iter(|| black_box(vec.iter().copied().fold(0u64, u64::wrapping_add)))
        });
    }
    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    let input = data(12);

    group.bench_with_input(BenchmarkId::new("spillvec", 12), &input, |b, input| {
        b.iter(|| {
            let mut vec: SpillVec<u64, INLINE> = SpillVec::new();
            for &x in input {
                vec.insert(0, x);
            }
            black_box(vec.len())
        })
    });

    group.bench_with_input(BenchmarkId::new("std_vec", 12), &input, |b, input| {
        b.iter(|| {
            let mut vec: Vec<u64> = Vec::new();
            for &x in input {
                vec.insert(0, x);
            }
            black_box(vec.len())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_push, bench_iterate, bench_insert_front);
criterion_main!(benches);
