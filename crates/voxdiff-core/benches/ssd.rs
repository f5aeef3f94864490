//! SSD kernel benchmarks
//!
//! Compares the loop strategies on a volume the size of a short fMRI run,
//! plus the temporary-array formulation the fused kernel replaces.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxdiff_core::{extract_frame, pairwise_ssd, ScoreListBuilder, Strategy, Volume, VolumeShape};

fn synthetic_volume(shape: VolumeShape) -> Volume<i16> {
    let mut state = 0x5eed_u64;
    let voxels = (0..shape.total_voxels())
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 52) as i16) - 2048
        })
        .collect();
    Volume::from_fortran_vec(shape, voxels).unwrap()
}

/// Squared differences materialized into a vector, then summed.
fn ssd_via_temporary(a: &[i16], b: &[i16]) -> i64 {
    let squared: Vec<i64> = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (i64::from(x) - i64::from(y)).pow(2))
        .collect();
    squared.iter().sum()
}

fn bench_pairwise(c: &mut Criterion) {
    let volume = synthetic_volume(VolumeShape::new(64, 64, 34, 2));
    let a = extract_frame(&volume, 0).unwrap();
    let b = extract_frame(&volume, 1).unwrap();

    let mut group = c.benchmark_group("pairwise");
    group.bench_function("fused", |bench| {
        bench.iter(|| pairwise_ssd(black_box(&a), black_box(&b)).unwrap())
    });
    group.bench_function("temporary_array", |bench| {
        bench.iter(|| ssd_via_temporary(black_box(&a), black_box(&b)))
    });
    group.finish();
}

fn bench_score_list(c: &mut Criterion) {
    let volume = synthetic_volume(VolumeShape::new(64, 64, 34, 20));

    let mut group = c.benchmark_group("score_list");
    group.sample_size(20);
    for strategy in Strategy::ALL {
        group.bench_with_input(
            BenchmarkId::new("strategy", strategy.as_str()),
            &strategy,
            |bench, &strategy| {
                bench.iter(|| {
                    ScoreListBuilder::new(&volume)
                        .strategy(strategy)
                        .build()
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pairwise, bench_score_list);

criterion_main!(benches);
