//! Benchmarks for cached distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geodist::{DistanceEngine, DistanceUnit, EarthModel, GeoPoint};

fn create_test_pairs(count: usize) -> Vec<(GeoPoint, GeoPoint)> {
    let origin = GeoPoint::new(52.5200, 13.4050).expect("valid origin");
    (0..count)
        .map(|i| {
            // Generate points in a grid around Berlin
            let lat = 52.0 + (i as f64 * 0.01) % 2.0;
            let lng = 13.0 + (i as f64 * 0.01) % 2.0;
            (origin, GeoPoint::new(lat, lng).expect("valid grid point"))
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let berlin = GeoPoint::new(52.5200, 13.4050).expect("valid point");
    let paris = GeoPoint::new(48.8566, 2.3522).expect("valid point");
    let mut group = c.benchmark_group("single_distance");

    let warm = DistanceEngine::new();
    group.bench_function("warm_cache", |b| {
        b.iter(|| {
            warm.distance(
                black_box(&berlin),
                black_box(&paris),
                DistanceUnit::Kilometers,
                EarthModel::Wgs84,
            )
        })
    });

    let cold = DistanceEngine::new();
    group.bench_function("cold_cache", |b| {
        b.iter(|| {
            cold.clear_cache();
            cold.distance(
                black_box(&berlin),
                black_box(&paris),
                DistanceUnit::Kilometers,
                EarthModel::Wgs84,
            )
        })
    });

    group.finish();
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let engine = DistanceEngine::new();

    for size in [10, 100, 1000, 10000].iter() {
        let pairs = create_test_pairs(*size);

        group.bench_with_input(BenchmarkId::new("batch", size), size, |b, _| {
            b.iter(|| {
                engine.batch_distance(black_box(&pairs), DistanceUnit::Kilometers, EarthModel::Wgs84)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_batch_distances);
criterion_main!(benches);
