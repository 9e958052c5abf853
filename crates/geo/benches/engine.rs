//! Benchmarks for extraction and geometry.

use aerocoord_geo::{
    analyze_batch, enclosing_circle_with_rng, extract, order_polygon, Coordinate, Document, Engine,
    EngineConfig, CircleConfig,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A NOTAM-like body with `count` coordinates in mixed notations.
fn create_notam(count: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = String::from("A) EKDK B) 2403010800 C) 2403311600\nE) AREA BOUNDED BY ");
    for i in 0..count {
        let (lat_d, lat_m, lat_s) = (rng.gen_range(0..90), rng.gen_range(0..60), rng.gen_range(0..60));
        let (lon_d, lon_m, lon_s) = (rng.gen_range(0..180), rng.gen_range(0..60), rng.gen_range(0..60));
        let token = match i % 3 {
            0 => format!("{:02}{:02}{:02}N{:03}{:02}{:02}E", lat_d, lat_m, lat_s, lon_d, lon_m, lon_s),
            1 => format!("{:02} {:02} {:02}.5N {:03} {:02} {:02}.5E", lat_d, lat_m, lat_s, lon_d, lon_m, lon_s),
            _ => format!("N{:02}{:02}{:02}E{:03}{:02}{:02}", lat_d, lat_m, lat_s, lon_d, lon_m, lon_s),
        };
        text.push_str(&token);
        text.push_str(" - ");
    }
    text.push_str("\nSFC-FL195");
    text
}

fn create_points(count: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Coordinate::new(rng.gen_range(54.0..58.0), rng.gen_range(8.0..15.0)))
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for size in [5, 50, 500].iter() {
        let text = create_notam(*size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| extract(black_box(&text)))
        });
    }

    group.finish();
}

fn bench_order(c: &mut Criterion) {
    let tokens = extract(&create_notam(200, 7)).canonical();
    c.bench_function("order_polygon_200", |b| b.iter(|| order_polygon(black_box(&tokens))));
}

fn bench_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("enclosing_circle");

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_points(*size, 3);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| enclosing_circle_with_rng(black_box(&points), &mut rng))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig {
        circle: CircleConfig { seed: Some(1) },
        ..EngineConfig::default()
    });
    let docs: Vec<Document> = (0..64)
        .map(|i| Document::new(format!("doc-{}", i), create_notam(20, i)))
        .collect();

    c.bench_function("analyze_batch_64", |b| {
        b.iter(|| analyze_batch(black_box(&engine), black_box(&docs)))
    });
}

criterion_group!(benches, bench_extract, bench_order, bench_circle, bench_batch);
criterion_main!(benches);
