//! Benchmarks for galaxy generation and per-frame animation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use galaxy::{generate_with, FieldLifecycle, GalaxyController, GalaxyParams, HeadlessScene};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for count in [1_000u32, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("count", count), &count, |b, &count| {
            let params = GalaxyParams {
                count,
                spin: 1.0,
                ..Default::default()
            };
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(generate_with(&params, &mut rng)))
        });
    }

    group.finish();
}

fn bench_regenerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");

    group.bench_function("regenerate_100k", |b| {
        let params = GalaxyParams {
            count: 100_000,
            ..Default::default()
        };
        let mut scene = HeadlessScene::new();
        let mut lifecycle = FieldLifecycle::new();
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| {
            lifecycle
                .regenerate_with(&params, &mut scene, &mut rng)
                .map(|d| d.drawable())
        })
    });

    group.finish();
}

fn bench_wave(c: &mut Criterion) {
    let mut group = c.benchmark_group("animate");

    group.bench_function("wave_100k", |b| {
        let params = GalaxyParams {
            count: 100_000,
            waviness: true,
            rotation: 0.5,
            ..Default::default()
        };
        let mut scene = HeadlessScene::new();
        let mut controller = GalaxyController::seeded(params, 3);
        if controller.start(&mut scene).is_err() {
            return;
        }
        let mut elapsed = 0.0f32;
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            black_box(controller.update(elapsed, &mut scene))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_regenerate, bench_wave);
criterion_main!(benches);
