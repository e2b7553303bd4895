//! Benchmarks for board generation and selection throughput.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tile_games::core::{GameRng, ImageCatalog};
use tile_games::memotest::MemotestEngine;
use tile_games::puzzle::PuzzleEngine;

fn bench_generation(c: &mut Criterion) {
    let catalog = ImageCatalog::stock();

    c.bench_function("puzzle_generate_4x4", |b| {
        b.iter(|| {
            let mut engine = PuzzleEngine::new(4, &catalog, GameRng::new(42)).unwrap();
            black_box(engine.presentation())
        })
    });

    c.bench_function("memotest_generate_4x4", |b| {
        b.iter(|| {
            let mut engine = MemotestEngine::new(4, &catalog, GameRng::new(42)).unwrap();
            black_box(engine.presentation())
        })
    });
}

fn bench_selection(c: &mut Criterion) {
    let catalog = ImageCatalog::stock();

    c.bench_function("puzzle_select_slot", |b| {
        let mut engine = PuzzleEngine::new(4, &catalog, GameRng::new(42)).unwrap();
        let mut slot = 0;

        b.iter(|| {
            slot = (slot + 1) % 16;
            black_box(engine.select_slot(slot, Duration::ZERO).unwrap())
        })
    });

    c.bench_function("memotest_select_and_hide", |b| {
        let mut engine = MemotestEngine::new(4, &catalog, GameRng::new(42)).unwrap();
        let mut slot = 0;

        b.iter(|| {
            slot = (slot + 1) % 16;
            let outcome = engine.select_slot(slot, Duration::ZERO).unwrap();
            engine.tick(Duration::from_secs(2));
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bench_generation, bench_selection);
criterion_main!(benches);
