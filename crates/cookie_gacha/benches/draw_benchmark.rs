//! Benchmark for draw and purchase throughput.
//!
//! Run with: cargo bench --package cookie_gacha --bench draw_benchmark

#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use cookie_gacha::{
    CharacterIdAllocator, DrawRoll, EconomyRules, GameConfig, RarityTable, RewardGenerator,
    Session,
};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn generator(rules: &EconomyRules) -> RewardGenerator {
    RewardGenerator::new(
        Arc::clone(&rules.archetypes),
        rules.rarity.clone(),
        CharacterIdAllocator::new(),
    )
}

fn benchmark_single_draw(c: &mut Criterion) {
    let rules = EconomyRules::default();
    let generator = generator(&rules);
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    c.bench_function("single_draw", |b| {
        b.iter(|| black_box(generator.draw(&mut rng)));
    });
}

fn benchmark_tier_lookup(c: &mut Criterion) {
    let table = RarityTable::default();

    c.bench_function("tier_for_roll", |b| {
        let mut roll = 0u32;
        b.iter(|| {
            roll = (roll + 7) % 10_000;
            black_box(table.tier_for_roll(black_box(roll)))
        });
    });
}

fn benchmark_fixed_roll(c: &mut Criterion) {
    let rules = EconomyRules::default();
    let generator = generator(&rules);
    let roll = DrawRoll {
        rarity_roll: 1234,
        archetype_index: 3,
        power_roll: 500_000,
    };

    c.bench_function("instantiate_fixed_roll", |b| {
        b.iter(|| black_box(generator.instantiate(black_box(roll))));
    });
}

fn benchmark_statistics(c: &mut Criterion) {
    let rules = EconomyRules::default();
    let generator = generator(&rules);

    let mut group = c.benchmark_group("statistics");
    group.sample_size(20);
    group.bench_function("run_statistics_100k", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter(|| black_box(generator.run_statistics(&mut rng, 100_000)));
    });
    group.finish();
}

fn benchmark_session_loop(c: &mut Criterion) {
    let rules = Arc::new(
        GameConfig {
            starting_gems: 0,
            reveal_delay_ms: 0,
            ..GameConfig::default()
        }
        .validate()
        .unwrap(),
    );

    c.bench_function("purchase_then_draw_x10", |b| {
        b.iter_batched(
            || Session::seeded(Arc::clone(&rules), 1),
            |mut session| {
                for _ in 0..10 {
                    black_box(session.purchase(1).unwrap());
                    black_box(session.perform_draw().unwrap());
                }
                black_box(session.drain_events())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_single_draw,
    benchmark_tier_lookup,
    benchmark_fixed_roll,
    benchmark_statistics,
    benchmark_session_loop
);
criterion_main!(benches);
