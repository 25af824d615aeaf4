use citadel_workforce::city::{
    City, Ruleset, Settlement, StructureState, Tile, TileMap, TileYield,
};
use citadel_workforce::core::{CivId, GameConfig, TilePosition};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PLAYER: CivId = CivId(1);

fn build_city(seed: u64) -> City {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let center = TilePosition::new(0, 0);
    let mut tiles = TileMap::new();
    for position in center.tiles_in_range(3) {
        let yields = TileYield::new(
            rng.gen_range(0..=3) as f32,
            rng.gen_range(0..=2) as f32,
            rng.gen_range(0..=2) as f32,
            0.0,
        );
        tiles.insert(Tile::new(position, yields).with_owner(PLAYER));
    }

    let mut settlement = Settlement::new(
        "Benchmark",
        PLAYER,
        center,
        tiles,
        Ruleset::with_defaults(),
        GameConfig::new(),
    );
    for name in ["Library", "University", "Market", "Workshop"] {
        settlement.add_structure(name, StructureState::Complete);
    }
    City::found(settlement).unwrap()
}

fn bench_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("turns");

    for turns in [10u32, 50, 200] {
        group.bench_with_input(BenchmarkId::new("settlement", turns), &turns, |b, &turns| {
            b.iter_batched(
                || build_city(42),
                |mut city| {
                    for turn in 1..=turns {
                        city.end_turn(turn).unwrap();
                    }
                    city
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_reallocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reallocation");

    for population in [5u32, 20, 40] {
        group.bench_with_input(
            BenchmarkId::new("grow_and_shrink", population),
            &population,
            |b, &population| {
                b.iter_batched(
                    || build_city(7),
                    |mut city| {
                        city.population
                            .set_population(&mut city.settlement, population)
                            .unwrap();
                        city.population
                            .set_population(&mut city.settlement, 1)
                            .unwrap();
                        city
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(turn_benches, bench_turns, bench_reallocation);
criterion_main!(turn_benches);
