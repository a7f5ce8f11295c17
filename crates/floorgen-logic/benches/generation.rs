//! Criterion benchmarks for interior generation.
//!
//! Benchmarks:
//!   - single 7-story partitioned tower
//!   - single hallway office block
//!   - batch of 64 mixed buildings
//!
//! Run with: cargo bench -p floorgen-logic --bench generation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use floorgen_logic::building::{Building, BuildingKind, Part, UniformWindows};
use floorgen_logic::config::InteriorConfig;
use floorgen_logic::generator::{generate_interior, generate_interiors};
use floorgen_logic::geometry::Cube;

fn building(seed: u64, kind: BuildingKind, parts: &[Cube], config: &InteriorConfig) -> Building {
    Building {
        seed,
        kind,
        parts: parts
            .iter()
            .map(|c| Part::from_bounds(*c, config).unwrap())
            .collect(),
        windows: UniformWindows::with_pitch(4.0),
    }
}

// ---------------------------------------------------------------------------
// Benchmark: single buildings
// ---------------------------------------------------------------------------

fn bench_single(c: &mut Criterion) {
    let config = InteriorConfig::default();
    let mut group = c.benchmark_group("generate_interior");

    let tower = building(42, BuildingKind::Other, &[Cube::new(0.0, 20.0, 0.0, 14.0, 0.0, 30.0)], &config);
    group.bench_function("tower_20x14x30", |b| {
        b.iter(|| black_box(generate_interior(black_box(&tower), &config)))
    });

    let office = building(7, BuildingKind::Other, &[Cube::new(0.0, 48.0, 0.0, 36.0, 0.0, 40.4)], &config);
    group.bench_function("hallway_office_48x36", |b| {
        b.iter(|| black_box(generate_interior(black_box(&office), &config)))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: batch
// ---------------------------------------------------------------------------

fn bench_batch(c: &mut Criterion) {
    let config = InteriorConfig::default();
    let buildings: Vec<Building> = (0..64)
        .map(|seed| match seed % 3 {
            0 => building(seed, BuildingKind::Other, &[Cube::new(0.0, 20.0, 0.0, 14.0, 0.0, 30.0)], &config),
            1 => building(
                seed,
                BuildingKind::Other,
                &[
                    Cube::new(0.0, 30.0, 0.0, 12.0, 0.0, 16.4),
                    Cube::new(0.0, 12.0, 12.0, 30.0, 0.0, 16.4),
                ],
                &config,
            ),
            _ => building(
                seed,
                BuildingKind::House,
                &[
                    Cube::new(0.0, 14.0, 0.0, 12.0, 0.0, 8.4),
                    Cube::new(14.0, 24.0, 0.0, 10.0, 0.0, 4.4),
                ],
                &config,
            ),
        })
        .collect();

    let mut group = c.benchmark_group("generate_interiors");
    group.sample_size(20);
    group.bench_function("mixed_64", |b| {
        b.iter(|| black_box(generate_interiors(black_box(&buildings), &config)))
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Register groups
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
