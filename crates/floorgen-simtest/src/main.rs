//! Floorgen Headless Generation Harness
//!
//! Generates interiors for a set of sample buildings over a range of seeds
//! and runs every structural validation on them.
//! Runs entirely in-process, with no renderer or engine.
//!
//! Usage:
//!   cargo run -p floorgen-simtest
//!   cargo run -p floorgen-simtest -- --verbose
//!   cargo run -p floorgen-simtest -- --seed 100 --count 50
//!   cargo run -p floorgen-simtest -- --config tuned.json --dump interiors.json

use floorgen_logic::building::{parts_from_bounds, Building, BuildingKind, Part, UniformWindows};
use floorgen_logic::config::{validate_config, InteriorConfig};
use floorgen_logic::generator::{generate_interior, generate_interiors};
use floorgen_logic::geometry::Cube;
use floorgen_logic::interior::Interior;
use floorgen_logic::validate::{validate_interior, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Sample buildings ────────────────────────────────────────────────────
const SAMPLES_JSON: &str = include_str!("../../../data/sample_buildings.json");

#[derive(Debug, Deserialize)]
struct SampleSpec {
    name: String,
    kind: BuildingKind,
    window_pitch: f32,
    /// `[x1, x2, y1, y2, z1, z2]` per part.
    parts: Vec<[f32; 6]>,
}

impl SampleSpec {
    fn building(&self, seed: u64, config: &InteriorConfig) -> Result<Building, String> {
        let bounds: Vec<Cube> = self
            .parts
            .iter()
            .map(|p| Cube::new(p[0], p[1], p[2], p[3], p[4], p[5]))
            .collect();
        let parts = parts_from_bounds(&bounds, config).map_err(|e| e.to_string())?;
        Ok(Building {
            seed,
            kind: self.kind,
            parts,
            windows: UniformWindows::with_pitch(self.window_pitch),
        })
    }
}

#[derive(Serialize)]
struct DumpEntry<'a> {
    name: &'a str,
    seed: u64,
    interior: &'a Interior,
}

// ── Command line ────────────────────────────────────────────────────────

struct Options {
    verbose: bool,
    seed: u64,
    count: u64,
    config_path: Option<String>,
    dump_path: Option<String>,
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_options() -> Options {
    let args: Vec<String> = std::env::args().collect();
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seed: arg_value(&args, "--seed")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1),
        count: arg_value(&args, "--count")
            .and_then(|v| v.parse().ok())
            .unwrap_or(20),
        config_path: arg_value(&args, "--config"),
        dump_path: arg_value(&args, "--dump"),
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let opts = parse_options();
    println!("=== Floorgen Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    let config = load_config(&opts, &mut results).unwrap_or_default();

    // 2. Sample building manifest
    let samples = validate_samples(&config, &mut results);

    // 3. Structural validation sweep
    results.extend(validate_sweep(&samples, &config, &opts));

    // 4. Determinism
    results.extend(validate_determinism(&samples, &config, &opts));

    // 5. Reference tower
    results.extend(validate_reference_tower(&config, opts.verbose));

    if let Some(path) = &opts.dump_path {
        results.push(dump_interiors(path, &samples, &config, opts.seed));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn load_config(opts: &Options, results: &mut Vec<TestResult>) -> Option<InteriorConfig> {
    println!("--- Configuration ---");

    let config = match &opts.config_path {
        None => InteriorConfig::default(),
        Some(path) => {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str::<InteriorConfig>(&s).map_err(|e| e.to_string()));
            match parsed {
                Ok(c) => c,
                Err(e) => {
                    results.push(TestResult {
                        name: "config_load".into(),
                        passed: false,
                        detail: format!("{}: {}", path, e),
                    });
                    return None;
                }
            }
        }
    };

    let errors = validate_config(&config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!(
                "spacing {} doorway {} wall {} min wall {}",
                config.floor_spacing,
                config.doorway_width(),
                config.wall_thick(),
                config.min_wall_len()
            )
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    errors.is_empty().then_some(config)
}

// ── 2. Sample Buildings ─────────────────────────────────────────────────

fn validate_samples(config: &InteriorConfig, results: &mut Vec<TestResult>) -> Vec<SampleSpec> {
    println!("--- Sample Buildings ---");

    let samples: Vec<SampleSpec> = match serde_json::from_str(SAMPLES_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "samples_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return Vec::new();
        }
    };

    results.push(TestResult {
        name: "samples_not_empty".into(),
        passed: !samples.is_empty(),
        detail: format!("{} sample buildings loaded", samples.len()),
    });

    let bad: Vec<String> = samples
        .iter()
        .filter_map(|s| s.building(0, config).err().map(|e| format!("{}: {}", s.name, e)))
        .collect();
    results.push(TestResult {
        name: "samples_valid_parts".into(),
        passed: bad.is_empty(),
        detail: if bad.is_empty() {
            "all parts hold at least one story".into()
        } else {
            bad.join(", ")
        },
    });

    samples
}

// ── 3. Structural Validation Sweep ──────────────────────────────────────

fn validate_sweep(samples: &[SampleSpec], config: &InteriorConfig, opts: &Options) -> Vec<TestResult> {
    println!("--- Structural Validation ({} seeds) ---", opts.count);
    let mut results = Vec::new();

    for sample in samples {
        let buildings: Vec<Building> = (opts.seed..opts.seed + opts.count)
            .filter_map(|seed| sample.building(seed, config).ok())
            .collect();
        let interiors = generate_interiors(&buildings, config);

        let mut failures = 0;
        let mut errors_by_category: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut warnings = 0;
        let (mut rooms, mut doors, mut stairs, mut elevators) = (0, 0, 0, 0);

        for (b, result) in buildings.iter().zip(&interiors) {
            let interior = match result {
                Ok(i) => i,
                Err(e) => {
                    failures += 1;
                    if opts.verbose {
                        println!("    {} seed {}: {}", sample.name, b.seed, e);
                    }
                    continue;
                }
            };
            rooms += interior.rooms.len();
            doors += interior.doors.len();
            stairs += interior.stairwells.len();
            elevators += interior.elevators.len();

            for err in validate_interior(b, interior, config) {
                match err.severity {
                    Severity::Error => {
                        *errors_by_category.entry(err.category).or_default() += 1;
                        if opts.verbose {
                            println!("    {} seed {}: [{}] {}", sample.name, b.seed, err.category, err.message);
                        }
                    }
                    Severity::Warning => warnings += 1,
                }
            }
        }

        results.push(TestResult {
            name: format!("{}_generates", sample.name),
            passed: failures == 0,
            detail: format!("{}/{} buildings generated", buildings.len() - failures, buildings.len()),
        });

        let total_errors: usize = errors_by_category.values().sum();
        results.push(TestResult {
            name: format!("{}_structure", sample.name),
            passed: total_errors == 0,
            detail: if total_errors == 0 {
                format!("no errors, {} warnings", warnings)
            } else {
                errors_by_category
                    .iter()
                    .map(|(cat, n)| format!("{}={}", cat, n))
                    .collect::<Vec<_>>()
                    .join(" ")
            },
        });

        if opts.verbose {
            let n = buildings.len().max(1) as f32;
            println!(
                "  {:20} avg rooms {:6.1}  doors {:6.1}  stairwells {:4.2}  elevators {:4.2}",
                sample.name,
                rooms as f32 / n,
                doors as f32 / n,
                stairs as f32 / n,
                elevators as f32 / n
            );
        }
    }

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(samples: &[SampleSpec], config: &InteriorConfig, opts: &Options) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let mut mismatches = Vec::new();
    for sample in samples {
        let Ok(b) = sample.building(opts.seed, config) else {
            continue;
        };
        let first = generate_interior(&b, config).ok().and_then(|i| serde_json::to_string(&i).ok());
        let second = generate_interior(&b, config).ok().and_then(|i| serde_json::to_string(&i).ok());
        if first.is_none() || first != second {
            mismatches.push(sample.name.as_str());
        }
    }
    results.push(TestResult {
        name: "same_seed_same_interior".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            format!("{} samples byte-identical across runs", samples.len())
        } else {
            format!("differs: {}", mismatches.join(", "))
        },
    });

    let buildings: Vec<Building> = samples
        .iter()
        .filter_map(|s| s.building(opts.seed, config).ok())
        .collect();
    let batch = generate_interiors(&buildings, config);
    let in_order = buildings
        .iter()
        .zip(&batch)
        .all(|(b, r)| r.as_ref().ok() == generate_interior(b, config).ok().as_ref());
    results.push(TestResult {
        name: "batch_matches_sequential".into(),
        passed: in_order && batch.len() == buildings.len(),
        detail: format!("{} buildings, input order preserved", buildings.len()),
    });

    results
}

// ── 5. Reference Tower ──────────────────────────────────────────────────

fn validate_reference_tower(config: &InteriorConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Tower (20×14×30) ---");
    let mut results = Vec::new();

    let bounds = Cube::new(0.0, 20.0, 0.0, 14.0, 0.0, 30.0);
    let building = match Part::from_bounds(bounds, config) {
        Ok(part) => Building {
            seed: 42,
            kind: BuildingKind::Other,
            parts: vec![part],
            windows: UniformWindows::with_pitch(4.0),
        },
        Err(e) => {
            results.push(TestResult {
                name: "tower_parts".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    let interior = match generate_interior(&building, config) {
        Ok(i) => i,
        Err(e) => {
            results.push(TestResult {
                name: "tower_generates".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let part = &interior.parts[0];
    let ground_area = interior
        .floors
        .iter()
        .filter(|s| s.level == 0)
        .map(|s| s.bounds.area_xy())
        .sum::<f32>();
    let transitions = interior
        .ceilings
        .iter()
        .map(|s| s.level)
        .collect::<std::collections::BTreeSet<_>>()
        .len();

    results.push(TestResult {
        name: "tower_story_count".into(),
        passed: part.num_floors == 7,
        detail: format!("{} stories", part.num_floors),
    });
    results.push(TestResult {
        name: "tower_ground_floor".into(),
        passed: (ground_area - bounds.area_xy()).abs() < 1e-3,
        detail: format!("ground slab area {:.1}", ground_area),
    });
    results.push(TestResult {
        name: "tower_transitions".into(),
        passed: transitions == 6 && part.floors.len() == part.ceilings.len() + 1,
        detail: format!(
            "{} transitions, {} floor pieces, {} ceiling pieces",
            transitions,
            part.floors.len(),
            part.ceilings.len()
        ),
    });
    results.push(TestResult {
        name: "tower_roof".into(),
        passed: interior.roof_ceilings.len() == 1,
        detail: format!("{} roof ceilings", interior.roof_ceilings.len()),
    });
    results.push(TestResult {
        name: "tower_stairwell".into(),
        passed: interior.stairwells.len() == 1
            && interior.landings.iter().filter(|l| !l.for_elevator).count() == 6,
        detail: format!(
            "{} stairwells, {} landings, {} steps",
            interior.stairwells.len(),
            interior.landings.len(),
            interior.stair_steps.len()
        ),
    });

    if verbose {
        println!("  Rooms:");
        for (i, r) in interior.rooms.iter().enumerate() {
            println!(
                "    #{:2} {:5.1}×{:5.1} at ({:5.1}, {:5.1}) stairs={} light={:.2}",
                i,
                r.bounds.dx(),
                r.bounds.dy(),
                r.bounds.min[0],
                r.bounds.min[1],
                r.has_stairs,
                r.light_amount()
            );
        }
    }

    results
}

// ── Dump ────────────────────────────────────────────────────────────────

fn dump_interiors(path: &str, samples: &[SampleSpec], config: &InteriorConfig, seed: u64) -> TestResult {
    let generated: Vec<(&str, Interior)> = samples
        .iter()
        .filter_map(|s| {
            let b = s.building(seed, config).ok()?;
            let interior = generate_interior(&b, config).ok()?;
            Some((s.name.as_str(), interior))
        })
        .collect();
    let entries: Vec<DumpEntry> = generated
        .iter()
        .map(|(name, interior)| DumpEntry {
            name: *name,
            seed,
            interior,
        })
        .collect();

    let written = serde_json::to_string_pretty(&entries)
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
    TestResult {
        name: "dump_interiors".into(),
        passed: written.is_ok(),
        detail: match written {
            Ok(()) => format!("{} interiors written to {}", entries.len(), path),
            Err(e) => format!("{}: {}", path, e),
        },
    }
}
