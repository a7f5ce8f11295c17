//! Procedural building interiors.
//!
//! Given a building's exterior (a seed and one or more axis-aligned parts),
//! this crate generates its interior: rooms separated by walls with
//! doorways, hallway office layouts, stairwells and elevator shafts, and
//! per-story floor and ceiling slabs. Everything is plain data in and plain
//! data out; generation is deterministic per building seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`building`] | Building exterior: parts, story counts, window layout |
//! | [`circulation`] | Stairwell and elevator placement |
//! | [`collision`] | Sphere collision against walls and floors |
//! | [`config`] | Generation constants and derived lengths |
//! | [`connectivity`] | Extra doorways in long walls |
//! | [`error`] | Error type for generation failures |
//! | [`generator`] | Per-building pipeline and parallel batch entry point |
//! | [`geometry`] | Axis-aligned boxes and rectangle subtraction |
//! | [`hallway`] | Central hallway office layouts |
//! | [`interior`] | Interior data model (rooms, walls, slabs, lights) |
//! | [`lighting`] | Ceiling lights and per-story lit state |
//! | [`partition`] | Recursive space partitioning into rooms |
//! | [`slabs`] | Floor and ceiling slabs with cutouts |
//! | [`stitch`] | Separator walls between adjacent parts |
//! | [`validate`] | Structural validation (tiling, doors, connectivity, slabs) |

pub mod building;
pub mod circulation;
pub mod collision;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod hallway;
pub mod interior;
pub mod lighting;
pub mod partition;
pub mod slabs;
pub mod stitch;
pub mod validate;
