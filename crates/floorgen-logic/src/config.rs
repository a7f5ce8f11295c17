//! Generation constants as an explicit value object.
//!
//! Every stage takes `&InteriorConfig`; nothing reads ambient globals, so
//! separate buildings can be generated on separate threads. All lengths
//! derive from the floor-to-floor spacing.
//!
//! ```
//! use floorgen_logic::config::{validate_config, InteriorConfig};
//!
//! let config = InteriorConfig::default();
//! assert!(validate_config(&config).is_empty());
//! assert_eq!(config.doorway_width(), 2.0);
//! ```

use serde::{Deserialize, Serialize};

/// Tunable constants for interior generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteriorConfig {
    /// Floor-to-floor spacing (same as the window vertical spacing).
    pub floor_spacing: f32,
    /// Floor/ceiling slab thickness as a fraction of `floor_spacing`.
    pub floor_thick_fract: f32,
    /// Doorway width as a fraction of `floor_spacing`.
    pub doorway_width_fract: f32,
    /// Children of a split are split again only when the parent is longer
    /// than `max(wall_split_thresh, 1) * min_wall_len` along the split axis.
    pub wall_split_thresh: f32,
    /// Fraction of the window pitch taken by the window itself.
    pub window_width_fract: f32,
    /// Elevator shaft width as a multiple of the doorway width.
    pub elevator_width_fract: f32,
    /// Sanity cap on stories per part.
    pub max_stories: u32,
    /// Number of steps in one flight of stairs.
    pub num_stair_steps: u32,
}

impl Default for InteriorConfig {
    fn default() -> Self {
        Self {
            floor_spacing: 4.0,
            floor_thick_fract: 0.1,
            doorway_width_fract: 0.5,
            wall_split_thresh: 3.0,
            window_width_fract: 0.5,
            elevator_width_fract: 1.5,
            max_stories: 100,
            num_stair_steps: 12,
        }
    }
}

impl InteriorConfig {
    pub fn floor_thickness(&self) -> f32 {
        self.floor_thick_fract * self.floor_spacing
    }

    /// Half the slab thickness: the part of a slab on each side of a story boundary.
    pub fn fc_thick(&self) -> f32 {
        0.5 * self.floor_thickness()
    }

    pub fn doorway_width(&self) -> f32 {
        self.doorway_width_fract * self.floor_spacing
    }

    pub fn doorway_half_width(&self) -> f32 {
        0.5 * self.doorway_width()
    }

    pub fn wall_thick(&self) -> f32 {
        0.5 * self.floor_thickness()
    }

    pub fn wall_half_thick(&self) -> f32 {
        0.5 * self.wall_thick()
    }

    /// Inset of interior walls from exterior walls (avoids z-fighting).
    pub fn wall_edge_spacing(&self) -> f32 {
        0.05 * self.wall_thick()
    }

    /// Smallest rectangle side that may still receive a wall.
    pub fn min_wall_len(&self) -> f32 {
        4.0 * self.doorway_width()
    }

    pub fn elevator_width(&self) -> f32 {
        self.elevator_width_fract * self.doorway_width()
    }

    /// Fraction of the window pitch on each side of a window that is wall.
    pub fn window_border(&self) -> f32 {
        0.5 * (1.0 - self.window_width_fract)
    }

    /// Size threshold (along the split axis) above which both halves of a
    /// split are pushed back for further splitting.
    pub fn split_recurse_len(&self) -> f32 {
        self.wall_split_thresh.max(1.0) * self.min_wall_len()
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Floor spacing must be positive.
    NonPositiveFloorSpacing(f32),
    /// Slab thickness fraction outside (0, 0.5).
    FloorThicknessOutOfRange(f32),
    /// Doorway fraction outside (0, 1).
    DoorwayWidthOutOfRange(f32),
    /// Window width fraction outside (0, 1].
    WindowWidthOutOfRange(f32),
    /// Elevator multiple must be positive.
    NonPositiveElevatorWidth(f32),
    /// Stair flights need at least one step.
    NoStairSteps,
    /// Story cap must allow at least one story.
    ZeroStoryLimit,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveFloorSpacing(v) => write!(f, "floor_spacing {} <= 0", v),
            ConfigError::FloorThicknessOutOfRange(v) => {
                write!(f, "floor_thick_fract {} not in (0, 0.5)", v)
            }
            ConfigError::DoorwayWidthOutOfRange(v) => {
                write!(f, "doorway_width_fract {} not in (0, 1)", v)
            }
            ConfigError::WindowWidthOutOfRange(v) => {
                write!(f, "window_width_fract {} not in (0, 1]", v)
            }
            ConfigError::NonPositiveElevatorWidth(v) => {
                write!(f, "elevator_width_fract {} <= 0", v)
            }
            ConfigError::NoStairSteps => write!(f, "num_stair_steps is 0"),
            ConfigError::ZeroStoryLimit => write!(f, "max_stories is 0"),
        }
    }
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &InteriorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.floor_spacing <= 0.0 {
        errors.push(ConfigError::NonPositiveFloorSpacing(config.floor_spacing));
    }
    if !(config.floor_thick_fract > 0.0 && config.floor_thick_fract < 0.5) {
        errors.push(ConfigError::FloorThicknessOutOfRange(
            config.floor_thick_fract,
        ));
    }
    if !(config.doorway_width_fract > 0.0 && config.doorway_width_fract < 1.0) {
        errors.push(ConfigError::DoorwayWidthOutOfRange(
            config.doorway_width_fract,
        ));
    }
    if !(config.window_width_fract > 0.0 && config.window_width_fract <= 1.0) {
        errors.push(ConfigError::WindowWidthOutOfRange(config.window_width_fract));
    }
    if config.elevator_width_fract <= 0.0 {
        errors.push(ConfigError::NonPositiveElevatorWidth(
            config.elevator_width_fract,
        ));
    }
    if config.num_stair_steps == 0 {
        errors.push(ConfigError::NoStairSteps);
    }
    if config.max_stories == 0 {
        errors.push(ConfigError::ZeroStoryLimit);
    }

    errors
}
