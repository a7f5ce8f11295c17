//! Fatal errors for interior generation.
//!
//! These indicate broken input from the exterior-shape stage or a bug in
//! the algorithm. Running out of placement attempts is not an error; those
//! paths return `None` and fall back.

use crate::geometry::Axis;
use thiserror::Error;

/// Errors that abort interior generation for one building.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteriorError {
    /// The building has no parts to generate an interior for.
    #[error("building {building} has no parts")]
    NoParts { building: u64 },

    /// A part box has zero or inverted extent on some axis.
    #[error("part {part} is degenerate: min {min:?}, max {max:?}")]
    DegeneratePart {
        part: usize,
        min: [f32; 3],
        max: [f32; 3],
    },

    /// A part is too short to hold a single story.
    #[error("part {part} has no stories (height {height}, floor spacing {spacing})")]
    ZeroStories {
        part: usize,
        height: f32,
        spacing: f32,
    },

    /// Story count exceeds the sanity cap.
    #[error("part {part} has {stories} stories, limit is {limit}")]
    TooManyStories { part: usize, stories: u32, limit: u32 },

    /// A section removal interval is not strictly inside the box.
    #[error("section [{lo}, {hi}] is not strictly inside [{min}, {max}] along {axis:?}")]
    InvalidSection {
        axis: Axis,
        lo: f32,
        hi: f32,
        min: f32,
        max: f32,
    },

    /// Configuration values failed validation.
    #[error("invalid interior config: {0}")]
    InvalidConfig(String),
}

/// Result type for interior generation.
pub type InteriorResult<T> = std::result::Result<T, InteriorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InteriorError::NoParts { building: 7 };
        assert_eq!(format!("{err}"), "building 7 has no parts");

        let err = InteriorError::TooManyStories {
            part: 1,
            stories: 120,
            limit: 100,
        };
        assert!(format!("{err}").contains("120"));
    }
}
