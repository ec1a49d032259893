//! Errors raised when terrain settings are rejected.

use thiserror::Error;

/// Largest accepted grid resolution. `(n + 1)^2` vertex indices must fit in `u32`.
pub const MAX_RESOLUTION: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("grid resolution must be a positive power of two, got {0}")]
    InvalidResolution(u32),

    #[error("grid resolution {resolution} exceeds the maximum of {max}")]
    ResolutionTooLarge { resolution: u32, max: u32 },

    #[error("degenerate bounds [{min_x}, {max_x}] x [{min_y}, {max_y}]")]
    DegenerateBounds {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },

    #[error("roughness must be finite and non-negative, got {0}")]
    InvalidRoughness(f32),

    #[error("palette thresholds must be finite and strictly increasing")]
    UnorderedPalette,

    #[error("heightfield side {actual} does not match grid side {expected}")]
    HeightfieldMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, TerrainError>;
