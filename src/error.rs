//! Configuration errors for world generation.

use thiserror::Error;

/// Generation fails fast at construction; no partial grid is ever
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldGenError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("sea level percentile must be within 1..=99, got {0}")]
    InvalidSeaPercent(u8),

    #[error("average surface temperature {0}°C is outside the usable range")]
    InvalidTemperature(f32),
}
