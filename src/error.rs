//! Configuration errors
//!
//! The only fallible step is validating [`Settings`](crate::Settings) before a
//! game is built. Everything after that is total.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen size must be positive, got {width}x{height}")]
    ScreenSize { width: f32, height: f32 },

    #[error("box size range {min}..={max} is empty or starts at zero")]
    BoxSizeRange { min: u32, max: u32 },

    #[error("box density must be positive, got {0}")]
    Density(f32),

    #[error("solver needs at least one iteration")]
    SolverIterations,

    #[error("stability window must be at least one tick")]
    StabilityWindow,

    #[error("timestep must be positive, got {0}")]
    Timestep(f32),
}
