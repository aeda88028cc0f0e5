//! Stay Unstable - keep a tower of boxes wobbling on a sliding platform
//!
//! Core modules:
//! - `sim`: Deterministic game core (stack building, stability, scoring, phases)
//! - `physics`: Rigid-body world seam and its rapier2d implementation
//! - `platform`: Input seam and the windowed backend
//! - `renderer`: Drawing seam and the per-frame painter
//! - `settings`: Tunable game constants

pub mod error;
pub mod physics;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one physics step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 350.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// World tuning
    pub const SOLVER_ITERATIONS: usize = 10;
    pub const GRAVITY: f32 = 75.0;

    /// Player platform
    pub const PLATFORM_FRICTION: f32 = 1.5;
    pub const PLATFORM_ELASTICITY: f32 = 0.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;
    /// Distance from the bottom edge to the platform center
    pub const PLATFORM_BOTTOM_OFFSET: f32 = 10.0;

    /// Stacked boxes (and walls)
    pub const OBJECTS_FRICTION: f32 = 1.5;
    pub const OBJECTS_ELASTICITY: f32 = 0.0;
    pub const OBJECTS_DENSITY: f32 = 100.0;
    pub const OBJECTS_MIN_SIZE: u32 = 25;
    pub const OBJECTS_MAX_SIZE: u32 = 75;
    pub const NUM_BOXES: usize = 13;
    pub const STACK_GAP: f32 = 15.0;

    /// Baseline sits this far above the bottom edge
    pub const BASELINE_MARGIN: f32 = 25.0;
    /// Platform velocity per pointer pixel moved in one tick
    pub const POINTER_GAIN: f32 = 60.0;

    /// Upper point must move at least this much to count as a change
    pub const STABILITY_THRESHOLD: f32 = 5.0;
    /// Ticks without change before the tower is declared stable (3s at 60 Hz)
    pub const STABILITY_TICKS: u32 = 180;
}
