//! Game settings
//!
//! Every tunable constant in one place. Defaults come from [`crate::consts`];
//! nothing is read from disk or the environment.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === World ===
    pub solver_iterations: usize,
    /// Downward acceleration (screen Y grows downward)
    pub gravity: f32,
    /// Simulated seconds per tick
    pub timestep: f32,

    // === Platform ===
    pub platform_friction: f32,
    pub platform_elasticity: f32,
    pub platform_height: f32,
    pub platform_bottom_offset: f32,

    // === Boxes and walls ===
    pub objects_friction: f32,
    pub objects_elasticity: f32,
    /// Mass per unit of box area
    pub objects_density: f32,
    pub box_min_size: u32,
    pub box_max_size: u32,
    pub box_count: usize,
    /// Vertical gap left under each box when stacking
    pub stack_gap: f32,

    // === Scoring ===
    pub baseline_margin: f32,
    pub pointer_gain: f32,
    pub stability_threshold: f32,
    pub stability_ticks: u32,

    /// Fixed RNG seed for reproducible towers (entropy when `None`)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            solver_iterations: SOLVER_ITERATIONS,
            gravity: GRAVITY,
            timestep: SIM_DT,

            platform_friction: PLATFORM_FRICTION,
            platform_elasticity: PLATFORM_ELASTICITY,
            platform_height: PLATFORM_HEIGHT,
            platform_bottom_offset: PLATFORM_BOTTOM_OFFSET,

            objects_friction: OBJECTS_FRICTION,
            objects_elasticity: OBJECTS_ELASTICITY,
            objects_density: OBJECTS_DENSITY,
            box_min_size: OBJECTS_MIN_SIZE,
            box_max_size: OBJECTS_MAX_SIZE,
            box_count: NUM_BOXES,
            stack_gap: STACK_GAP,

            baseline_margin: BASELINE_MARGIN,
            pointer_gain: POINTER_GAIN,
            stability_threshold: STABILITY_THRESHOLD,
            stability_ticks: STABILITY_TICKS,

            seed: None,
        }
    }
}

impl Settings {
    /// Default settings with a fixed tower seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Horizontal line the upper point is scored against
    pub fn baseline(&self) -> f32 {
        self.screen_height - self.baseline_margin
    }

    /// Platform spans half the screen
    pub fn platform_width(&self) -> f32 {
        self.screen_width / 2.0
    }

    /// Check that a world can be built from these settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.box_min_size == 0 || self.box_min_size > self.box_max_size {
            return Err(ConfigError::BoxSizeRange {
                min: self.box_min_size,
                max: self.box_max_size,
            });
        }
        if !(self.objects_density > 0.0) {
            return Err(ConfigError::Density(self.objects_density));
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::SolverIterations);
        }
        if self.stability_ticks == 0 {
            return Err(ConfigError::StabilityWindow);
        }
        if !(self.timestep > 0.0) {
            return Err(ConfigError::Timestep(self.timestep));
        }
        Ok(())
    }
}
