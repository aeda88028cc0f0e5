//! Initial scene construction
//!
//! Walls on both screen edges, the kinematic platform near the bottom, and a
//! tower of randomly sized boxes stacked on top of it.

use std::num::NonZeroUsize;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::ConfigError;
use crate::physics::{BoxSpec, RapierWorld, SceneBuilder};
use crate::settings::Settings;

/// Builds the tower scene into a fresh [`RapierWorld`]
#[derive(Debug, Clone)]
pub struct StackBuilder {
    settings: Settings,
    solver_iterations: NonZeroUsize,
    /// Rounds built so far, mixed into a fixed seed
    round: u64,
}

impl StackBuilder {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let solver_iterations =
            NonZeroUsize::new(settings.solver_iterations).ok_or(ConfigError::SolverIterations)?;
        Ok(Self {
            settings,
            solver_iterations,
            round: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Seed for the next round
    fn next_seed(&mut self) -> u64 {
        let seed = match self.settings.seed {
            Some(seed) => seed.wrapping_add(self.round),
            None => rand::random(),
        };
        self.round += 1;
        seed
    }

    /// Build the scene with box sizes drawn from `seed`
    pub fn build_with_seed(&self, seed: u64) -> RapierWorld {
        let s = &self.settings;
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = RapierWorld::new(s.gravity, self.solver_iterations);

        world.add_wall(0.0, s.screen_height, s.objects_friction, s.objects_elasticity);
        world.add_wall(
            s.screen_width,
            s.screen_height,
            s.objects_friction,
            s.objects_elasticity,
        );

        world.add_platform(
            Vec2::new(s.screen_width / 2.0, s.screen_height - s.platform_bottom_offset),
            Vec2::new(s.platform_width(), s.platform_height),
            s.platform_friction,
            s.platform_elasticity,
        );

        // Bottom edge of the next box
        let mut cursor = s.baseline();
        for _ in 0..s.box_count {
            let width = rng.random_range(s.box_min_size..=s.box_max_size) as f32;
            let height = rng.random_range(s.box_min_size..=s.box_max_size) as f32;
            let spec = BoxSpec::from_dimensions(width, height, s.objects_density);

            cursor -= s.stack_gap;
            let center = Vec2::new(s.screen_width / 2.0, cursor - height / 2.0);
            cursor -= height;

            world.add_box(center, spec, s.objects_friction, s.objects_elasticity);
        }

        log::debug!(
            "Built tower: {} boxes, top at y={:.1} (seed {})",
            s.box_count,
            cursor,
            seed
        );

        world
    }
}

impl SceneBuilder for StackBuilder {
    type World = RapierWorld;

    fn build(&mut self) -> RapierWorld {
        let seed = self.next_seed();
        self.build_with_seed(seed)
    }
}
