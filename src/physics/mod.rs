//! Rigid-body world seam
//!
//! The game core never talks to the physics engine directly. It only needs to
//! step the world, push the platform around, and look at polygon outlines.

pub mod rapier;

use glam::Vec2;

pub use rapier::RapierWorld;

/// What a polygon belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    /// The player-driven kinematic platform
    Platform,
    /// One of the stacked boxes
    Box,
}

/// Dimensions and mass properties of a stacked box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpec {
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    /// Moment of inertia about the box center
    pub inertia: f32,
}

impl BoxSpec {
    /// Solid box with uniform density
    pub fn from_dimensions(width: f32, height: f32, density: f32) -> Self {
        let mass = density * width * height;
        Self {
            width,
            height,
            mass,
            inertia: box_moment(mass, width, height),
        }
    }
}

/// Moment of inertia of a solid rectangle about its center
#[inline]
pub fn box_moment(mass: f32, width: f32, height: f32) -> f32 {
    mass * (width * width + height * height) / 12.0
}

/// A simulated world the game can drive
pub trait PhysicsWorld {
    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Command the kinematic platform's linear velocity
    fn set_platform_velocity(&mut self, velocity: Vec2);

    /// Visit the world-space vertices of every polygon shape
    ///
    /// Walls are segments, not polygons, and are skipped. Order is stable:
    /// platform first, then boxes bottom to top as they were stacked.
    fn for_each_polygon(&self, visit: &mut dyn FnMut(BodyRole, &[Vec2]));

    /// Number of stacked boxes
    fn box_count(&self) -> usize;
}

/// Builds a fresh world for each round
pub trait SceneBuilder {
    type World: PhysicsWorld;

    fn build(&mut self) -> Self::World;
}
