//! rapier2d-backed world
//!
//! Screen-space coordinates throughout: X to the right, Y downward, units are
//! logical pixels. Gravity therefore points along +Y.

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use super::{BodyRole, BoxSpec, PhysicsWorld};

/// Pixels per "meter" for rapier's tolerances
const LENGTH_UNIT: Real = 50.0;

pub struct RapierWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    platform: Option<RigidBodyHandle>,
    /// Boxes in stacking order (bottom first)
    boxes: Vec<(RigidBodyHandle, BoxSpec)>,
}

impl RapierWorld {
    /// Empty world with downward gravity and a fixed solver iteration count
    pub fn new(gravity: f32, solver_iterations: NonZeroUsize) -> Self {
        let integration_params = IntegrationParameters {
            num_solver_iterations: solver_iterations,
            length_unit: LENGTH_UNIT,
            ..IntegrationParameters::default()
        };

        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![0.0, gravity],
            integration_params,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            platform: None,
            boxes: Vec::new(),
        }
    }

    /// Infinite-mass vertical wall from y = 0 down to `height` at `x`
    pub fn add_wall(&mut self, x: f32, height: f32, friction: f32, elasticity: f32) {
        let body = RigidBodyBuilder::fixed().translation(vector![x, 0.0]).build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::segment(point![0.0, 0.0], point![0.0, height])
            .friction(friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution(elasticity)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
    }

    /// Velocity-driven platform; replaces any previous platform handle
    pub fn add_platform(&mut self, center: Vec2, size: Vec2, friction: f32, elasticity: f32) {
        let body = RigidBodyBuilder::kinematic_velocity_based()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0)
            .friction(friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution(elasticity)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.platform = Some(handle);
    }

    /// Dynamic box with explicit mass properties
    pub fn add_box(&mut self, center: Vec2, spec: BoxSpec, friction: f32, elasticity: f32) {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(spec.width / 2.0, spec.height / 2.0)
            .mass_properties(MassProperties::new(point![0.0, 0.0], spec.mass, spec.inertia))
            .friction(friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution(elasticity)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.boxes.push((handle, spec));
    }

    /// Specs of the stacked boxes, bottom first
    pub fn box_specs(&self) -> impl Iterator<Item = &BoxSpec> {
        self.boxes.iter().map(|(_, spec)| spec)
    }

    /// Center of each stacked box, bottom first
    pub fn box_positions(&self) -> Vec<Vec2> {
        self.boxes
            .iter()
            .filter_map(|(handle, _)| self.bodies.get(*handle))
            .map(|rb| Vec2::new(rb.translation().x, rb.translation().y))
            .collect()
    }

    pub fn platform_position(&self) -> Option<Vec2> {
        let rb = self.bodies.get(self.platform?)?;
        Some(Vec2::new(rb.translation().x, rb.translation().y))
    }

    pub fn platform_velocity(&self) -> Option<Vec2> {
        let rb = self.bodies.get(self.platform?)?;
        Some(Vec2::new(rb.linvel().x, rb.linvel().y))
    }

    /// Total rigid bodies, walls included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Visit the outline of every cuboid collider on `handle`
    fn visit_cuboids(
        &self,
        handle: RigidBodyHandle,
        role: BodyRole,
        visit: &mut dyn FnMut(BodyRole, &[Vec2]),
    ) {
        let Some(body) = self.bodies.get(handle) else {
            return;
        };
        for collider_handle in body.colliders() {
            let Some(collider) = self.colliders.get(*collider_handle) else {
                continue;
            };
            let Some(cuboid) = collider.shape().as_cuboid() else {
                continue;
            };
            let (hx, hy) = (cuboid.half_extents.x, cuboid.half_extents.y);
            let pose = collider.position();
            let corners = [
                point![-hx, -hy],
                point![hx, -hy],
                point![hx, hy],
                point![-hx, hy],
            ]
            .map(|local| {
                let world = pose * local;
                Vec2::new(world.x, world.y)
            });
            visit(role, &corners);
        }
    }
}

impl PhysicsWorld for RapierWorld {
    fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn set_platform_velocity(&mut self, velocity: Vec2) {
        let Some(handle) = self.platform else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    fn for_each_polygon(&self, visit: &mut dyn FnMut(BodyRole, &[Vec2])) {
        if let Some(platform) = self.platform {
            self.visit_cuboids(platform, BodyRole::Platform, visit);
        }
        for (handle, _) in &self.boxes {
            self.visit_cuboids(*handle, BodyRole::Box, visit);
        }
    }

    fn box_count(&self) -> usize {
        self.boxes.len()
    }
}
