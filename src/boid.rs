/*
 * Boid Module
 *
 * This module defines the Boid struct and its kinematics.
 * Each tick a boid:
 * 1. Jitters its heading by a small random angle
 * 2. Adds its (flocking-derived) acceleration to its velocity
 * 3. Clamps its speed, integrates its position and wraps it onto the torus
 * 4. Recomputes its cosmetic size and colour
 * Grid relocation is left to the owner of the grid.
 */

use nannou::prelude::{vec2, Vec2};
use rand::Rng;

use crate::params::{BehaviorFlags, SimulationConfig};
use crate::spatial_grid::CellIndex;
use crate::vector::VecExt;
use crate::visuals;

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub flags: BehaviorFlags,
    pub size: f32,
    pub color: [u8; 4],
    pub(crate) cell: CellIndex,
}

impl Boid {
    /// A boid at `position` with velocity and acceleration components drawn
    /// from `[-max_speed, max_speed]`. The acceleration is clamped to `max_force`.
    pub fn new<R: Rng + ?Sized>(
        position: Vec2,
        flags: BehaviorFlags,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Self {
        let speed = config.max_speed;
        let mut component = || {
            if speed > 0.0 {
                rng.gen_range(-speed..=speed)
            } else {
                0.0
            }
        };
        let velocity = vec2(component(), component());
        let acceleration = vec2(component(), component());

        Self::with_motion(position, velocity, acceleration, flags, config)
    }

    /// A boid with explicit motion state.
    pub fn with_motion(
        position: Vec2,
        velocity: Vec2,
        acceleration: Vec2,
        flags: BehaviorFlags,
        config: &SimulationConfig,
    ) -> Self {
        let mut boid = Self {
            position: position.wrap_into(config.world_width, config.world_height),
            velocity,
            acceleration: acceleration.clamp_magnitude(config.max_force),
            flags,
            size: config.base_size,
            color: [0, 0, 0, config.hue_alpha],
            cell: CellIndex::default(),
        };
        boid.refresh_visuals(config);
        boid
    }

    /// Grid cell this boid is registered in.
    #[inline]
    pub fn cell(&self) -> CellIndex {
        self.cell
    }

    /// Store the flocking result as this tick's acceleration.
    ///
    /// Boids with every behaviour disabled get no steering at all.
    pub fn apply_steering(&mut self, desired: Vec2, max_force: f32) {
        self.acceleration = if self.flags.any() {
            desired.clamp_magnitude(max_force)
        } else {
            Vec2::ZERO
        };
    }

    /// Advance one tick of `delta_time`. Callers guard against `delta_time <= 0`.
    pub fn integrate<R: Rng + ?Sized>(
        &mut self,
        delta_time: f32,
        config: &SimulationConfig,
        rng: &mut R,
    ) {
        self.jitter(config, rng);

        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_magnitude(config.max_speed);

        self.position += self.velocity * delta_time;
        self.position = self
            .position
            .wrap_into(config.world_width, config.world_height);

        self.refresh_visuals(config);
    }

    /// Translate by `offset` without touching velocity; the heading still jitters.
    pub fn nudge<R: Rng + ?Sized>(&mut self, offset: Vec2, config: &SimulationConfig, rng: &mut R) {
        self.jitter(config, rng);
        self.position = (self.position + offset).wrap_into(config.world_width, config.world_height);
        self.refresh_visuals(config);
    }

    // Random heading change so flocks never settle into a frozen alignment
    fn jitter<R: Rng + ?Sized>(&mut self, config: &SimulationConfig, rng: &mut R) {
        let range = config.jitter_degrees;
        if range > 0.0 {
            self.velocity = self.velocity.rotated_degrees(rng.gen_range(-range..=range));
        }
    }

    pub fn rotate_heading(&mut self, degrees: f32, config: &SimulationConfig) {
        self.velocity = self.velocity.rotated_degrees(degrees);
        self.refresh_visuals(config);
    }

    pub fn rotate_acceleration(&mut self, degrees: f32, max_force: f32) {
        self.acceleration = self
            .acceleration
            .rotated_degrees(degrees)
            .clamp_magnitude(max_force);
    }

    pub fn refresh_visuals(&mut self, config: &SimulationConfig) {
        self.size = visuals::size_for(self.velocity, config);
        self.color = visuals::hue_for(self.velocity, config.hue_alpha);
    }

    pub fn set_separation(&mut self, enabled: bool) {
        self.flags.separation = enabled;
    }

    pub fn set_alignment(&mut self, enabled: bool) {
        self.flags.alignment = enabled;
    }

    pub fn set_cohesion(&mut self, enabled: bool) {
        self.flags.cohesion = enabled;
    }
}
