/*
 * Flocking Rules Module
 *
 * Computes the desired acceleration of one boid from the agents in the
 * 7x7 block of grid cells around it:
 * 1. Separation: repel from neighbours closer than the separation margin,
 *    with a steep 1/ln(d + 1) weight
 * 2. Alignment: steer toward the average neighbour velocity
 * 3. Cohesion: steer toward the neighbour centroid
 *
 * Each enabled rule is averaged over the neighbours that contributed to it,
 * clamped to max_force, summed, and the sum clamped again.
 */

use nannou::prelude::Vec2;
use slotmap::SlotMap;

use crate::boid::Boid;
use crate::params::{BehaviorFlags, SimulationConfig};
use crate::spatial_grid::{AgentId, SpatialGrid};
use crate::vector::VecExt;

/// Stand-in for zero distances and logarithms before they are used as divisors.
pub const EPSILON: f32 = 1e-8;

/// Read-only view of the flock used to steer individual boids.
pub struct FlockingRules<'a> {
    grid: &'a SpatialGrid,
    agents: &'a SlotMap<AgentId, Boid>,
    config: &'a SimulationConfig,
}

impl<'a> FlockingRules<'a> {
    pub fn new(
        grid: &'a SpatialGrid,
        agents: &'a SlotMap<AgentId, Boid>,
        config: &'a SimulationConfig,
    ) -> Self {
        Self {
            grid,
            agents,
            config,
        }
    }

    /// Desired acceleration for the agent `id`; zero for unknown handles.
    pub fn desired_for(&self, id: AgentId) -> Vec2 {
        self.agents
            .get(id)
            .map_or(Vec2::ZERO, |boid| self.desired_acceleration(id, boid))
    }

    /// Combined, clamped steering for `boid`. Zero when every rule is off or
    /// the window holds no other agent.
    pub fn desired_acceleration(&self, id: AgentId, boid: &Boid) -> Vec2 {
        let flags = boid.flags;
        if !flags.any() {
            return Vec2::ZERO;
        }

        let mut sums = SteeringSums::default();
        let window = self
            .grid
            .neighbors_in_window(boid.cell(), self.config.cell_radius, self.agents);

        for neighbor in window {
            if neighbor.id == id {
                continue;
            }
            sums.neighbors += 1;

            if flags.cohesion {
                sums.position += neighbor.position;
            }
            if flags.alignment {
                sums.velocity += neighbor.velocity;
            }
            if flags.separation {
                let mut distance = boid.position.distance(neighbor.position);
                if distance > self.config.interaction_radius {
                    continue;
                }
                if distance == 0.0 {
                    distance = EPSILON;
                }
                let weight = separation_weight(distance, self.config);
                if weight > 0.0 {
                    sums.separation += (boid.position - neighbor.position) * weight;
                    sums.separating += 1;
                }
            }
        }

        sums.steer(boid.position, flags, self.config.max_force)
    }
}

/// Repulsion weight at `distance`: zero past the separation margin, otherwise
/// `strength / ln(distance + 1)`.
pub fn separation_weight(distance: f32, config: &SimulationConfig) -> f32 {
    if distance > config.separation_margin {
        return 0.0;
    }
    let mut falloff = distance.ln_1p();
    if falloff <= 0.0 {
        falloff = EPSILON;
    }
    config.separation_strength / falloff
}

#[derive(Debug, Default)]
struct SteeringSums {
    neighbors: usize,
    separating: usize,
    position: Vec2,
    velocity: Vec2,
    separation: Vec2,
}

impl SteeringSums {
    fn steer(&self, focal: Vec2, flags: BehaviorFlags, max_force: f32) -> Vec2 {
        if self.neighbors == 0 {
            return Vec2::ZERO;
        }
        let count = self.neighbors as f32;
        let mut desired = Vec2::ZERO;

        if flags.alignment {
            desired += (self.velocity / count).clamp_magnitude(max_force);
        }
        if flags.cohesion {
            let centroid = self.position / count;
            desired += (centroid - focal).clamp_magnitude(max_force);
        }
        if flags.separation && self.separating > 0 {
            let push = self.separation / self.separating as f32;
            if push.x.is_finite() && push.y.is_finite() {
                desired += push.clamp_magnitude(max_force);
            }
        }

        desired.clamp_magnitude(max_force)
    }
}
