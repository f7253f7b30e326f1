/*
 * Physics Module
 *
 * This module advances the flock by one tick:
 * 1. Compute each boid's desired acceleration from its grid window
 * 2. Store it (clamped) as the boid's acceleration
 * 3. Integrate velocity and position, wrapping onto the torus
 * 4. Move the boid's handle to its new grid cell
 *
 * In snapshot mode step 1 runs for every boid before any boid moves, so the
 * result does not depend on iteration order and the gather can run on rayon.
 * Sequential mode performs all four steps per boid before the next.
 */

use nannou::prelude::Vec2;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::flock::Flock;
use crate::flocking::FlockingRules;
use crate::params::UpdateMode;
use crate::spatial_grid::AgentId;

/// What happened during one call to [`Flock::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// Ticks completed so far, including this one.
    pub tick: u64,
    pub agents: usize,
    /// Boids whose grid cell changed.
    pub relocations: usize,
    pub skipped: bool,
}

impl Flock {
    /// Advance every boid by `delta_time`. Non-positive or non-finite steps are
    /// no-ops.
    pub fn tick(&mut self, delta_time: f32) -> TickSummary {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            debug!(delta_time, "skipping tick");
            return TickSummary {
                tick: self.ticks,
                agents: self.agents.len(),
                relocations: 0,
                skipped: true,
            };
        }

        let relocations = match self.config.update_mode {
            UpdateMode::Snapshot => self.tick_snapshot(delta_time),
            UpdateMode::Sequential => self.tick_sequential(delta_time),
        };
        self.ticks += 1;

        let summary = TickSummary {
            tick: self.ticks,
            agents: self.agents.len(),
            relocations,
            skipped: false,
        };
        trace!(
            tick = summary.tick,
            agents = summary.agents,
            relocations,
            "tick complete"
        );
        summary
    }

    fn tick_snapshot(&mut self, delta_time: f32) -> usize {
        let ids: Vec<AgentId> = self.agents.keys().collect();

        // Gather against the start-of-tick state
        let desired: Vec<Vec2> = {
            let rules = FlockingRules::new(&self.grid, &self.agents, &self.config);
            if self.config.parallel {
                ids.par_iter().map(|&id| rules.desired_for(id)).collect()
            } else {
                ids.iter().map(|&id| rules.desired_for(id)).collect()
            }
        };

        let mut relocations = 0;
        for (&id, steering) in ids.iter().zip(desired) {
            let Some(boid) = self.agents.get_mut(id) else {
                continue;
            };
            boid.apply_steering(steering, self.config.max_force);
            boid.integrate(delta_time, &self.config, &mut self.rng);
            if self.grid.relocate(id, boid) {
                relocations += 1;
            }
        }
        relocations
    }

    fn tick_sequential(&mut self, delta_time: f32) -> usize {
        let ids: Vec<AgentId> = self.agents.keys().collect();

        let mut relocations = 0;
        for id in ids {
            let steering =
                FlockingRules::new(&self.grid, &self.agents, &self.config).desired_for(id);
            let Some(boid) = self.agents.get_mut(id) else {
                continue;
            };
            boid.apply_steering(steering, self.config.max_force);
            boid.integrate(delta_time, &self.config, &mut self.rng);
            if self.grid.relocate(id, boid) {
                relocations += 1;
            }
        }
        relocations
    }
}
