/*
 * Flock Module
 *
 * The Flock owns every boid, the spatial grid and the simulation config.
 * It is the only entry point callers use: spawning and removing agents,
 * toggling behaviours, bulk heading commands and runtime tunables. The
 * per-tick pipeline lives in the physics module.
 */

use nannou::prelude::{vec2, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::boid::Boid;
use crate::error::{Result, SimulationError};
use crate::flocking::FlockingRules;
use crate::params::{BehaviorFlags, SimulationConfig};
use crate::spatial_grid::{AgentId, SpatialGrid};
use crate::vector::VecExt;

pub struct Flock {
    pub(crate) config: SimulationConfig,
    pub(crate) agents: SlotMap<AgentId, Boid>,
    pub(crate) grid: SpatialGrid,
    pub(crate) rng: SmallRng,
    // Behaviour state handed to newly spawned boids
    flags: BehaviorFlags,
    pub(crate) ticks: u64,
}

impl Flock {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        debug!(
            width = config.world_width,
            height = config.world_height,
            cells = config.cells_per_axis,
            "creating flock"
        );

        Ok(Self {
            grid: SpatialGrid::new(&config),
            agents: SlotMap::with_key(),
            rng,
            flags: config.default_flags,
            ticks: 0,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Behaviour state applied to new boids and by the broadcast toggles.
    pub fn flags(&self) -> BehaviorFlags {
        self.flags
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Boid> {
        self.agents.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Boid)> + '_ {
        self.agents.iter()
    }

    /// Steering view over the current state, without advancing anything.
    pub fn rules(&self) -> FlockingRules<'_> {
        FlockingRules::new(&self.grid, &self.agents, &self.config)
    }

    /*
     * Lifecycle
     */

    pub fn spawn_at(&mut self, position: Vec2) -> AgentId {
        self.spawn_with_flags(position, self.flags)
    }

    pub fn spawn_random(&mut self) -> AgentId {
        let x = self.rng.gen_range(0.0..self.config.world_width);
        let y = self.rng.gen_range(0.0..self.config.world_height);
        self.spawn_at(vec2(x, y))
    }

    pub fn spawn_at_origin(&mut self) -> AgentId {
        self.spawn_at(Vec2::ZERO)
    }

    pub fn spawn_with_flags(&mut self, position: Vec2, flags: BehaviorFlags) -> AgentId {
        let boid = Boid::new(position, flags, &self.config, &mut self.rng);
        self.register(boid)
    }

    /// Add a boid with caller-chosen motion state; its position is wrapped first.
    pub fn insert(&mut self, boid: Boid) -> AgentId {
        let boid = Boid::with_motion(
            boid.position,
            boid.velocity,
            boid.acceleration,
            boid.flags,
            &self.config,
        );
        self.register(boid)
    }

    fn register(&mut self, boid: Boid) -> AgentId {
        let id = self.agents.insert(boid);
        self.grid.insert(id, &mut self.agents[id]);
        id
    }

    pub fn remove(&mut self, id: AgentId) -> Result<Boid> {
        let boid = self
            .agents
            .remove(id)
            .ok_or(SimulationError::UnknownAgent(id))?;
        self.grid.remove(id, &boid);
        Ok(boid)
    }

    /// Remove an arbitrary boid; `None` on an empty flock.
    pub fn remove_random(&mut self) -> Option<Boid> {
        if self.agents.is_empty() {
            warn!("remove requested on an empty flock");
            return None;
        }
        let pick = self.rng.gen_range(0..self.agents.len());
        let id = self.agents.keys().nth(pick)?;
        self.remove(id).ok()
    }

    /*
     * Tunables, applied between ticks
     */

    pub fn set_max_speed(&mut self, max_speed: f32) -> Result<()> {
        self.set_config(SimulationConfig {
            max_speed,
            ..self.config.clone()
        })
    }

    pub fn set_max_force(&mut self, max_force: f32) -> Result<()> {
        self.set_config(SimulationConfig {
            max_force,
            ..self.config.clone()
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.set_config(SimulationConfig {
            world_width: width,
            world_height: height,
            ..self.config.clone()
        })
    }

    /// Replace the config. A new world size or grid resolution rebuilds the grid
    /// and wraps every boid into the new bounds.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        let regrid = config.world_width != self.config.world_width
            || config.world_height != self.config.world_height
            || config.cells_per_axis != self.config.cells_per_axis;
        self.config = config;

        if regrid {
            debug!(
                width = self.config.world_width,
                height = self.config.world_height,
                cells = self.config.cells_per_axis,
                "rebuilding spatial grid"
            );
            for boid in self.agents.values_mut() {
                boid.position = boid
                    .position
                    .wrap_into(self.config.world_width, self.config.world_height);
            }
            self.grid = SpatialGrid::new(&self.config);
            self.grid.rebuild(&mut self.agents);
        }
        Ok(())
    }

    /*
     * Behaviour toggles
     */

    pub fn set_flags(&mut self, id: AgentId, flags: BehaviorFlags) -> Result<()> {
        let boid = self
            .agents
            .get_mut(id)
            .ok_or(SimulationError::UnknownAgent(id))?;
        boid.flags = flags;
        Ok(())
    }

    pub fn set_separation(&mut self, id: AgentId, enabled: bool) -> Result<()> {
        self.agent_mut(id)?.set_separation(enabled);
        Ok(())
    }

    pub fn set_alignment(&mut self, id: AgentId, enabled: bool) -> Result<()> {
        self.agent_mut(id)?.set_alignment(enabled);
        Ok(())
    }

    pub fn set_cohesion(&mut self, id: AgentId, enabled: bool) -> Result<()> {
        self.agent_mut(id)?.set_cohesion(enabled);
        Ok(())
    }

    pub fn set_separation_all(&mut self, enabled: bool) {
        self.flags.separation = enabled;
        self.agents.values_mut().for_each(|b| b.set_separation(enabled));
    }

    pub fn set_alignment_all(&mut self, enabled: bool) {
        self.flags.alignment = enabled;
        self.agents.values_mut().for_each(|b| b.set_alignment(enabled));
    }

    pub fn set_cohesion_all(&mut self, enabled: bool) {
        self.flags.cohesion = enabled;
        self.agents.values_mut().for_each(|b| b.set_cohesion(enabled));
    }

    fn agent_mut(&mut self, id: AgentId) -> Result<&mut Boid> {
        self.agents
            .get_mut(id)
            .ok_or(SimulationError::UnknownAgent(id))
    }

    /*
     * Bulk heading commands
     */

    pub fn rotate_all(&mut self, degrees: f32) {
        let config = &self.config;
        self.agents
            .values_mut()
            .for_each(|b| b.rotate_heading(degrees, config));
    }

    /// Turn each boid by its own uniform angle in `[-max_degrees, max_degrees]`.
    pub fn scramble_headings(&mut self, max_degrees: f32) {
        let spread = max_degrees.abs();
        for boid in self.agents.values_mut() {
            let angle = if spread > 0.0 {
                self.rng.gen_range(-spread..=spread)
            } else {
                0.0
            };
            boid.rotate_heading(angle, &self.config);
        }
    }

    /// Translate every boid by `offset`, keeping the grid in step.
    pub fn nudge_all(&mut self, offset: Vec2) {
        for (id, boid) in self.agents.iter_mut() {
            boid.nudge(offset, &self.config, &mut self.rng);
            self.grid.relocate(id, boid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn seeded() -> Flock {
        let config = SimulationConfig {
            rng_seed: Some(11),
            ..SimulationConfig::default()
        };
        Flock::new(config).unwrap()
    }

    fn assert_grid_consistent(flock: &Flock) {
        let size = flock.grid().cell_size();
        let n = flock.grid().cells_per_axis();
        assert_eq!(flock.grid().len(), flock.len());
        for (id, boid) in flock.iter() {
            let i = ((boid.position.x / size.x).floor() as usize) % n;
            let j = ((boid.position.y / size.y).floor() as usize) % n;
            assert_eq!((boid.cell().i, boid.cell().j), (i, j));
            assert!(flock.grid().cell(boid.cell()).contains(&id));
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SimulationConfig {
            cells_per_axis: 0,
            ..SimulationConfig::default()
        };
        assert!(Flock::new(config).is_err());
    }

    #[test]
    fn spawned_boids_are_registered() {
        let mut flock = seeded();
        for _ in 0..100 {
            flock.spawn_random();
        }
        let origin = flock.spawn_at_origin();
        assert_eq!(flock.len(), 101);
        assert_eq!(flock.get(origin).map(|b| b.position), Some(Vec2::ZERO));
        assert_grid_consistent(&flock);
    }

    #[test]
    fn new_boids_inherit_broadcast_flags() {
        let mut flock = seeded();
        flock.set_cohesion_all(false);
        let id = flock.spawn_at(vec2(50.0, 50.0));
        let flags = flock.get(id).map(|b| b.flags);
        assert_eq!(
            flags,
            Some(BehaviorFlags {
                separation: true,
                alignment: true,
                cohesion: false
            })
        );
    }

    #[test]
    fn remove_unknown_agent_is_an_error() {
        let mut flock = seeded();
        let id = flock.spawn_random();
        assert!(flock.remove(id).is_ok());
        assert_eq!(flock.remove(id), Err(SimulationError::UnknownAgent(id)));
        assert!(flock.grid().is_empty());
        assert!(flock.remove_random().is_none());
    }

    #[test]
    fn remove_random_shrinks_flock() {
        let mut flock = seeded();
        for _ in 0..10 {
            flock.spawn_random();
        }
        assert!(flock.remove_random().is_some());
        assert_eq!(flock.len(), 9);
        assert_grid_consistent(&flock);
    }

    #[test]
    fn per_agent_toggles() {
        let mut flock = seeded();
        let id = flock.spawn_random();
        flock.set_alignment(id, false).unwrap();
        flock.set_separation(id, false).unwrap();
        let flags = flock.get(id).map(|b| b.flags).unwrap_or_default();
        assert!(!flags.alignment && !flags.separation && flags.cohesion);

        flock.set_flags(id, BehaviorFlags::NONE).unwrap();
        assert!(!flock.get(id).map(|b| b.flags.any()).unwrap_or(true));

        flock.remove(id).unwrap();
        assert!(flock.set_cohesion(id, true).is_err());
    }

    #[test]
    fn resize_rewraps_and_regrids() {
        let mut flock = seeded();
        for _ in 0..50 {
            flock.spawn_random();
        }
        flock.resize(300.0, 200.0).unwrap();
        for (_, boid) in flock.iter() {
            assert!(boid.position.x >= 0.0 && boid.position.x < 300.0);
            assert!(boid.position.y >= 0.0 && boid.position.y < 200.0);
        }
        assert_grid_consistent(&flock);
        assert!(flock.resize(-1.0, 200.0).is_err());
    }

    #[test]
    fn tunables_validate() {
        let mut flock = seeded();
        flock.set_max_speed(50.0).unwrap();
        flock.set_max_force(2.5).unwrap();
        assert_eq!(flock.config().max_speed, 50.0);
        assert_eq!(flock.config().max_force, 2.5);
        assert!(flock.set_max_force(f32::INFINITY).is_err());
        assert_eq!(flock.config().max_force, 2.5);
    }

    #[test]
    fn rotate_all_turns_every_heading() {
        let mut flock = seeded();
        let id = flock.insert(Boid::with_motion(
            vec2(100.0, 100.0),
            vec2(10.0, 0.0),
            Vec2::ZERO,
            BehaviorFlags::NONE,
            flock.config(),
        ));
        flock.rotate_all(90.0);
        let velocity = flock.get(id).map(|b| b.velocity).unwrap_or_default();
        assert_abs_diff_eq!(velocity.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(velocity.y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn scramble_keeps_speed() {
        let mut flock = seeded();
        let id = flock.insert(Boid::with_motion(
            vec2(100.0, 100.0),
            vec2(30.0, 40.0),
            Vec2::ZERO,
            BehaviorFlags::NONE,
            flock.config(),
        ));
        flock.scramble_headings(50.0);
        let speed = flock.get(id).map(|b| b.velocity.length()).unwrap_or_default();
        assert_abs_diff_eq!(speed, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn nudge_keeps_grid_in_step() {
        let mut flock = seeded();
        for _ in 0..40 {
            flock.spawn_random();
        }
        for _ in 0..20 {
            flock.nudge_all(vec2(37.0, -23.0));
        }
        assert_grid_consistent(&flock);
    }
}
