/*
 * Toroidal Boids - Module Definitions
 *
 * The simulation core (flock, grid, rules, kinematics) has no window or
 * drawing dependencies. The app, ui, renderer and input modules wire it to
 * a nannou window.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use error::{Result, SimulationError};
pub use flock::Flock;
pub use params::{BehaviorFlags, SimulationConfig, UpdateMode};
pub use physics::TickSummary;
pub use spatial_grid::{AgentId, CellIndex, SpatialGrid};
pub use debug::DebugInfo;
pub use app::Model;

// Define modules
pub mod boid;
pub mod error;
pub mod flock;
pub mod flocking;
pub mod spatial_grid;
pub mod params;
pub mod physics;
pub mod vector;
pub mod visuals;
pub mod debug;
pub mod app;
pub mod ui;
pub mod renderer;
pub mod input;

// Boids spawned when the window opens
pub const INITIAL_BOIDS: usize = 100;
