/*
 * Error Module
 *
 * Recoverable failures surfaced by the simulation API. Grid contract
 * violations are not represented here: they panic at the call site.
 */

use thiserror::Error;

use crate::spatial_grid::AgentId;

/// Result alias for fallible simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// A configuration value cannot be used (zero grid resolution, negative speed, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// The handle does not refer to a live agent.
    #[error("unknown agent {0:?}")]
    UnknownAgent(AgentId),
}
