/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationConfig struct holding every tunable of
 * the flock: world dimensions, grid resolution, steering constants and the
 * speed/force clamps. A single value is owned by the Flock and only changes
 * between ticks, through the Flock setters.
 */

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// The three independent steering behaviours an agent can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BehaviorFlags {
    pub separation: bool,
    pub alignment: bool,
    pub cohesion: bool,
}

impl BehaviorFlags {
    pub const ALL: Self = Self {
        separation: true,
        alignment: true,
        cohesion: true,
    };

    pub const NONE: Self = Self {
        separation: false,
        alignment: false,
        cohesion: false,
    };

    #[inline]
    pub fn any(&self) -> bool {
        self.separation || self.alignment || self.cohesion
    }
}

/// How a tick orders neighbour reads against relocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum UpdateMode {
    /// Every agent reads the start-of-tick state; integration and relocation
    /// happen after all desired accelerations are known.
    #[default]
    Snapshot,
    /// Agents are steered, integrated and relocated one at a time, so later
    /// agents see the moves of earlier ones.
    Sequential,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub cells_per_axis: usize,
    // Cells scanned on each side of the focal cell
    pub cell_radius: usize,
    // Separation only considers neighbours this close
    pub interaction_radius: f32,
    // Repulsion weight is zero beyond this distance
    pub separation_margin: f32,
    pub separation_strength: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub jitter_degrees: f32,
    pub base_size: f32,
    pub hue_alpha: u8,
    pub default_flags: BehaviorFlags,
    pub update_mode: UpdateMode,
    pub parallel: bool,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: 1400.0,
            world_height: 700.0,
            cells_per_axis: 35,
            cell_radius: 3,
            interaction_radius: 100.0,
            separation_margin: 50.0,
            separation_strength: 50000.0,
            max_speed: 200.0,
            max_force: 1.0,
            jitter_degrees: 2.5,
            base_size: 6.0,
            hue_alpha: 255,
            default_flags: BehaviorFlags::ALL,
            update_mode: UpdateMode::Snapshot,
            parallel: false,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Convenience constructor for a world of the given size with default tunables.
    pub fn with_world(width: f32, height: f32) -> Self {
        Self {
            world_width: width,
            world_height: height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.world_width.is_finite() && self.world_width > 0.0) {
            return Err(SimulationError::InvalidConfig("world_width must be positive"));
        }
        if !(self.world_height.is_finite() && self.world_height > 0.0) {
            return Err(SimulationError::InvalidConfig("world_height must be positive"));
        }
        if self.cells_per_axis == 0 {
            return Err(SimulationError::InvalidConfig("cells_per_axis must be at least 1"));
        }
        validate_tunable(self.max_speed, "max_speed must be finite and non-negative")?;
        validate_tunable(self.max_force, "max_force must be finite and non-negative")?;
        validate_tunable(
            self.interaction_radius,
            "interaction_radius must be finite and non-negative",
        )?;
        validate_tunable(
            self.separation_margin,
            "separation_margin must be finite and non-negative",
        )?;
        validate_tunable(
            self.separation_strength,
            "separation_strength must be finite and non-negative",
        )?;
        validate_tunable(self.jitter_degrees, "jitter_degrees must be finite and non-negative")?;
        validate_tunable(self.base_size, "base_size must be finite and non-negative")?;
        Ok(())
    }

    #[inline]
    pub fn cell_width(&self) -> f32 {
        self.world_width / self.cells_per_axis as f32
    }

    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.world_height / self.cells_per_axis as f32
    }

    // Parameter ranges for UI sliders
    pub fn max_force_range() -> std::ops::RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.01..=500.0
    }

    pub fn time_scale_range() -> std::ops::RangeInclusive<f32> {
        0.001..=5.0
    }
}

fn validate_tunable(value: f32, reason: &'static str) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfig(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_width(), 40.0);
        assert_eq!(config.cell_height(), 20.0);
    }

    #[test]
    fn rejects_degenerate_worlds() {
        let config = SimulationConfig::with_world(0.0, 700.0);
        assert_eq!(
            config.validate(),
            Err(SimulationError::InvalidConfig("world_width must be positive"))
        );

        let config = SimulationConfig {
            cells_per_axis: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            max_force: f32::NAN,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            max_speed: -1.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn flags_any() {
        assert!(BehaviorFlags::ALL.any());
        assert!(!BehaviorFlags::NONE.any());
        let only_alignment = BehaviorFlags {
            alignment: true,
            ..BehaviorFlags::NONE
        };
        assert!(only_alignment.any());
    }
}
