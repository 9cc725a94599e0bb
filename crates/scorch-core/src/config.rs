//! Simulation configuration.
//!
//! Defaults match the stock game settings. Collaborators load overrides from
//! JSON; unspecified fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{LandType, WallPolicy};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub screen_width: usize,
    pub screen_height: usize,
    /// Wind at the start of the round.
    pub wind: f64,
    /// Maximum initial wind magnitude. The random walk clamps at four times this.
    pub max_wind: f64,
    /// Random-walk the wind between turns.
    pub change_wind: bool,
    pub wall: WallPolicy,
    /// Air resistance, 0..=10000. The per-step factor is `1 - viscosity / 10000`.
    pub viscosity: f64,
    /// Gravity multiplier.
    pub gravity: f64,
    /// Multiplier applied to every blast and terrain-op radius.
    pub explosion_scale: f64,
    /// Per-step velocity damping of napalm and dirt particles.
    pub particle_damping: f64,
    /// Whether an attacker's own blast can hurt it.
    pub self_damage: bool,
    pub steps_per_frame: u32,
    /// Drop actors whose ground was removed.
    pub falling_actors: bool,
    pub land_type: LandType,
    /// Percent chance the terrain walk keeps its slope (and doubles bumps).
    pub land_bumpiness: u32,
}

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("screen {width}x{height} is too small")]
    ScreenTooSmall { width: usize, height: usize },
    #[error("{field} = {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            wind: 0.0,
            max_wind: 5.0,
            change_wind: true,
            wall: WallPolicy::Concrete,
            viscosity: 0.0,
            gravity: 1.0,
            explosion_scale: 1.0,
            particle_damping: PARTICLE_DAMPING,
            self_damage: true,
            steps_per_frame: STEPS_PER_FRAME,
            falling_actors: true,
            land_type: LandType::Rolling,
            land_bumpiness: 20,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_screen(self.screen_width, self.screen_height)?;
        check_range("viscosity", self.viscosity, 0.0, 10_000.0)?;
        check_range("gravity", self.gravity, 0.0, 10.0)?;
        check_range("max_wind", self.max_wind, 0.0, 500.0)?;
        if !(self.explosion_scale > 0.0 && self.explosion_scale.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "explosion_scale",
                value: self.explosion_scale,
            });
        }
        if !(self.particle_damping > 0.0 && self.particle_damping <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "particle_damping",
                value: self.particle_damping,
            });
        }
        check_range("land_bumpiness", self.land_bumpiness as f64, 0.0, 100.0)?;
        if self.steps_per_frame == 0 {
            return Err(ConfigError::OutOfRange {
                field: "steps_per_frame",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Smallest arena the generators and actor placement can work with.
    pub fn check_screen(width: usize, height: usize) -> Result<(), ConfigError> {
        let min_height = PLAYFIELD_TOP as usize + 40;
        if width < 2 * ACTOR_PLACEMENT_MARGIN + 1 || height < min_height {
            return Err(ConfigError::ScreenTooSmall { width, height });
        }
        Ok(())
    }

    /// Per-step multiplicative air resistance.
    pub fn viscosity_factor(&self) -> f64 {
        1.0 - self.viscosity / 10_000.0
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
