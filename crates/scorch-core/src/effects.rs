//! Structured effects returned by behavior handlers.
//!
//! Handlers never touch the terrain or actors directly. They describe what
//! should happen and the engine applies it in a fixed order.

use serde::{Deserialize, Serialize};

use crate::components::ProjectileSpec;

/// Terrain mutation requested by a behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum TerrainOp {
    #[default]
    None,
    DirtAdd {
        radius: i32,
    },
    DirtTower {
        height: i32,
    },
    Tunnel {
        depth: i32,
        down: bool,
    },
    Disrupt {
        radius: i32,
    },
}

/// Outcome of an impact-phase handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactEffect {
    pub explode: bool,
    pub radius: i32,
    pub spawn: Vec<ProjectileSpec>,
    pub terrain_op: TerrainOp,
    pub skip_damage: bool,
    /// Projectile stays active after the impact.
    pub keep_alive: bool,
    /// Crater columns are compacted after carving.
    pub earth_moving: bool,
}

/// Outcome of a flight-phase handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightEffect {
    pub split: bool,
    pub spawn: Vec<ProjectileSpec>,
    /// Projectile is retired before integration.
    pub remove: bool,
    /// Detonate at the current position with this radius.
    pub explode_here: Option<i32>,
    pub terrain_op: TerrainOp,
}

fn scale_radius(radius: i32, scale: f64) -> i32 {
    (radius as f64 * scale).floor() as i32
}

impl TerrainOp {
    /// Apply the explosion-size scale. Tower height is fixed.
    pub fn scaled(self, scale: f64) -> Self {
        match self {
            TerrainOp::None | TerrainOp::DirtTower { .. } => self,
            TerrainOp::DirtAdd { radius } => TerrainOp::DirtAdd {
                radius: scale_radius(radius, scale),
            },
            TerrainOp::Tunnel { depth, down } => TerrainOp::Tunnel {
                depth: scale_radius(depth, scale),
                down,
            },
            TerrainOp::Disrupt { radius } => TerrainOp::Disrupt {
                radius: scale_radius(radius, scale),
            },
        }
    }
}

impl ImpactEffect {
    /// Blast with damage and a crater.
    pub fn explode(radius: i32) -> Self {
        Self {
            explode: true,
            radius,
            ..Default::default()
        }
    }

    /// No blast, no damage. The projectile is retired.
    pub fn inert() -> Self {
        Self {
            skip_damage: true,
            ..Default::default()
        }
    }

    /// Terrain mutation only.
    pub fn terrain(op: TerrainOp) -> Self {
        Self {
            terrain_op: op,
            skip_damage: true,
            ..Default::default()
        }
    }

    pub fn with_spawn(mut self, spawn: Vec<ProjectileSpec>) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        if self.radius > 0 {
            self.radius = scale_radius(self.radius, scale);
        }
        self.terrain_op = self.terrain_op.scaled(scale);
        self
    }
}

impl FlightEffect {
    /// Keep flying, nothing to do.
    pub fn none() -> Self {
        Self::default()
    }

    /// Retire the projectile without a blast.
    pub fn remove() -> Self {
        Self {
            remove: true,
            ..Default::default()
        }
    }

    /// Detonate here and retire.
    pub fn detonate(radius: i32) -> Self {
        Self {
            split: true,
            remove: true,
            explode_here: Some(radius),
            ..Default::default()
        }
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        self.explode_here = self.explode_here.map(|r| scale_radius(r, scale));
        self.terrain_op = self.terrain_op.scaled(scale);
        self
    }
}
