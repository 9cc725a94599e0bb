//! Systems that operate on the simulation each physics step.
//!
//! Systems are free functions. They do not own state; everything they touch
//! is borrowed from the engine through [`StepContext`].

pub mod behavior;
pub mod cleanup;
pub mod damage;
pub mod explosion;
pub mod falling;
pub mod flight;
pub mod guidance;
pub mod impact;
pub mod physics;
pub mod wind;

use rand_chacha::ChaCha8Rng;

use scorch_core::components::{Actor, ProjectileSpec};
use scorch_core::config::SimConfig;
use scorch_core::events::SimEvent;
use scorch_core::weapons::WeaponTable;
use scorch_terrain::TerrainRaster;

use self::behavior::BehaviorContext;
use self::explosion::ExplosionQueue;

/// Mutable view of the engine state a projectile step may touch.
pub struct StepContext<'a> {
    pub terrain: &'a mut TerrainRaster,
    pub actors: &'a mut [Actor],
    pub weapons: &'a WeaponTable,
    pub config: &'a SimConfig,
    pub rng: &'a mut ChaCha8Rng,
    pub wind: f64,
    pub explosions: &'a mut ExplosionQueue,
    pub events: &'a mut Vec<SimEvent>,
    /// Projectiles created this step. Spawned after every live projectile ran.
    pub spawn: &'a mut Vec<ProjectileSpec>,
}

impl StepContext<'_> {
    /// Read-only terrain plus the rng, for behavior handlers.
    pub fn behavior(&mut self) -> BehaviorContext<'_> {
        BehaviorContext {
            terrain: self.terrain,
            weapons: self.weapons,
            config: self.config,
            rng: self.rng,
        }
    }
}
