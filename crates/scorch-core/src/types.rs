//! Fundamental identifier and timing types.

use serde::{Deserialize, Serialize};

/// Index of an actor (tank) in the actor table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

/// Index of a weapon descriptor in the weapon table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponId(pub usize);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Outer frames elapsed.
    pub frame: u64,
    /// Physics steps elapsed.
    pub step: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl ActorId {
    /// First raster value owned by this actor.
    pub fn palette_base(self) -> u8 {
        (self.0 as u8).saturating_mul(crate::constants::ACTOR_PALETTE_STRIDE)
    }
}

impl SimTime {
    /// Advance by one physics step.
    pub fn advance_step(&mut self) {
        self.step += 1;
        self.elapsed_secs += crate::constants::DT;
    }

    /// Advance by one outer frame.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}
