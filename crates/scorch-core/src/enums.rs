//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::ActorId;

/// Weapon behavior tag. Selects the impact and flight handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Plain blast with the descriptor's radius.
    Standard,
    /// Cosmetic flight, no blast.
    Tracer,
    /// Rolls along the terrain surface before detonating.
    Roller,
    /// Leapfrog: bounces off terrain `param` times.
    Bounce,
    /// Splits into sub-warheads at apogee.
    Mirv,
    /// Fire particles (or soil particles for a negative parameter).
    Napalm,
    /// Soil particles.
    LiquidDirt,
    /// Fills a disc with dirt.
    DirtAdd,
    /// Raises a narrow column of dirt.
    DirtTower,
    /// Digs a strip; negative parameter digs downward.
    Tunnel,
    /// Blast radius depends on impact speed.
    Plasma,
    /// Earth-moving blast.
    Riot,
    /// Compacts floating terrain.
    Disrupter,
    /// Small blast plus a dirt fill.
    DirtCharge,
    /// Funky/popcorn bomb: rains sub-bombs from the top of the playfield.
    Scatter,
    /// No projectile behavior (accessories, shields).
    None,
}

/// Weapon category, mirrors the shop grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    #[default]
    Weapon,
    Guidance,
    Defense,
    Accessory,
}

/// What happens when a projectile reaches a side wall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallPolicy {
    /// Detonate on contact.
    #[default]
    Concrete,
    /// Reappear on the opposite side.
    Wrap,
    /// Reflect with 0.8x horizontal speed.
    Rubber,
    /// Reflect with 1.2x horizontal speed.
    Spring,
    /// Reflect with 0.5x horizontal speed.
    Padded,
    /// Fly off the screen.
    None,
}

/// Result of advancing one projectile one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightStatus {
    Flying,
    HitTerrain,
    HitTank(ActorId),
    HitWall,
    Offscreen,
}

/// What a projectile struck, passed to the impact handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Terrain,
    Tank(ActorId),
    Wall,
}

/// Guidance item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuidanceKind {
    /// Locks when level with the target and steers sideways.
    Horizontal,
    /// Locks when above or below the target and steers vertically.
    Vertical,
    /// Locks within range of the target and homes toward it.
    Heat,
}

/// Active shield type on an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldKind {
    #[default]
    None,
    Standard,
    Warp,
    Teleport,
    Force,
    Heavy,
    Flicker,
}

/// Terrain generator profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandType {
    Flat,
    Slope,
    #[default]
    Rolling,
    Mountain,
    VShaped,
    Castle,
}

impl FlightStatus {
    /// The impact kind for a terminal status, `None` while flying or offscreen.
    pub fn hit_kind(self) -> Option<HitKind> {
        match self {
            FlightStatus::HitTerrain => Some(HitKind::Terrain),
            FlightStatus::HitTank(actor) => Some(HitKind::Tank(actor)),
            FlightStatus::HitWall => Some(HitKind::Wall),
            FlightStatus::Flying | FlightStatus::Offscreen => None,
        }
    }
}

impl ShieldKind {
    /// Full energy of a freshly raised shield.
    pub fn capacity(self) -> i32 {
        match self {
            ShieldKind::None => 0,
            ShieldKind::Standard => 55,
            ShieldKind::Warp | ShieldKind::Teleport => 100,
            ShieldKind::Force => 150,
            ShieldKind::Heavy => 200,
            ShieldKind::Flicker => 80,
        }
    }

    /// Force and heavy shields bounce projectiles away instead of absorbing them.
    pub fn deflects(self) -> bool {
        matches!(self, ShieldKind::Force | ShieldKind::Heavy)
    }
}

impl WallPolicy {
    /// Reflection factor for bouncing walls.
    pub fn reflection(self) -> Option<f64> {
        use crate::constants::{PADDED_REFLECT, RUBBER_REFLECT, SPRING_REFLECT};
        match self {
            WallPolicy::Rubber => Some(RUBBER_REFLECT),
            WallPolicy::Spring => Some(SPRING_REFLECT),
            WallPolicy::Padded => Some(PADDED_REFLECT),
            WallPolicy::Concrete | WallPolicy::Wrap | WallPolicy::None => None,
        }
    }
}
