//! Events emitted by the simulation for scoring, animation and sound.

use serde::{Deserialize, Serialize};

use crate::effects::TerrainOp;
use crate::enums::{GuidanceKind, HitKind};
use crate::types::{ActorId, WeaponId};

/// Everything observable that happened during a frame, in program order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A shot left a barrel.
    Launched {
        owner: ActorId,
        weapon: WeaponId,
        guidance: Option<GuidanceKind>,
    },
    /// A projectile stopped flying.
    Impact { x: i32, y: i32, hit: HitKind },
    /// Blast carved and queued for animation.
    Explosion {
        x: i32,
        y: i32,
        radius: i32,
        attacker: ActorId,
    },
    /// A non-crater terrain mutation.
    TerrainChanged { x: i32, y: i32, op: TerrainOp },
    /// A behavior created new projectiles.
    Spawned { weapon: WeaponId, count: usize },
    /// Guidance acquired its target.
    GuidanceLocked { owner: ActorId, kind: GuidanceKind },
    /// A force or heavy shield bounced a projectile.
    ShieldDeflected { actor: ActorId },
    /// A shield ran out of energy and dropped.
    ShieldDepleted { actor: ActorId },
    /// Energy lost by an actor after shields.
    ActorDamaged {
        actor: ActorId,
        damage: i32,
        absorbed: i32,
    },
    /// Energy reached zero.
    ActorKilled { actor: ActorId, attacker: ActorId },
    /// An actor finished a fall.
    ActorLanded {
        actor: ActorId,
        distance: i32,
        damage: i32,
        parachute: bool,
    },
    WindChanged { wind: f64 },
}
