//! ECS components and actor state.
//!
//! Components are plain data. Flight and behavior logic lives in the
//! simulation systems; the helpers here only build or classify state.

use std::collections::VecDeque;

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BehaviorKind, GuidanceKind, ShieldKind};
use crate::types::{ActorId, WeaponId};

/// What detonates when the projectile resolves an impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warhead {
    /// The weapon's own behavior handles the impact.
    #[default]
    Weapon,
    /// Spawned by another projectile; explodes with the carried radius.
    Sub { radius: i32 },
}

/// Behavior-specific sub-state. Each variant carries only what its behavior needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    None,
    /// Roller sliding along the surface.
    Rolling {
        direction: f64,
        speed: f64,
        frames: u32,
    },
    /// MIRV watching for apogee.
    SplitTracked {
        previous_vy: Option<f64>,
        has_split: bool,
    },
    /// Leapfrog bounce budget.
    Bouncing { bounces: u32 },
    /// Napalm or dirt particle.
    Particle { remaining_life: u32, soil: bool },
}

/// Guidance lifecycle: armed at launch, locked once its trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Guidance {
    Armed(GuidanceKind),
    /// Frozen velocity correction applied every step.
    Locked { kind: GuidanceKind, correction: DVec2 },
}

/// A live projectile. Stored as a hecs component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec2,
    /// Pixels per second, vy positive upward.
    pub velocity: DVec2,
    pub weapon: WeaponId,
    pub owner: ActorId,
    /// Physics steps survived.
    pub age: u32,
    pub trail: VecDeque<IVec2>,
    pub active: bool,
    pub warhead: Warhead,
    pub state: BehaviorState,
    pub guidance: Option<Guidance>,
}

/// Everything needed to create a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub position: DVec2,
    pub velocity: DVec2,
    pub weapon: WeaponId,
    pub owner: ActorId,
    pub warhead: Warhead,
    pub state: BehaviorState,
}

/// Consumable items the core reads and decrements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub heat_guidance: u32,
    pub horizontal_guidance: u32,
    pub vertical_guidance: u32,
    pub parachutes: u32,
}

/// In-progress fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallState {
    /// Ground line when the fall began.
    pub start_y: i32,
}

/// Tank state. Owned by the turn machine, damaged by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Center column.
    pub x: i32,
    /// Ground line (row of the terrain under the body).
    pub y: i32,
    pub alive: bool,
    pub energy: i32,
    pub shield: ShieldKind,
    pub shield_energy: i32,
    pub inventory: Inventory,
    pub falling: Option<FallState>,
}

impl BehaviorState {
    /// Initial sub-state for a freshly launched projectile.
    pub fn initial_for(behavior: BehaviorKind) -> Self {
        match behavior {
            BehaviorKind::Mirv => BehaviorState::SplitTracked {
                previous_vy: None,
                has_split: false,
            },
            BehaviorKind::Bounce => BehaviorState::Bouncing { bounces: 0 },
            _ => BehaviorState::None,
        }
    }
}

impl Guidance {
    pub fn kind(&self) -> GuidanceKind {
        match *self {
            Guidance::Armed(kind) | Guidance::Locked { kind, .. } => kind,
        }
    }
}

impl Projectile {
    pub fn from_spec(spec: ProjectileSpec) -> Self {
        Self {
            position: spec.position,
            velocity: spec.velocity,
            weapon: spec.weapon,
            owner: spec.owner,
            age: 0,
            trail: VecDeque::with_capacity(TRAIL_LEN),
            active: true,
            warhead: spec.warhead,
            state: spec.state,
            guidance: None,
        }
    }

    /// Screen pixel under the projectile.
    pub fn pixel(&self) -> IVec2 {
        IVec2::new(self.position.x.round() as i32, self.position.y.round() as i32)
    }

    /// Push the current pixel onto the bounded trail.
    pub fn record_trail(&mut self) {
        if self.trail.len() == TRAIL_LEN {
            self.trail.pop_front();
        }
        let pixel = self.pixel();
        self.trail.push_back(pixel);
    }

    pub fn is_particle(&self) -> bool {
        matches!(self.state, BehaviorState::Particle { .. })
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.state, BehaviorState::Rolling { .. })
    }

    pub fn is_sub_warhead(&self) -> bool {
        matches!(self.warhead, Warhead::Sub { .. })
    }
}

impl ProjectileSpec {
    /// A sub-warhead that inherits the parent's attacker but none of its state.
    pub fn sub_warhead(
        position: DVec2,
        velocity: DVec2,
        weapon: WeaponId,
        owner: ActorId,
        radius: i32,
    ) -> Self {
        Self {
            position,
            velocity,
            weapon,
            owner,
            warhead: Warhead::Sub { radius },
            state: BehaviorState::None,
        }
    }

    pub fn particle(
        position: DVec2,
        velocity: DVec2,
        weapon: WeaponId,
        owner: ActorId,
        remaining_life: u32,
        soil: bool,
    ) -> Self {
        Self {
            position,
            velocity,
            weapon,
            owner,
            warhead: Warhead::Weapon,
            state: BehaviorState::Particle {
                remaining_life,
                soil,
            },
        }
    }
}

impl Actor {
    pub fn new(id: ActorId, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            alive: true,
            energy: ACTOR_START_ENERGY,
            shield: ShieldKind::None,
            shield_energy: 0,
            inventory: Inventory::default(),
            falling: None,
        }
    }

    /// Raise a fresh shield, replacing any active one.
    pub fn raise_shield(&mut self, shield: ShieldKind) {
        self.shield = shield;
        self.shield_energy = shield.capacity();
    }

    /// Point guidance and damage aim at: the middle of the body.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64 - ACTOR_CENTER_OFFSET)
    }

    /// Where a shot leaves the barrel at `angle_deg` (0 = right, 90 = up).
    pub fn barrel_tip(&self, angle_deg: f64) -> DVec2 {
        let angle = angle_deg.to_radians();
        let dome_top = (self.y - ACTOR_BODY_HEIGHT - ACTOR_DOME_HEIGHT) as f64;
        DVec2::new(
            self.x as f64 + angle.cos() * BARREL_LENGTH,
            dome_top - angle.sin() * BARREL_LENGTH,
        )
    }

    pub fn has_live_shield(&self) -> bool {
        self.shield != ShieldKind::None && self.shield_energy > 0
    }
}
