//! Weapon descriptors and the read-only weapon table.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BLAST_RADIUS;
use crate::enums::{BehaviorKind, WeaponCategory};
use crate::types::WeaponId;

/// Immutable weapon description shared by every projectile that fires it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDescriptor {
    pub name: String,
    pub behavior: BehaviorKind,
    /// Radius, bounce count, particle count or dig depth. Sign encodes direction.
    pub param: i32,
    pub category: WeaponCategory,
}

/// Lookup table of weapon descriptors, indexed by [`WeaponId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponTable {
    weapons: Vec<WeaponDescriptor>,
}

impl WeaponDescriptor {
    pub fn new(name: &str, behavior: BehaviorKind, param: i32, category: WeaponCategory) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            param,
            category,
        }
    }

    /// Blast radius used when the behavior has nothing better: `|param|`, or 10.
    pub fn fallback_radius(&self) -> i32 {
        match self.param.abs() {
            0 => DEFAULT_BLAST_RADIUS,
            r => r,
        }
    }

    /// Whether the descriptor can be launched as a projectile.
    pub fn is_fireable(&self) -> bool {
        self.category == WeaponCategory::Weapon
    }
}

impl WeaponTable {
    pub fn new(weapons: Vec<WeaponDescriptor>) -> Self {
        Self { weapons }
    }

    /// The classic catalogue.
    pub fn standard() -> Self {
        use BehaviorKind::*;
        use WeaponCategory::{Accessory, Defense, Guidance, Weapon};

        let entries: &[(&str, BehaviorKind, i32, WeaponCategory)] = &[
            ("Baby Missile", Standard, 10, Weapon),
            ("Missile", Standard, 20, Weapon),
            ("Baby Nuke", Standard, 40, Weapon),
            ("Nuke", Standard, 75, Weapon),
            ("LeapFrog", Bounce, 3, Weapon),
            ("Funky Bomb", Scatter, 80, Weapon),
            ("Popcorn Bomb", Scatter, 0, Weapon),
            ("MIRV", Mirv, 0, Weapon),
            ("Death's Head", Mirv, 1, Weapon),
            ("Napalm", Napalm, 15, Weapon),
            ("Hot Napalm", Napalm, 20, Weapon),
            ("Tracer", Tracer, 0, Weapon),
            ("Smoke Tracer", Tracer, 1, Weapon),
            ("Baby Roller", Roller, 10, Weapon),
            ("Roller", Roller, 20, Weapon),
            ("Heavy Roller", Roller, 45, Weapon),
            ("Plasma Blast", Plasma, 0, Weapon),
            ("Riot Charge", Plasma, 1, Weapon),
            ("Riot Blast", Riot, 30, Weapon),
            ("Riot Bomb", Riot, 45, Weapon),
            ("Heavy Riot Bomb", Tunnel, -10, Weapon),
            ("Baby Digger", Tunnel, -20, Weapon),
            ("Digger", Tunnel, -35, Weapon),
            ("Heavy Digger", Tunnel, 10, Weapon),
            ("Baby Sandhog", Tunnel, 20, Weapon),
            ("Sandhog", Tunnel, 35, Weapon),
            ("Heavy Sandhog", DirtAdd, 20, Weapon),
            ("Dirt Clod", DirtAdd, 35, Weapon),
            ("Dirt Ball", DirtAdd, 70, Weapon),
            ("Ton of Dirt", Napalm, -20, Weapon),
            ("Liquid Dirt", LiquidDirt, 0, Weapon),
            ("Dirt Charge", DirtCharge, 0, Weapon),
            ("Dirt Tower", DirtTower, 0, Weapon),
            ("Earth Disrupter", Disrupter, 0, Weapon),
            ("Heat Guidance", None, 0, Guidance),
            ("Horz Guidance", None, 0, Guidance),
            ("Vert Guidance", None, 0, Guidance),
            ("Parachute", None, 0, Accessory),
            ("Shield", None, 0, Defense),
            ("Warp Shield", None, 0, Defense),
            ("Teleport Shield", None, 0, Defense),
            ("Flicker Shield", None, 0, Defense),
            ("Force Shield", None, 0, Defense),
            ("Heavy Shield", None, 0, Defense),
        ];

        Self::new(
            entries
                .iter()
                .map(|&(name, behavior, param, category)| {
                    WeaponDescriptor::new(name, behavior, param, category)
                })
                .collect(),
        )
    }

    pub fn get(&self, id: WeaponId) -> Option<&WeaponDescriptor> {
        self.weapons.get(id.0)
    }

    /// Find a weapon by its display name (case-insensitive).
    pub fn id_of(&self, name: &str) -> Option<WeaponId> {
        self.weapons
            .iter()
            .position(|w| w.name.eq_ignore_ascii_case(name))
            .map(WeaponId)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeaponId, &WeaponDescriptor)> {
        self.weapons.iter().enumerate().map(|(i, w)| (WeaponId(i), w))
    }
}
