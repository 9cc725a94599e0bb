//! Behavior dispatch: what a projectile does when it hits something and what
//! it does every step while it flies.
//!
//! Handlers return effects and never mutate the terrain or actors. The
//! engine applies the effect (explosion, terrain op, spawns) in a fixed order
//! so the next collision sample always sees the mutation.

pub mod mirv;
pub mod particle;
pub mod roller;
pub mod scatter;

use rand_chacha::ChaCha8Rng;
use tracing::warn;

use scorch_core::components::{BehaviorState, Projectile, Warhead};
use scorch_core::config::SimConfig;
use scorch_core::constants::*;
use scorch_core::effects::{FlightEffect, ImpactEffect, TerrainOp};
use scorch_core::enums::{BehaviorKind, HitKind};
use scorch_core::weapons::{WeaponDescriptor, WeaponTable};
use scorch_terrain::TerrainRaster;

/// Read-only world plus the shared rng, for behavior handlers.
pub struct BehaviorContext<'a> {
    pub terrain: &'a TerrainRaster,
    pub weapons: &'a WeaponTable,
    pub config: &'a SimConfig,
    pub rng: &'a mut ChaCha8Rng,
}

/// Impact phase: called once when a projectile stops flying.
pub fn resolve_impact(
    projectile: &mut Projectile,
    hit: HitKind,
    ctx: &mut BehaviorContext,
) -> ImpactEffect {
    if let Warhead::Sub { radius } = projectile.warhead {
        return ImpactEffect::explode(radius);
    }
    if let BehaviorState::Particle { soil, .. } = projectile.state {
        return particle::on_impact(soil, hit);
    }

    let Some(weapon) = ctx.weapons.get(projectile.weapon) else {
        warn!(weapon = projectile.weapon.0, "unknown weapon on impact, using default blast");
        return ImpactEffect::explode(DEFAULT_BLAST_RADIUS);
    };

    match weapon.behavior {
        BehaviorKind::Standard => ImpactEffect::explode(weapon.param),
        BehaviorKind::Tracer => ImpactEffect::inert(),
        BehaviorKind::Roller => roller::on_impact(projectile, hit, weapon, ctx),
        BehaviorKind::Bounce => bounce(projectile, hit, weapon),
        BehaviorKind::Mirv => ImpactEffect::explode(MIRV_IMPACT_RADIUS),
        BehaviorKind::Napalm => particle::napalm(projectile, weapon, ctx),
        BehaviorKind::LiquidDirt => particle::liquid_dirt(projectile, ctx),
        BehaviorKind::DirtAdd => ImpactEffect::terrain(TerrainOp::DirtAdd {
            radius: weapon.param,
        }),
        BehaviorKind::DirtTower => ImpactEffect::terrain(TerrainOp::DirtTower {
            height: DIRT_TOWER_HEIGHT,
        }),
        BehaviorKind::Tunnel => ImpactEffect::terrain(TerrainOp::Tunnel {
            depth: weapon.param.abs(),
            down: weapon.param < 0,
        }),
        BehaviorKind::Plasma => ImpactEffect::explode(plasma_radius(projectile, weapon)),
        BehaviorKind::Riot => ImpactEffect {
            earth_moving: true,
            ..ImpactEffect::explode(weapon.param)
        },
        BehaviorKind::Disrupter => ImpactEffect::terrain(TerrainOp::Disrupt {
            radius: DISRUPTER_RADIUS,
        }),
        BehaviorKind::DirtCharge => ImpactEffect {
            terrain_op: TerrainOp::DirtAdd {
                radius: DIRT_CHARGE_RADIUS,
            },
            ..ImpactEffect::explode(DIRT_CHARGE_RADIUS)
        },
        BehaviorKind::Scatter => scatter::on_impact(projectile, weapon, ctx),
        BehaviorKind::None => ImpactEffect::explode(weapon.fallback_radius()),
    }
}

/// Flight phase: called every step before integration.
pub fn advance_flight_behavior(
    projectile: &mut Projectile,
    ctx: &mut BehaviorContext,
) -> FlightEffect {
    if !projectile.active || projectile.is_sub_warhead() {
        return FlightEffect::none();
    }
    if projectile.is_particle() {
        return particle::flight_step(projectile, ctx);
    }

    let Some(weapon) = ctx.weapons.get(projectile.weapon) else {
        return FlightEffect::none();
    };

    match weapon.behavior {
        BehaviorKind::Roller => roller::flight_step(projectile, weapon, ctx),
        BehaviorKind::Mirv => mirv::flight_step(projectile, weapon),
        BehaviorKind::Standard
        | BehaviorKind::Tracer
        | BehaviorKind::Bounce
        | BehaviorKind::Napalm
        | BehaviorKind::LiquidDirt
        | BehaviorKind::DirtAdd
        | BehaviorKind::DirtTower
        | BehaviorKind::Tunnel
        | BehaviorKind::Plasma
        | BehaviorKind::Riot
        | BehaviorKind::Disrupter
        | BehaviorKind::DirtCharge
        | BehaviorKind::Scatter
        | BehaviorKind::None => FlightEffect::none(),
    }
}

/// Leapfrog: small blasts on each terrain bounce, a big one on the last.
fn bounce(projectile: &mut Projectile, hit: HitKind, weapon: &WeaponDescriptor) -> ImpactEffect {
    if hit != HitKind::Terrain {
        return ImpactEffect::explode(BOUNCE_FINAL_RADIUS);
    }
    let bounces = match projectile.state {
        BehaviorState::Bouncing { bounces } => bounces + 1,
        _ => 1,
    };
    projectile.state = BehaviorState::Bouncing { bounces };
    // The final impact counts as one of the `param` bounces.
    if bounces as i32 >= weapon.param {
        return ImpactEffect::explode(BOUNCE_FINAL_RADIUS);
    }

    let v = &mut projectile.velocity;
    v.y = v.y.abs() * BOUNCE_REFLECT;
    v.x *= BOUNCE_DAMPING;
    projectile.position.y -= BOUNCE_LIFT;

    ImpactEffect {
        keep_alive: true,
        ..ImpactEffect::explode(BOUNCE_BLAST_RADIUS)
    }
}

/// Plasma grows with impact speed; the riot charge is fixed.
fn plasma_radius(projectile: &Projectile, weapon: &WeaponDescriptor) -> i32 {
    if weapon.param == 0 {
        let speed = projectile.velocity.length();
        (speed * PLASMA_SPEED_FACTOR + PLASMA_BASE_RADIUS).floor() as i32
    } else {
        PLASMA_FIXED_RADIUS
    }
}
