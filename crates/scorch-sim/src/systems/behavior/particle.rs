//! Napalm and liquid dirt: a burst of short-lived particles that burn or
//! deposit dirt where they come to rest.

use std::f64::consts::TAU;

use glam::{DVec2, IVec2};
use rand::Rng;

use scorch_core::components::{BehaviorState, Projectile, ProjectileSpec};
use scorch_core::constants::*;
use scorch_core::effects::{FlightEffect, ImpactEffect, TerrainOp};
use scorch_core::enums::HitKind;
use scorch_core::weapons::WeaponDescriptor;
use scorch_terrain::{classify_at, Contact, TerrainRaster};

use super::BehaviorContext;

/// Napalm impact: a small blast plus `min(|param|, 20)` particles.
/// A negative param throws dirt instead of fire.
pub fn napalm(
    projectile: &Projectile,
    weapon: &WeaponDescriptor,
    ctx: &mut BehaviorContext,
) -> ImpactEffect {
    let soil = weapon.param < 0;
    let count = (weapon.param.unsigned_abs() as usize).min(NAPALM_MAX_PARTICLES);
    let origin = projectile.position;

    let spawn = (0..count)
        .map(|_| {
            let angle = ctx.rng.gen::<f64>() * TAU;
            let speed = ctx.rng.gen::<f64>() * 150.0 + 50.0;
            let velocity = DVec2::new(
                angle.cos() * speed,
                angle.sin() * speed * 0.5 + 50.0,
            );
            let life = 60 + ctx.rng.gen_range(0..40);
            ProjectileSpec::particle(
                origin,
                velocity,
                projectile.weapon,
                projectile.owner,
                life,
                soil,
            )
        })
        .collect();

    ImpactEffect::explode(NAPALM_BLAST_RADIUS).with_spawn(spawn)
}

/// Liquid dirt impact: a slow spray of soil particles, no blast.
pub fn liquid_dirt(projectile: &Projectile, ctx: &mut BehaviorContext) -> ImpactEffect {
    let origin = projectile.position;
    let spawn = (0..LIQUID_PARTICLES)
        .map(|_| {
            let angle = ctx.rng.gen::<f64>() * TAU;
            let speed = ctx.rng.gen::<f64>() * 100.0 + 25.0;
            let velocity = DVec2::new(
                angle.cos() * speed,
                angle.sin() * speed * 0.3 + 25.0,
            );
            let life = 80 + ctx.rng.gen_range(0..40);
            ProjectileSpec::particle(
                origin,
                velocity,
                projectile.weapon,
                projectile.owner,
                life,
                true,
            )
        })
        .collect();

    ImpactEffect::inert().with_spawn(spawn)
}

/// Per-step particle update: burn down life, damp velocity, expire when
/// spent or nearly still.
pub fn flight_step(projectile: &mut Projectile, ctx: &mut BehaviorContext) -> FlightEffect {
    let BehaviorState::Particle {
        remaining_life,
        soil,
    } = projectile.state
    else {
        return FlightEffect::none();
    };

    let remaining_life = remaining_life.saturating_sub(1);
    projectile.state = BehaviorState::Particle {
        remaining_life,
        soil,
    };
    if remaining_life == 0 {
        return expire(projectile, soil, ctx.terrain);
    }

    projectile.velocity *= ctx.config.particle_damping;
    if projectile.velocity.length_squared() < PARTICLE_MIN_SPEED_SQ {
        return expire(projectile, soil, ctx.terrain);
    }

    FlightEffect::none()
}

/// A particle that ran into something during integration.
pub fn on_impact(soil: bool, hit: HitKind) -> ImpactEffect {
    match (hit, soil) {
        (HitKind::Wall, _) => ImpactEffect::inert(),
        (_, true) => ImpactEffect::terrain(TerrainOp::DirtAdd {
            radius: PARTICLE_DEPOSIT_RADIUS,
        }),
        (_, false) => ImpactEffect::explode(PARTICLE_BURN_RADIUS),
    }
}

/// Burn or deposit when resting on terrain, otherwise fizzle.
fn expire(projectile: &Projectile, soil: bool, terrain: &TerrainRaster) -> FlightEffect {
    let pixel = projectile.pixel();
    if !touches_terrain(terrain, pixel) {
        return FlightEffect::remove();
    }
    if soil {
        FlightEffect {
            terrain_op: TerrainOp::DirtAdd {
                radius: PARTICLE_DEPOSIT_RADIUS,
            },
            ..FlightEffect::remove()
        }
    } else {
        FlightEffect::detonate(PARTICLE_BURN_RADIUS)
    }
}

fn touches_terrain(terrain: &TerrainRaster, pixel: IVec2) -> bool {
    classify_at(terrain, pixel.x, pixel.y) == Contact::Terrain
        || classify_at(terrain, pixel.x, pixel.y + 1) == Contact::Terrain
}
