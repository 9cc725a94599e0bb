//! Applies behavior effects to the world in a fixed order: blast, terrain
//! op, spawns, retirement. Every raster write lands before the next sample.

use glam::{DVec2, IVec2};
use tracing::debug;

use scorch_core::components::{Projectile, ProjectileSpec};
use scorch_core::effects::{FlightEffect, ImpactEffect, TerrainOp};
use scorch_core::events::SimEvent;
use scorch_core::types::{ActorId, WeaponId};
use scorch_terrain::mutator;
use scorch_terrain::TerrainRaster;

use super::damage::{self, DamageReport};
use super::StepContext;

/// One explosion, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub center: IVec2,
    pub radius: i32,
    pub attacker: ActorId,
    /// Impact velocity for directional damage.
    pub carried: Option<DVec2>,
    pub skip_damage: bool,
    /// Compact the crater columns after carving.
    pub earth_moving: bool,
}

/// Apply an impact-phase effect for `projectile`.
pub fn apply_impact(projectile: &mut Projectile, effect: ImpactEffect, ctx: &mut StepContext) {
    let effect = effect.scaled(ctx.config.explosion_scale);
    let center = projectile.pixel();

    if effect.explode && effect.radius > 0 {
        let carried = (!projectile.is_particle()).then_some(projectile.velocity);
        explode(
            ctx,
            Blast {
                center,
                radius: effect.radius,
                attacker: projectile.owner,
                carried,
                skip_damage: effect.skip_damage,
                earth_moving: effect.earth_moving,
            },
        );
    }
    apply_terrain_op(ctx.terrain, ctx.events, center, effect.terrain_op);
    queue_spawns(ctx, projectile.weapon, effect.spawn);

    if !effect.keep_alive {
        projectile.active = false;
    }
}

/// Apply a flight-phase effect for `projectile`.
pub fn apply_flight(projectile: &mut Projectile, effect: FlightEffect, ctx: &mut StepContext) {
    let effect = effect.scaled(ctx.config.explosion_scale);
    let center = projectile.pixel();

    if let Some(radius) = effect.explode_here.filter(|&r| r > 0) {
        explode(
            ctx,
            Blast {
                center,
                radius,
                attacker: projectile.owner,
                carried: None,
                skip_damage: false,
                earth_moving: false,
            },
        );
    }
    apply_terrain_op(ctx.terrain, ctx.events, center, effect.terrain_op);
    if effect.split {
        debug!(owner = %projectile.owner, count = effect.spawn.len(), "projectile split");
    }
    queue_spawns(ctx, projectile.weapon, effect.spawn);

    if effect.remove {
        projectile.active = false;
    }
}

/// Carve the crater, hurt actors in range and queue the animation.
pub fn explode(ctx: &mut StepContext, blast: Blast) -> DamageReport {
    let Blast { center, radius, .. } = blast;
    mutator::carve_crater(ctx.terrain, center.x, center.y, radius);
    if blast.earth_moving {
        mutator::compact_terrain(ctx.terrain, center.x, center.y, radius);
    }
    ctx.explosions.push(center, radius);
    ctx.events.push(SimEvent::Explosion {
        x: center.x,
        y: center.y,
        radius,
        attacker: blast.attacker,
    });
    debug!(x = center.x, y = center.y, radius, "explosion");

    if blast.skip_damage {
        return DamageReport::default();
    }
    let report = damage::apply_explosion_damage(
        ctx.actors,
        center.as_dvec2(),
        radius,
        blast.attacker,
        blast.carried,
        ctx.config.self_damage,
        ctx.rng,
    );
    push_damage_events(ctx.events, &report, blast.attacker);
    report
}

/// Translate a damage report into events.
pub fn push_damage_events(events: &mut Vec<SimEvent>, report: &DamageReport, attacker: ActorId) {
    for hit in &report.hits {
        events.push(SimEvent::ActorDamaged {
            actor: hit.actor,
            damage: hit.damage,
            absorbed: hit.absorbed,
        });
        if hit.shield_depleted {
            events.push(SimEvent::ShieldDepleted { actor: hit.actor });
        }
    }
    for &actor in &report.deaths {
        events.push(SimEvent::ActorKilled { actor, attacker });
    }
}

/// Run a non-crater terrain mutation at `center`.
pub fn apply_terrain_op(
    terrain: &mut TerrainRaster,
    events: &mut Vec<SimEvent>,
    center: IVec2,
    op: TerrainOp,
) {
    let IVec2 { x, y } = center;
    match op {
        TerrainOp::None => return,
        TerrainOp::DirtAdd { radius } => mutator::fill_dirt(terrain, x, y, radius),
        TerrainOp::DirtTower { height } => mutator::fill_dirt_tower(terrain, x, y, height),
        TerrainOp::Tunnel { depth, down } => mutator::dig_tunnel(terrain, x, y, depth, down),
        TerrainOp::Disrupt { radius } => mutator::compact_terrain(terrain, x, y, radius),
    }
    debug!(x, y, ?op, "terrain changed");
    events.push(SimEvent::TerrainChanged { x, y, op });
}

fn queue_spawns(ctx: &mut StepContext, weapon: WeaponId, spawn: Vec<ProjectileSpec>) {
    if spawn.is_empty() {
        return;
    }
    ctx.events.push(SimEvent::Spawned {
        weapon,
        count: spawn.len(),
    });
    ctx.spawn.extend(spawn);
}
