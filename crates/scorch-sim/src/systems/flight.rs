//! Per-projectile step: flight behavior, guidance, integration, impact.

use tracing::debug;

use scorch_core::components::Projectile;
use scorch_core::enums::FlightStatus;
use scorch_core::events::SimEvent;
use scorch_core::types::ActorId;

use super::{behavior, damage, guidance, impact, physics, StepContext};

/// Advance one projectile through a full physics step.
pub fn step_projectile(projectile: &mut Projectile, ctx: &mut StepContext) {
    if !projectile.active {
        return;
    }

    // 1. Flight-phase behavior (split, roll, particle life)
    let effect = behavior::advance_flight_behavior(projectile, &mut ctx.behavior());
    impact::apply_flight(projectile, effect, ctx);
    if !projectile.active {
        return;
    }

    // 2. Guidance
    if let Some(kind) = guidance::apply(projectile, ctx.actors) {
        debug!(owner = %projectile.owner, ?kind, "guidance locked");
        ctx.events.push(SimEvent::GuidanceLocked {
            owner: projectile.owner,
            kind,
        });
    }

    // 3. Integration
    let status = physics::advance_projectile(projectile, ctx.terrain, ctx.config, ctx.wind);

    // 4. Impact phase
    resolve(projectile, status, ctx);
}

/// Act on a flight status: retire, deflect or dispatch the impact.
pub fn resolve(projectile: &mut Projectile, status: FlightStatus, ctx: &mut StepContext) {
    match status {
        FlightStatus::Flying => {}
        FlightStatus::Offscreen => {
            debug!(owner = %projectile.owner, "projectile left the arena");
            projectile.active = false;
        }
        FlightStatus::HitTank(actor) if try_deflect(projectile, actor, ctx) => {}
        FlightStatus::HitTerrain | FlightStatus::HitTank(_) | FlightStatus::HitWall => {
            let Some(hit) = status.hit_kind() else {
                return;
            };
            let pixel = projectile.pixel();
            ctx.events.push(SimEvent::Impact {
                x: pixel.x,
                y: pixel.y,
                hit,
            });
            let effect = behavior::resolve_impact(projectile, hit, &mut ctx.behavior());
            impact::apply_impact(projectile, effect, ctx);
        }
    }
}

fn try_deflect(projectile: &mut Projectile, actor: ActorId, ctx: &mut StepContext) -> bool {
    let Some(target) = ctx.actors.iter_mut().find(|a| a.id == actor) else {
        return false;
    };
    let Some(depleted) = damage::deflect(target, projectile, ctx.rng) else {
        return false;
    };
    ctx.events.push(SimEvent::ShieldDeflected { actor });
    if depleted {
        ctx.events.push(SimEvent::ShieldDepleted { actor });
    }
    true
}
