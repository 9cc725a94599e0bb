//! Explosion damage and shield handling.
//!
//! Damage is directional when the blast carries the projectile's velocity:
//! the displacement to each victim rotates the negated velocity, and the
//! momentum decays between victims. Without velocity it falls off linearly.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use scorch_core::components::{Actor, Projectile};
use scorch_core::constants::*;
use scorch_core::enums::ShieldKind;
use scorch_core::types::ActorId;

/// Damage dealt to one actor by one blast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorHit {
    pub actor: ActorId,
    /// Energy lost after shields.
    pub damage: i32,
    /// Taken by the shield.
    pub absorbed: i32,
    pub shield_depleted: bool,
}

/// Everything one blast did to the actor table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    pub hits: Vec<ActorHit>,
    pub deaths: Vec<ActorId>,
}

/// Damage every living actor within `radius + 10` of `center`.
///
/// `carried` is the impacting projectile's velocity; `None` uses linear
/// falloff. With `self_damage` off the attacker is skipped.
pub fn apply_explosion_damage(
    actors: &mut [Actor],
    center: DVec2,
    radius: i32,
    attacker: ActorId,
    carried: Option<DVec2>,
    self_damage: bool,
    rng: &mut ChaCha8Rng,
) -> DamageReport {
    let mut report = DamageReport::default();
    let r = radius as f64;
    let mut velocity = carried;

    for actor in actors.iter_mut() {
        if !actor.alive || (!self_damage && actor.id == attacker) {
            continue;
        }

        let d = DVec2::new(actor.x as f64 - center.x, center.y - actor.y as f64);
        let dist = d.length();
        if dist > r + DAMAGE_MARGIN {
            continue;
        }

        let raw = match velocity {
            Some(v) if is_moving(v) => {
                velocity = Some(v * CARRIED_VELOCITY_DECAY);
                directional_damage(v, d, r)
            }
            _ => ((1.0 - dist / (r + DAMAGE_MARGIN)) * r).floor().max(0.0) as i32,
        };
        if raw <= 0 {
            continue;
        }

        let (damage, absorbed, shield_depleted) = absorb(actor, raw, rng);
        actor.energy -= damage;
        debug!(actor = %actor.id, raw, damage, absorbed, "blast hit");

        if actor.energy <= 0 {
            actor.energy = 0;
            actor.alive = false;
            info!(actor = %actor.id, attacker = %attacker, "actor destroyed");
            report.deaths.push(actor.id);
        }
        report.hits.push(ActorHit {
            actor: actor.id,
            damage,
            absorbed,
            shield_depleted,
        });
    }

    report
}

fn is_moving(v: DVec2) -> bool {
    v.x.abs() > CARRIED_VELOCITY_EPSILON || v.y.abs() > CARRIED_VELOCITY_EPSILON
}

fn directional_damage(velocity: DVec2, displacement: DVec2, radius: f64) -> i32 {
    let adjusted = 2.0 * (velocity.y.atan2(velocity.x) - displacement.y.atan2(displacement.x));
    let rotated = DVec2::from_angle(-adjusted).rotate(-velocity);
    (rotated.length() * radius / 100.0).floor() as i32
}

/// Shield takes damage first, 1:1. Flicker shields are off half the time.
/// Returns `(damage through, absorbed, shield depleted)`.
fn absorb(actor: &mut Actor, damage: i32, rng: &mut ChaCha8Rng) -> (i32, i32, bool) {
    if !actor.has_live_shield() {
        return (damage, 0, false);
    }
    if actor.shield == ShieldKind::Flicker && rng.gen_bool(0.5) {
        return (damage, 0, false);
    }
    if actor.shield_energy >= damage {
        actor.shield_energy -= damage;
        return (0, damage, false);
    }
    let absorbed = actor.shield_energy;
    actor.shield_energy = 0;
    actor.shield = ShieldKind::None;
    (damage - absorbed, absorbed, true)
}

/// Force and heavy shields bounce an incoming projectile away at a cost of
/// up to 10 shield energy. Returns whether the projectile was deflected and
/// whether the shield dropped.
pub fn deflect(
    actor: &mut Actor,
    projectile: &mut Projectile,
    rng: &mut ChaCha8Rng,
) -> Option<bool> {
    if !actor.alive || !actor.shield.deflects() || actor.shield_energy <= 0 {
        return None;
    }

    actor.shield_energy -= DEFLECT_COST.min(actor.shield_energy);
    let depleted = actor.shield_energy <= 0;
    if depleted {
        actor.shield = ShieldKind::None;
    }

    // Each axis gets its own restitution and jitter draw.
    let v = &mut projectile.velocity;
    v.x = -v.x * (0.6 + rng.gen::<f64>() * 0.4);
    v.y = -v.y * (0.6 + rng.gen::<f64>() * 0.4);
    v.x += (rng.gen::<f64>() - 0.5) * 100.0;
    v.y += (rng.gen::<f64>() - 0.5) * 50.0;
    projectile.position.x += v.x.signum() * 5.0;
    projectile.position.y -= v.y.signum() * 5.0;

    Some(depleted)
}
