//! Guidance: picked from the shooter's inventory at launch, locked once on
//! its trigger, then applied as a frozen velocity correction.

use glam::DVec2;

use scorch_core::components::{Actor, Guidance, Inventory, Projectile};
use scorch_core::constants::*;
use scorch_core::enums::GuidanceKind;

/// Consume one guidance item, highest priority first.
pub fn select(inventory: &mut Inventory) -> Option<GuidanceKind> {
    let slots = [
        (&mut inventory.horizontal_guidance, GuidanceKind::Horizontal),
        (&mut inventory.vertical_guidance, GuidanceKind::Vertical),
        (&mut inventory.heat_guidance, GuidanceKind::Heat),
    ];
    for (count, kind) in slots {
        if *count > 0 {
            *count -= 1;
            return Some(kind);
        }
    }
    None
}

/// Apply guidance for one step. Returns the kind when it locked this step.
pub fn apply(projectile: &mut Projectile, actors: &[Actor]) -> Option<GuidanceKind> {
    if projectile.is_particle() || projectile.is_sub_warhead() || projectile.is_rolling() {
        return None;
    }
    match projectile.guidance? {
        Guidance::Locked { correction, .. } => {
            projectile.velocity += correction;
            None
        }
        Guidance::Armed(kind) => {
            let target = nearest_enemy(projectile, actors)?;
            let correction = lock(kind, projectile.position, target)?;
            projectile.guidance = Some(Guidance::Locked { kind, correction });
            projectile.velocity += correction;
            Some(kind)
        }
    }
}

/// Center of the closest living actor other than the shooter.
fn nearest_enemy(projectile: &Projectile, actors: &[Actor]) -> Option<DVec2> {
    actors
        .iter()
        .filter(|a| a.alive && a.id != projectile.owner)
        .map(|a| a.center())
        .min_by(|a, b| {
            a.distance_squared(projectile.position)
                .total_cmp(&b.distance_squared(projectile.position))
        })
}

/// Correction to freeze if the trigger fires. Screen y grows downward while
/// velocity y grows upward.
fn lock(kind: GuidanceKind, position: DVec2, target: DVec2) -> Option<DVec2> {
    let d = target - position;
    match kind {
        GuidanceKind::Horizontal => (d.y.abs() <= GUIDANCE_ALIGN_TOLERANCE).then(|| {
            let sign = if d.x >= 0.0 { 1.0 } else { -1.0 };
            DVec2::new(sign * GUIDANCE_STRENGTH, 0.0)
        }),
        GuidanceKind::Vertical => (d.x.abs() <= GUIDANCE_ALIGN_TOLERANCE).then(|| {
            let sign = if d.y > 0.0 { -1.0 } else { 1.0 };
            DVec2::new(0.0, sign * GUIDANCE_STRENGTH)
        }),
        GuidanceKind::Heat => {
            let dist = d.length();
            if dist > HEAT_LOCK_RADIUS {
                return None;
            }
            if dist < f64::EPSILON {
                return Some(DVec2::new(0.0, -GUIDANCE_STRENGTH));
            }
            Some(DVec2::new(d.x / dist, -d.y / dist) * GUIDANCE_STRENGTH)
        }
    }
}

#[cfg(test)]
mod tests {
    use scorch_core::components::ProjectileSpec;
    use scorch_core::types::{ActorId, WeaponId};

    use super::*;

    fn shot(position: DVec2, kind: GuidanceKind) -> Projectile {
        let mut p = Projectile::from_spec(ProjectileSpec {
            position,
            velocity: DVec2::new(50.0, 0.0),
            weapon: WeaponId(0),
            owner: ActorId(0),
            warhead: Default::default(),
            state: Default::default(),
        });
        p.guidance = Some(Guidance::Armed(kind));
        p
    }

    fn actors() -> Vec<Actor> {
        vec![Actor::new(ActorId(0), 20, 150), Actor::new(ActorId(1), 200, 150)]
    }

    #[test]
    fn test_select_priority_and_decrement() {
        let mut inventory = Inventory {
            heat_guidance: 1,
            horizontal_guidance: 1,
            vertical_guidance: 2,
            parachutes: 0,
        };
        assert_eq!(select(&mut inventory), Some(GuidanceKind::Horizontal));
        assert_eq!(select(&mut inventory), Some(GuidanceKind::Vertical));
        assert_eq!(select(&mut inventory), Some(GuidanceKind::Vertical));
        assert_eq!(select(&mut inventory), Some(GuidanceKind::Heat));
        assert_eq!(select(&mut inventory), None);
        assert_eq!(inventory, Inventory::default());
    }

    #[test]
    fn test_horizontal_locks_once_and_stays_frozen() {
        let actors = actors();
        let mut p = shot(DVec2::new(100.0, 100.0), GuidanceKind::Horizontal);

        assert_eq!(apply(&mut p, &actors), None, "not aligned yet");
        assert_eq!(p.velocity, DVec2::new(50.0, 0.0));

        p.position.y = 144.0;
        assert_eq!(apply(&mut p, &actors), Some(GuidanceKind::Horizontal));
        let frozen = match p.guidance {
            Some(Guidance::Locked { correction, .. }) => correction,
            other => panic!("expected lock, got {other:?}"),
        };
        assert_eq!(frozen, DVec2::new(GUIDANCE_STRENGTH, 0.0));

        // Lose alignment, pass the target, regain alignment: same correction.
        p.position = DVec2::new(250.0, 60.0);
        assert_eq!(apply(&mut p, &actors), None);
        p.position.y = 146.0;
        assert_eq!(apply(&mut p, &actors), None);
        assert_eq!(
            p.guidance,
            Some(Guidance::Locked {
                kind: GuidanceKind::Horizontal,
                correction: frozen
            })
        );
        assert!((p.velocity.x - (50.0 + 3.0 * GUIDANCE_STRENGTH)).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_steers_down_onto_target() {
        let actors = actors();
        let mut p = shot(DVec2::new(198.0, 40.0), GuidanceKind::Vertical);
        assert_eq!(apply(&mut p, &actors), Some(GuidanceKind::Vertical));
        assert_eq!(p.velocity.y, -GUIDANCE_STRENGTH);
    }

    #[test]
    fn test_heat_locks_within_radius() {
        let actors = actors();
        let mut far = shot(DVec2::new(100.0, 100.0), GuidanceKind::Heat);
        assert_eq!(apply(&mut far, &actors), None);

        let mut near = shot(DVec2::new(170.0, 146.0), GuidanceKind::Heat);
        assert_eq!(apply(&mut near, &actors), Some(GuidanceKind::Heat));
        match near.guidance {
            Some(Guidance::Locked { correction, .. }) => {
                assert!((correction.length() - GUIDANCE_STRENGTH).abs() < 1e-9);
                assert!(correction.x > 0.0);
            }
            other => panic!("expected lock, got {other:?}"),
        }
    }

    #[test]
    fn test_dead_and_own_actors_are_ignored() {
        let mut actors = actors();
        actors[1].alive = false;
        let mut p = shot(DVec2::new(20.0, 146.0), GuidanceKind::Horizontal);
        assert_eq!(apply(&mut p, &actors), None);
    }
}
