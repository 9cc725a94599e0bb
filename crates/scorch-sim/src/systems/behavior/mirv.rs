//! MIRV and Death's Head: split into a fan of sub-warheads at apogee.

use glam::DVec2;

use scorch_core::components::{BehaviorState, Projectile, ProjectileSpec};
use scorch_core::constants::*;
use scorch_core::effects::FlightEffect;
use scorch_core::weapons::WeaponDescriptor;

/// Watch vertical velocity; split once it turns from rising to falling.
pub fn flight_step(projectile: &mut Projectile, weapon: &WeaponDescriptor) -> FlightEffect {
    let BehaviorState::SplitTracked {
        previous_vy,
        has_split,
    } = projectile.state
    else {
        return FlightEffect::none();
    };
    if has_split {
        return FlightEffect::none();
    }

    let vy = projectile.velocity.y;
    let at_apogee = matches!(previous_vy, Some(prev) if prev > 0.0) && vy <= 0.0;
    projectile.state = BehaviorState::SplitTracked {
        previous_vy: Some(vy),
        has_split: at_apogee,
    };
    if !at_apogee {
        return FlightEffect::none();
    }

    FlightEffect {
        split: true,
        remove: true,
        spawn: fan(projectile, weapon),
        ..FlightEffect::default()
    }
}

/// Six sub-warheads spread symmetrically around the parent's heading.
fn fan(projectile: &Projectile, weapon: &WeaponDescriptor) -> Vec<ProjectileSpec> {
    let (spread, radius) = if weapon.param == 1 {
        (MIRV_HEAVY_SPREAD, MIRV_HEAVY_SUB_RADIUS)
    } else {
        (MIRV_SPREAD, MIRV_SUB_RADIUS)
    };
    let center = (MIRV_SUB_COUNT as f64 - 1.0) / 2.0;

    (0..MIRV_SUB_COUNT)
        .map(|i| {
            let angle = (i as f64 - center) / MIRV_SUB_COUNT as f64 * spread;
            let velocity = DVec2::new(
                projectile.velocity.x + angle.sin() * MIRV_FAN_SPEED,
                projectile.velocity.y - angle.cos().abs() * MIRV_DROP_SPEED,
            );
            ProjectileSpec::sub_warhead(
                projectile.position,
                velocity,
                projectile.weapon,
                projectile.owner,
                radius,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use scorch_core::components::Warhead;
    use scorch_core::enums::{BehaviorKind, WeaponCategory};
    use scorch_core::types::{ActorId, WeaponId};

    use super::*;

    fn mirv(param: i32) -> (Projectile, WeaponDescriptor) {
        let weapon =
            WeaponDescriptor::new("MIRV", BehaviorKind::Mirv, param, WeaponCategory::Weapon);
        let projectile = Projectile::from_spec(ProjectileSpec {
            position: DVec2::new(100.0, 50.0),
            velocity: DVec2::new(30.0, 10.0),
            weapon: WeaponId(7),
            owner: ActorId(2),
            warhead: Warhead::Weapon,
            state: BehaviorState::initial_for(BehaviorKind::Mirv),
        });
        (projectile, weapon)
    }

    #[test]
    fn test_splits_once_at_apogee() {
        let (mut p, weapon) = mirv(0);
        assert_eq!(flight_step(&mut p, &weapon), FlightEffect::none());
        p.velocity.y = 0.5;
        assert_eq!(flight_step(&mut p, &weapon), FlightEffect::none());

        p.velocity.y = -0.2;
        let effect = flight_step(&mut p, &weapon);
        assert!(effect.split && effect.remove);
        assert_eq!(effect.spawn.len(), MIRV_SUB_COUNT);
        for spec in &effect.spawn {
            assert_eq!(spec.warhead, Warhead::Sub { radius: MIRV_SUB_RADIUS });
            assert_eq!(spec.owner, ActorId(2));
            assert_eq!(spec.state, BehaviorState::None);
            assert!(spec.velocity.y < p.velocity.y, "sub-warheads drop away");
        }

        p.velocity.y = 5.0;
        flight_step(&mut p, &weapon);
        p.velocity.y = -5.0;
        assert_eq!(flight_step(&mut p, &weapon), FlightEffect::none(), "never splits twice");
    }

    #[test]
    fn test_no_split_when_launched_downward() {
        let (mut p, weapon) = mirv(0);
        p.velocity.y = -10.0;
        for _ in 0..5 {
            assert!(!flight_step(&mut p, &weapon).split);
            p.velocity.y -= 1.0;
        }
    }

    #[test]
    fn test_fan_is_symmetric() {
        let (mut p, weapon) = mirv(1);
        p.state = BehaviorState::SplitTracked {
            previous_vy: Some(1.0),
            has_split: false,
        };
        p.velocity.y = 0.0;
        let effect = flight_step(&mut p, &weapon);
        let vx: Vec<f64> = effect.spawn.iter().map(|s| s.velocity.x - 30.0).collect();
        for i in 0..MIRV_SUB_COUNT / 2 {
            assert!((vx[i] + vx[MIRV_SUB_COUNT - 1 - i]).abs() < 1e-9);
        }
        assert!(effect
            .spawn
            .iter()
            .all(|s| s.warhead == Warhead::Sub { radius: MIRV_HEAVY_SUB_RADIUS }));
    }
}
