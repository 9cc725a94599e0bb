//! Rollers: land on the surface, then slide downhill until they stop, touch
//! a tank or run out of time.

use scorch_core::components::{BehaviorState, Projectile};
use scorch_core::constants::*;
use scorch_core::effects::{FlightEffect, ImpactEffect};
use scorch_core::enums::{HitKind, WallPolicy};
use scorch_core::weapons::WeaponDescriptor;
use scorch_terrain::{classify_at, Contact};

use super::BehaviorContext;
use crate::systems::physics::{apply_wall, WallOutcome};

/// First terrain contact switches to rolling; anything else explodes.
pub fn on_impact(
    projectile: &mut Projectile,
    hit: HitKind,
    weapon: &WeaponDescriptor,
    ctx: &mut BehaviorContext,
) -> ImpactEffect {
    if hit != HitKind::Terrain || projectile.is_rolling() {
        return ImpactEffect::explode(weapon.param);
    }

    let terrain = ctx.terrain;
    let x = projectile.pixel().x;
    let left = terrain.height_at(x - ROLLER_PROBE);
    let right = terrain.height_at(x + ROLLER_PROBE);
    let direction = if right > left {
        1.0
    } else if left > right {
        -1.0
    } else if projectile.velocity.x >= 0.0 {
        1.0
    } else {
        -1.0
    };
    let speed = (projectile.velocity.x.abs() * ROLLER_SPEED_SCALE).max(ROLLER_MIN_SPEED);

    projectile.state = BehaviorState::Rolling {
        direction,
        speed,
        frames: 0,
    };
    projectile.position.y = (terrain.height_at(x) - 1) as f64;

    ImpactEffect {
        keep_alive: true,
        skip_damage: true,
        ..ImpactEffect::default()
    }
}

/// Slide one step along the surface.
pub fn flight_step(
    projectile: &mut Projectile,
    weapon: &WeaponDescriptor,
    ctx: &mut BehaviorContext,
) -> FlightEffect {
    let BehaviorState::Rolling {
        direction,
        speed,
        frames,
    } = projectile.state
    else {
        return FlightEffect::none();
    };

    let frames = frames + 1;
    if frames > ROLLER_MAX_FRAMES {
        return FlightEffect::detonate(weapon.param);
    }

    let terrain = ctx.terrain;
    let width = terrain.width() as f64;
    let old_height = terrain.height_at(projectile.pixel().x);

    let mut x = projectile.position.x + direction * speed.min(ROLLER_MAX_STEP);
    let mut vx = direction * speed;

    if ctx.config.wall == WallPolicy::None && (x < 0.0 || x >= width) {
        return FlightEffect::remove();
    }
    match apply_wall(ctx.config.wall, &mut x, &mut vx, width) {
        WallOutcome::Hit => {
            projectile.position.x = x;
            return FlightEffect::detonate(weapon.param);
        }
        WallOutcome::Offscreen => return FlightEffect::remove(),
        WallOutcome::Inside | WallOutcome::Beyond => {}
    }

    let direction = if vx < 0.0 { -1.0 } else { 1.0 };
    let mut speed = vx.abs();

    let column = (x.round() as i32).clamp(0, terrain.width() as i32 - 1);
    let new_height = terrain.height_at(column);
    projectile.position.x = x;
    projectile.position.y = (new_height - 1) as f64;

    let drop = new_height - old_height;
    if drop > 0 {
        speed += ROLLER_DOWNHILL_ACCEL * drop as f64;
    }
    speed *= ROLLER_FRICTION;

    projectile.state = BehaviorState::Rolling {
        direction,
        speed,
        frames,
    };

    if speed < ROLLER_STOP_SPEED {
        return FlightEffect::detonate(weapon.param);
    }
    let pixel = projectile.pixel();
    if matches!(classify_at(terrain, pixel.x, pixel.y), Contact::Tank(_)) {
        return FlightEffect::detonate(weapon.param);
    }

    FlightEffect::none()
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use scorch_core::components::{ProjectileSpec, Warhead};
    use scorch_core::config::SimConfig;
    use scorch_core::types::ActorId;
    use scorch_core::weapons::WeaponTable;
    use scorch_terrain::TerrainRaster;

    use super::*;

    fn roller(weapons: &WeaponTable, position: DVec2, velocity: DVec2) -> Projectile {
        Projectile::from_spec(ProjectileSpec {
            position,
            velocity,
            weapon: weapons.id_of("Roller").unwrap(),
            owner: ActorId(0),
            warhead: Warhead::Weapon,
            state: BehaviorState::None,
        })
    }

    /// Valley floor at x = 60, walls rising to both sides.
    fn valley() -> TerrainRaster {
        let heights: Vec<i32> = (0..120).map(|x: i32| 160 - (x - 60).abs() / 2).collect();
        TerrainRaster::from_heights(120, 200, &heights)
    }

    #[test]
    fn test_lands_and_turns_downhill() {
        let terrain = valley();
        let weapons = WeaponTable::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = BehaviorContext {
            terrain: &terrain,
            weapons: &weapons,
            config: &config,
            rng: &mut rng,
        };
        let weapon = weapons.get(weapons.id_of("Roller").unwrap()).unwrap();

        let mut p = roller(&weapons, DVec2::new(40.0, 149.0), DVec2::new(-50.0, -80.0));
        let effect = on_impact(&mut p, HitKind::Terrain, weapon, &mut ctx);
        assert!(effect.keep_alive && effect.skip_damage && !effect.explode);
        match p.state {
            BehaviorState::Rolling { direction, speed, .. } => {
                assert_eq!(direction, 1.0, "deeper ground lies to the right");
                assert!(speed >= ROLLER_MIN_SPEED);
            }
            other => panic!("expected rolling, got {other:?}"),
        }
        assert_eq!(p.position.y, (terrain.height_at(40) - 1) as f64);
    }

    #[test]
    fn test_rolls_on_surface_until_detonation() {
        let terrain = valley();
        let weapons = WeaponTable::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = BehaviorContext {
            terrain: &terrain,
            weapons: &weapons,
            config: &config,
            rng: &mut rng,
        };
        let weapon = weapons.get(weapons.id_of("Roller").unwrap()).unwrap();

        let mut p = roller(&weapons, DVec2::new(30.0, 140.0), DVec2::new(80.0, -80.0));
        on_impact(&mut p, HitKind::Terrain, weapon, &mut ctx);

        let mut steps = 0;
        loop {
            let effect = flight_step(&mut p, weapon, &mut ctx);
            steps += 1;
            if effect.remove {
                assert_eq!(effect.explode_here, Some(weapon.param));
                break;
            }
            let column = p.pixel().x.clamp(0, 119);
            assert_eq!(p.position.y, (terrain.height_at(column) - 1) as f64, "step {steps}");
            assert!(steps <= ROLLER_MAX_FRAMES, "roller never stopped");
        }
    }

    #[test]
    fn test_second_impact_explodes() {
        let terrain = valley();
        let weapons = WeaponTable::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = BehaviorContext {
            terrain: &terrain,
            weapons: &weapons,
            config: &config,
            rng: &mut rng,
        };
        let weapon = weapons.get(weapons.id_of("Roller").unwrap()).unwrap();
        let mut p = roller(&weapons, DVec2::new(40.0, 149.0), DVec2::ZERO);
        let tank = on_impact(&mut p, HitKind::Tank(ActorId(1)), weapon, &mut ctx);
        assert!(tank.explode);
        assert_eq!(tank.radius, weapon.param);
    }

    #[test]
    fn test_open_wall_removes_roller() {
        let terrain = TerrainRaster::flat(120, 200, 150);
        let weapons = WeaponTable::standard();
        let config = SimConfig {
            wall: WallPolicy::None,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = BehaviorContext {
            terrain: &terrain,
            weapons: &weapons,
            config: &config,
            rng: &mut rng,
        };
        let weapon = weapons.get(weapons.id_of("Roller").unwrap()).unwrap();
        let mut p = roller(&weapons, DVec2::new(0.5, 149.0), DVec2::ZERO);
        p.state = BehaviorState::Rolling {
            direction: -1.0,
            speed: 2.0,
            frames: 0,
        };
        let effect = flight_step(&mut p, weapon, &mut ctx);
        assert!(effect.remove);
        assert_eq!(effect.explode_here, None);
    }

    #[test]
    fn test_concrete_wall_detonates_roller() {
        let terrain = TerrainRaster::flat(120, 200, 150);
        let weapons = WeaponTable::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = BehaviorContext {
            terrain: &terrain,
            weapons: &weapons,
            config: &config,
            rng: &mut rng,
        };
        let weapon = weapons.get(weapons.id_of("Roller").unwrap()).unwrap();
        let mut p = roller(&weapons, DVec2::new(119.0, 149.0), DVec2::ZERO);
        p.state = BehaviorState::Rolling {
            direction: 1.0,
            speed: 2.0,
            frames: 0,
        };
        let effect = flight_step(&mut p, weapon, &mut ctx);
        assert_eq!(effect.explode_here, Some(weapon.param));
        assert_eq!(p.position.x, 119.0);
    }
}
