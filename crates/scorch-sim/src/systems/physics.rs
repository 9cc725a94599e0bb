//! Physics integrator: one fixed step of viscosity, gravity, wind, motion,
//! walls, vertical bounds and collision.

use scorch_core::components::Projectile;
use scorch_core::config::SimConfig;
use scorch_core::constants::*;
use scorch_core::enums::{FlightStatus, WallPolicy};
use scorch_terrain::{classify_at, Contact, TerrainRaster};

/// Result of applying the wall policy to a horizontal coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallOutcome {
    /// Still between the walls, or repositioned back between them.
    Inside,
    /// Outside the screen but not yet far enough to be lost.
    Beyond,
    /// Struck a concrete wall.
    Hit,
    /// Left the arena through an open side.
    Offscreen,
}

/// Apply `policy` to `x`/`vx` for a screen `width` pixels wide.
pub fn apply_wall(policy: WallPolicy, x: &mut f64, vx: &mut f64, width: f64) -> WallOutcome {
    if *x >= 0.0 && *x < width {
        return WallOutcome::Inside;
    }
    match policy {
        WallPolicy::Concrete => {
            *x = x.clamp(0.0, width - 1.0);
            WallOutcome::Hit
        }
        WallPolicy::Wrap => {
            *x = x.rem_euclid(width);
            if *x >= width {
                *x = 0.0;
            }
            WallOutcome::Inside
        }
        WallPolicy::Rubber | WallPolicy::Spring | WallPolicy::Padded => {
            let factor = policy.reflection().unwrap_or(1.0);
            *vx = -*vx * factor;
            *x = if *x < 0.0 { 1.0 } else { width - 2.0 };
            WallOutcome::Inside
        }
        WallPolicy::None => {
            if *x < -OFFSCREEN_MARGIN || *x > width + OFFSCREEN_MARGIN {
                WallOutcome::Offscreen
            } else {
                WallOutcome::Beyond
            }
        }
    }
}

/// Advance one projectile by one step and report where it ended up.
///
/// Rolling projectiles are moved by their flight hook and always report
/// [`FlightStatus::Flying`] here.
pub fn advance_projectile(
    projectile: &mut Projectile,
    terrain: &TerrainRaster,
    config: &SimConfig,
    wind: f64,
) -> FlightStatus {
    if !projectile.active {
        return FlightStatus::Offscreen;
    }
    if projectile.is_rolling() {
        return FlightStatus::Flying;
    }

    projectile.age += 1;
    projectile.record_trail();

    let particle = projectile.is_particle();
    let v = &mut projectile.velocity;

    // 1. Air resistance
    if !particle {
        *v *= config.viscosity_factor();
    }

    // 2. Gravity
    v.y -= GRAVITY * config.gravity * DT;

    // 3. Wind
    if !particle {
        v.x += wind * WIND_SCALE * DT;
    }

    // 4. Motion
    projectile.position.x += v.x * DT;
    projectile.position.y -= v.y * DT;

    // 5. Walls
    let width = terrain.width() as f64;
    let height = terrain.height() as f64;
    match apply_wall(
        config.wall,
        &mut projectile.position.x,
        &mut projectile.velocity.x,
        width,
    ) {
        WallOutcome::Hit => return FlightStatus::HitWall,
        WallOutcome::Offscreen => return FlightStatus::Offscreen,
        WallOutcome::Inside | WallOutcome::Beyond => {}
    }

    // 6. Vertical bounds
    let y = projectile.position.y;
    if y > height + BOTTOM_MARGIN as f64 || y < TOP_LIMIT as f64 {
        return FlightStatus::Offscreen;
    }

    // 7. Collision, after the launch grace period
    if projectile.age > GRACE_STEPS {
        let pixel = projectile.pixel();
        if pixel.y >= PLAYFIELD_TOP && terrain.in_bounds(pixel.x, pixel.y) {
            match classify_at(terrain, pixel.x, pixel.y) {
                Contact::Terrain => return FlightStatus::HitTerrain,
                Contact::Tank(actor) => return FlightStatus::HitTank(actor),
                Contact::PassThrough => {}
            }
        }
    }

    FlightStatus::Flying
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use scorch_core::components::ProjectileSpec;
    use scorch_core::types::{ActorId, WeaponId};

    use super::*;

    fn projectile(position: DVec2, velocity: DVec2) -> Projectile {
        Projectile::from_spec(ProjectileSpec::sub_warhead(
            position,
            velocity,
            WeaponId(0),
            ActorId(0),
            10,
        ))
    }

    #[test]
    fn test_concrete_wall_hits_on_crossing() {
        let mut x = -0.5;
        let mut vx = -10.0;
        assert_eq!(apply_wall(WallPolicy::Concrete, &mut x, &mut vx, 100.0), WallOutcome::Hit);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_wrap_repositions_modulo_width() {
        let mut x = 103.0;
        let mut vx = 10.0;
        assert_eq!(apply_wall(WallPolicy::Wrap, &mut x, &mut vx, 100.0), WallOutcome::Inside);
        assert!((x - 3.0).abs() < 1e-9);
        let mut x = -2.0;
        apply_wall(WallPolicy::Wrap, &mut x, &mut vx, 100.0);
        assert!((x - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_bouncing_walls_reflect() {
        for (policy, factor) in [
            (WallPolicy::Rubber, RUBBER_REFLECT),
            (WallPolicy::Spring, SPRING_REFLECT),
            (WallPolicy::Padded, PADDED_REFLECT),
        ] {
            let mut x = 100.5;
            let mut vx = 50.0;
            apply_wall(policy, &mut x, &mut vx, 100.0);
            assert_eq!(x, 98.0, "{policy:?}");
            assert!((vx + 50.0 * factor).abs() < 1e-9, "{policy:?}");
        }
    }

    #[test]
    fn test_open_wall_goes_offscreen_past_margin() {
        let mut vx = 10.0;
        let mut x = 120.0;
        assert_eq!(apply_wall(WallPolicy::None, &mut x, &mut vx, 100.0), WallOutcome::Beyond);
        let mut x = 151.0;
        assert_eq!(apply_wall(WallPolicy::None, &mut x, &mut vx, 100.0), WallOutcome::Offscreen);
    }

    #[test]
    fn test_straight_line_without_forces() {
        let terrain = TerrainRaster::new(320, 200);
        let config = SimConfig {
            gravity: 0.0,
            ..SimConfig::default()
        };
        let start = DVec2::new(50.0, 100.0);
        let velocity = DVec2::new(30.0, 20.0);
        let mut p = projectile(start, velocity);
        for _ in 0..40 {
            assert_eq!(advance_projectile(&mut p, &terrain, &config, 0.0), FlightStatus::Flying);
        }
        let t = 40.0 * DT;
        assert!((p.position.x - (start.x + velocity.x * t)).abs() < 1e-9);
        assert!((p.position.y - (start.y - velocity.y * t)).abs() < 1e-9);
        assert_eq!(p.age, 40);
        assert_eq!(p.trail.len(), 40);
    }

    #[test]
    fn test_grace_period_skips_collision() {
        let terrain = TerrainRaster::flat(100, 100, 50);
        let config = SimConfig::default();
        let mut p = projectile(DVec2::new(40.0, 60.0), DVec2::ZERO);
        assert_eq!(advance_projectile(&mut p, &terrain, &config, 0.0), FlightStatus::Flying);
        assert_eq!(advance_projectile(&mut p, &terrain, &config, 0.0), FlightStatus::Flying);
        assert_eq!(advance_projectile(&mut p, &terrain, &config, 0.0), FlightStatus::HitTerrain);
    }

    #[test]
    fn test_falling_below_screen_is_offscreen() {
        let terrain = TerrainRaster::new(100, 100);
        let config = SimConfig::default();
        let mut p = projectile(DVec2::new(40.0, 149.0), DVec2::new(0.0, -200.0));
        assert_eq!(advance_projectile(&mut p, &terrain, &config, 0.0), FlightStatus::Offscreen);
    }

    #[test]
    fn test_tank_contact() {
        let mut terrain = TerrainRaster::flat(100, 100, 80);
        terrain.stamp_actor(ActorId(3), 40, 80);
        let config = SimConfig {
            gravity: 0.0,
            ..SimConfig::default()
        };
        let mut p = projectile(DVec2::new(40.0, 70.0), DVec2::new(0.0, -100.0));
        let mut status = FlightStatus::Flying;
        for _ in 0..10 {
            status = advance_projectile(&mut p, &terrain, &config, 0.0);
            if status != FlightStatus::Flying {
                break;
            }
        }
        assert_eq!(status, FlightStatus::HitTank(ActorId(3)));
    }
}
