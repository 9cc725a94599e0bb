//! Funky and popcorn bombs: a blast plus a shower of sub-bombs dropped from
//! the top of the playfield.

use glam::DVec2;
use rand::Rng;

use scorch_core::components::{Projectile, ProjectileSpec};
use scorch_core::constants::*;
use scorch_core::effects::ImpactEffect;
use scorch_core::weapons::WeaponDescriptor;

use super::BehaviorContext;

/// `param` is the horizontal scatter around the impact; zero scatters over
/// the whole screen.
pub fn on_impact(
    projectile: &Projectile,
    weapon: &WeaponDescriptor,
    ctx: &mut BehaviorContext,
) -> ImpactEffect {
    let width = ctx.terrain.width() as f64;
    let count = SCATTER_MIN_COUNT + ctx.rng.gen_range(0..SCATTER_EXTRA_COUNT);
    let impact_x = projectile.pixel().x as f64;
    let spread = weapon.param.abs();
    // Arenas narrower than both margins drop every sub-bomb on the center column.
    let (min_x, max_x) = if width > 2.0 * SCATTER_EDGE_MARGIN {
        (SCATTER_EDGE_MARGIN, width - SCATTER_EDGE_MARGIN)
    } else {
        (width / 2.0, width / 2.0)
    };

    let spawn = (0..count)
        .map(|_| {
            let x = if spread == 0 {
                ctx.rng.gen_range(min_x..=max_x)
            } else {
                impact_x + ctx.rng.gen_range(-spread..spread) as f64
            };
            let x = x.clamp(min_x, max_x);
            let velocity = DVec2::new(
                (ctx.rng.gen::<f64>() - 0.5) * 100.0,
                -(ctx.rng.gen::<f64>() * 100.0 + 50.0),
            );
            ProjectileSpec::sub_warhead(
                DVec2::new(x, (PLAYFIELD_TOP + 1) as f64),
                velocity,
                projectile.weapon,
                projectile.owner,
                SCATTER_SUB_RADIUS,
            )
        })
        .collect();

    ImpactEffect::explode(SCATTER_BLAST_RADIUS).with_spawn(spawn)
}
