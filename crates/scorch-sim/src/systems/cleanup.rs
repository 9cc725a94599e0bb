//! Cleanup system: despawns projectiles that stopped flying.

use hecs::{Entity, World};

use scorch_core::components::Projectile;

/// Remove every inactive projectile.
/// Uses a pre-allocated buffer to avoid per-step allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
