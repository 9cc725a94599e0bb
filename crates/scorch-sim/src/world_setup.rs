//! Spawn factories for setting up the arena: actors on the ground and
//! projectile entities in the world.

use hecs::{Entity, World};
use tracing::warn;

use scorch_core::components::{Actor, Projectile, ProjectileSpec};
use scorch_core::constants::*;
use scorch_core::types::ActorId;
use scorch_terrain::mutator::level_footprint;
use scorch_terrain::TerrainRaster;

/// Spread `count` actors evenly across the arena, leveling the ground under
/// each one. Counts beyond the actor band are capped.
pub fn place_actors(terrain: &mut TerrainRaster, count: usize) -> Vec<Actor> {
    let count = if count > MAX_ACTORS {
        warn!(requested = count, max = MAX_ACTORS, "too many actors, capping");
        MAX_ACTORS
    } else {
        count
    };
    if count == 0 {
        return Vec::new();
    }

    let width = terrain.width() as i32;
    let margin = ACTOR_PLACEMENT_MARGIN as i32;
    let spacing = (width - 2 * margin) as f64 / count as f64;

    (0..count)
        .map(|i| {
            let x = (margin + (spacing * (i as f64 + 0.5)).floor() as i32)
                .clamp(margin, width - margin - 1);
            level_footprint(terrain, x, ACTOR_HALF_WIDTH);
            Actor::new(ActorId(i), x, terrain.height_at(x))
        })
        .collect()
}

/// Redraw every living actor into the actor band.
pub fn stamp_actors(terrain: &mut TerrainRaster, actors: &[Actor]) {
    terrain.clear_actors();
    for actor in actors.iter().filter(|a| a.alive) {
        terrain.stamp_actor(actor.id, actor.x, actor.y);
    }
}

/// Spawn a projectile entity.
pub fn spawn_projectile(world: &mut World, spec: ProjectileSpec) -> Entity {
    world.spawn((Projectile::from_spec(spec),))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actors_spread_inside_margins() {
        let mut terrain = TerrainRaster::flat(320, 200, 150);
        let actors = place_actors(&mut terrain, 4);
        assert_eq!(actors.len(), 4);
        let xs: Vec<i32> = actors.iter().map(|a| a.x).collect();
        assert_eq!(xs, vec![55, 125, 195, 265]);
        assert!(actors.iter().all(|a| a.y == 150 && a.alive));
    }

    #[test]
    fn test_actor_count_is_capped() {
        let mut terrain = TerrainRaster::flat(320, 200, 150);
        assert_eq!(place_actors(&mut terrain, 25).len(), MAX_ACTORS);
        assert!(place_actors(&mut terrain, 0).is_empty());
    }

    #[test]
    fn test_stamp_skips_dead_actors() {
        let mut terrain = TerrainRaster::flat(320, 200, 150);
        let mut actors = place_actors(&mut terrain, 2);
        actors[1].alive = false;
        stamp_actors(&mut terrain, &actors);
        let a = &actors[0];
        let b = &actors[1];
        assert!(scorch_terrain::raster::is_actor(terrain.sample(a.x, a.y - 1)));
        assert!(!scorch_terrain::raster::is_actor(terrain.sample(b.x, b.y - 1)));
    }
}
