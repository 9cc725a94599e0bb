//! Falling actors: tanks whose ground was blown away drop until they land.

use tracing::debug;

use scorch_core::components::{Actor, FallState};
use scorch_core::constants::*;
use scorch_core::events::SimEvent;
use scorch_terrain::mutator::level_footprint;
use scorch_terrain::TerrainRaster;

/// Start a fall for every living actor whose ground dropped more than a row.
/// Returns true if any actor is falling.
pub fn check(actors: &mut [Actor], terrain: &TerrainRaster) -> bool {
    for actor in actors.iter_mut().filter(|a| a.alive && a.falling.is_none()) {
        if terrain.height_at(actor.x) > actor.y + 1 {
            actor.falling = Some(FallState { start_y: actor.y });
        }
    }
    actors.iter().any(|a| a.falling.is_some())
}

/// Advance every falling actor by one frame. Landings level the ground under
/// the tank and cost a parachute or energy. Fall damage is reported like any
/// other hit, before the kill and the landing. Returns the events and whether
/// anyone is still falling.
pub fn step(actors: &mut [Actor], terrain: &mut TerrainRaster) -> (bool, Vec<SimEvent>) {
    let mut events = Vec::new();

    for actor in actors.iter_mut() {
        let Some(fall) = actor.falling else {
            continue;
        };
        let ground = terrain.height_at(actor.x);
        actor.y += FALL_SPEED;
        if actor.y < ground {
            continue;
        }

        actor.y = ground;
        actor.falling = None;
        let distance = actor.y - fall.start_y;

        let mut damage = 0;
        let mut parachute = false;
        if distance > FALL_SAFE_DISTANCE {
            if actor.inventory.parachutes > 0 {
                actor.inventory.parachutes -= 1;
                parachute = true;
            } else {
                damage = distance / FALL_DAMAGE_DIVISOR;
            }
        }

        if damage > 0 && actor.alive {
            actor.energy -= damage;
            events.push(SimEvent::ActorDamaged {
                actor: actor.id,
                damage,
                absorbed: 0,
            });
            if actor.energy <= 0 {
                actor.energy = 0;
                actor.alive = false;
                events.push(SimEvent::ActorKilled {
                    actor: actor.id,
                    attacker: actor.id,
                });
            }
        }

        level_footprint(terrain, actor.x, ACTOR_HALF_WIDTH);
        actor.y = terrain.height_at(actor.x);

        debug!(actor = %actor.id, distance, damage, parachute, "actor landed");
        events.push(SimEvent::ActorLanded {
            actor: actor.id,
            distance,
            damage,
            parachute,
        });
    }

    let still_falling = actors.iter().any(|a| a.falling.is_some());
    (still_falling, events)
}

#[cfg(test)]
mod tests {
    use scorch_core::types::ActorId;
    use scorch_terrain::mutator::carve_crater;

    use super::*;

    fn run_to_rest(actors: &mut [Actor], terrain: &mut TerrainRaster) -> Vec<SimEvent> {
        let mut events = Vec::new();
        check(actors, terrain);
        for _ in 0..200 {
            let (falling, mut landed) = step(actors, terrain);
            events.append(&mut landed);
            if !falling {
                break;
            }
        }
        events
    }

    #[test]
    fn test_supported_actor_does_not_fall() {
        let terrain = TerrainRaster::flat(100, 200, 150);
        let mut actors = vec![Actor::new(ActorId(0), 50, 150)];
        assert!(!check(&mut actors, &terrain));
    }

    #[test]
    fn test_short_fall_is_free() {
        let mut terrain = TerrainRaster::flat(100, 200, 150);
        for x in 40..=60 {
            for y in 150..156 {
                terrain.write(x, y, scorch_terrain::raster::sky_value(y, 200));
            }
        }
        let mut actors = vec![Actor::new(ActorId(0), 50, 150)];
        let events = run_to_rest(&mut actors, &mut terrain);
        assert_eq!(actors[0].y, 156);
        assert_eq!(actors[0].energy, ACTOR_START_ENERGY);
        assert!(matches!(
            events.as_slice(),
            [SimEvent::ActorLanded { distance: 6, damage: 0, parachute: false, .. }]
        ));
    }

    #[test]
    fn test_long_fall_costs_energy() {
        let mut terrain = TerrainRaster::flat(100, 200, 150);
        carve_crater(&mut terrain, 50, 150, 30);
        let mut actors = vec![Actor::new(ActorId(0), 50, 150)];
        let events = run_to_rest(&mut actors, &mut terrain);
        assert!(actors[0].falling.is_none());
        match events.as_slice() {
            [
                SimEvent::ActorDamaged { damage: 6, absorbed: 0, .. },
                SimEvent::ActorLanded { distance, damage, .. },
            ] => {
                assert_eq!(*distance, 31);
                assert_eq!(*damage, 6);
            }
            other => panic!("unexpected events {other:?}"),
        }
        assert_eq!(actors[0].energy, ACTOR_START_ENERGY - 6);
        assert!(terrain.heights_consistent());
    }

    #[test]
    fn test_lethal_fall_reports_damage_before_kill() {
        let mut terrain = TerrainRaster::flat(100, 200, 150);
        carve_crater(&mut terrain, 50, 150, 30);
        let mut actors = vec![Actor::new(ActorId(3), 50, 150)];
        actors[0].energy = 3;
        let events = run_to_rest(&mut actors, &mut terrain);

        assert!(!actors[0].alive);
        assert_eq!(actors[0].energy, 0);
        assert_eq!(
            events,
            vec![
                SimEvent::ActorDamaged {
                    actor: ActorId(3),
                    damage: 6,
                    absorbed: 0,
                },
                SimEvent::ActorKilled {
                    actor: ActorId(3),
                    attacker: ActorId(3),
                },
                SimEvent::ActorLanded {
                    actor: ActorId(3),
                    distance: 31,
                    damage: 6,
                    parachute: false,
                },
            ]
        );
    }

    #[test]
    fn test_parachute_absorbs_long_fall() {
        let mut terrain = TerrainRaster::flat(100, 200, 150);
        carve_crater(&mut terrain, 50, 150, 30);
        let mut actors = vec![Actor::new(ActorId(0), 50, 150)];
        actors[0].inventory.parachutes = 2;
        let events = run_to_rest(&mut actors, &mut terrain);
        assert_eq!(actors[0].inventory.parachutes, 1);
        assert_eq!(actors[0].energy, ACTOR_START_ENERGY);
        assert!(matches!(
            events.as_slice(),
            [SimEvent::ActorLanded { parachute: true, damage: 0, .. }]
        ));
    }
}
