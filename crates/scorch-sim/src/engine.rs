//! Simulation engine: the core of the artillery game.
//!
//! `SimulationEngine` owns the hecs world of live projectiles, the terrain
//! raster, the actor table and the rng, runs the per-step systems and emits
//! `SimEvent`s. Headless and deterministic: the same seed and the same calls
//! produce the same event stream.

use glam::{DVec2, IVec2};
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use scorch_core::components::{
    Actor, BehaviorState, Guidance, Projectile, ProjectileSpec, Warhead,
};
use scorch_core::config::{ConfigError, SimConfig};
use scorch_core::constants::{MAX_POWER, MAX_SPEED};
use scorch_core::effects::{FlightEffect, ImpactEffect};
use scorch_core::enums::{BehaviorKind, FlightStatus, HitKind};
use scorch_core::events::SimEvent;
use scorch_core::types::{ActorId, SimTime, WeaponId};
use scorch_core::weapons::WeaponTable;
use scorch_terrain::generation;
use scorch_terrain::mutator;
use scorch_terrain::TerrainRaster;

use crate::systems;
use crate::systems::damage::DamageReport;
use crate::systems::explosion::ExplosionQueue;
use crate::systems::{behavior, falling, guidance, impact, physics, StepContext};
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    terrain: TerrainRaster,
    actors: Vec<Actor>,
    weapons: WeaponTable,
    config: SimConfig,
    rng: ChaCha8Rng,
    wind: f64,
    time: SimTime,
    explosions: ExplosionQueue,
    spawn_buffer: Vec<ProjectileSpec>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Validate the config, then create an engine with freshly generated
    /// terrain and no actors.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let terrain = generation::generate(
            config.land_type,
            config.screen_width,
            config.screen_height,
            config.land_bumpiness,
            &mut rng,
        );
        Ok(Self::assemble(config, terrain, rng))
    }

    /// Create an engine over a prepared terrain raster. Both the config and
    /// the raster dimensions are validated.
    pub fn with_terrain(config: SimConfig, terrain: TerrainRaster) -> Result<Self, ConfigError> {
        config.validate()?;
        SimConfig::check_screen(terrain.width(), terrain.height())?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, terrain, rng))
    }

    fn assemble(config: SimConfig, terrain: TerrainRaster, rng: ChaCha8Rng) -> Self {
        Self {
            world: World::new(),
            terrain,
            actors: Vec::new(),
            weapons: WeaponTable::standard(),
            wind: config.wind,
            config,
            rng,
            time: SimTime::default(),
            explosions: ExplosionQueue::new(),
            spawn_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Replace the weapon catalogue.
    pub fn set_weapons(&mut self, weapons: WeaponTable) {
        self.weapons = weapons;
    }

    /// Spread `count` fresh actors across the arena, replacing any existing ones.
    pub fn place_actors(&mut self, count: usize) -> &[Actor] {
        self.actors = world_setup::place_actors(&mut self.terrain, count);
        world_setup::stamp_actors(&mut self.terrain, &self.actors);
        &self.actors
    }

    /// Add one actor to the table.
    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
        world_setup::stamp_actors(&mut self.terrain, &self.actors);
    }

    /// Fire `weapon` from `owner`'s barrel. `angle_deg` is 0 = right, 90 = up;
    /// `power` is 0..=1000. Consumes one guidance item if the shooter has any.
    pub fn launch(
        &mut self,
        owner: ActorId,
        angle_deg: f64,
        power: f64,
        weapon: WeaponId,
    ) -> Option<Entity> {
        let Some(actor) = self.actors.iter_mut().find(|a| a.id == owner && a.alive) else {
            warn!(actor = %owner, "launch from a missing or dead actor");
            return None;
        };
        let behavior = match self.weapons.get(weapon) {
            Some(descriptor) if !descriptor.is_fireable() => {
                warn!(weapon = %descriptor.name, "item cannot be fired");
                return None;
            }
            Some(descriptor) => descriptor.behavior,
            None => {
                warn!(weapon = weapon.0, "unknown weapon, firing with the default blast");
                BehaviorKind::None
            }
        };

        let speed = power.clamp(0.0, MAX_POWER) / MAX_POWER * MAX_SPEED;
        let angle = angle_deg.to_radians();
        let spec = ProjectileSpec {
            position: actor.barrel_tip(angle_deg),
            velocity: DVec2::new(angle.cos() * speed, angle.sin() * speed),
            weapon,
            owner,
            warhead: Warhead::Weapon,
            state: BehaviorState::initial_for(behavior),
        };
        let selected = guidance::select(&mut actor.inventory);

        let mut projectile = Projectile::from_spec(spec);
        projectile.guidance = selected.map(Guidance::Armed);
        let entity = self.world.spawn((projectile,));

        info!(actor = %owner, weapon = weapon.0, angle_deg, power, ?selected, "launched");
        self.events.push(SimEvent::Launched {
            owner,
            weapon,
            guidance: selected,
        });
        Some(entity)
    }

    /// Put an arbitrary projectile into flight.
    pub fn spawn(&mut self, spec: ProjectileSpec) -> Entity {
        world_setup::spawn_projectile(&mut self.world, spec)
    }

    /// Advance one animation frame and return everything that happened.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        // 1. Physics steps while anything is in flight
        for _ in 0..self.config.steps_per_frame {
            if !self.has_active_projectiles() {
                break;
            }
            self.step();
        }
        // 2. Explosion animation
        self.explosions.step();
        // 3. Falling actors once the air is clear
        if self.config.falling_actors && !self.has_active_projectiles() {
            self.step_falling();
        }
        self.time.advance_frame();

        self.drain_events()
    }

    /// Run one physics step over every live projectile.
    pub fn step(&mut self) {
        // 1. Actor band reflects current actor positions
        world_setup::stamp_actors(&mut self.terrain, &self.actors);

        // 2. Flight, guidance, integration and impact per projectile
        let entities: Vec<Entity> = self
            .world
            .query_mut::<&Projectile>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in entities {
            let Ok(mut projectile) = self.world.remove_one::<Projectile>(entity) else {
                continue;
            };
            let mut ctx = self.context();
            systems::flight::step_projectile(&mut projectile, &mut ctx);
            self.reattach(entity, projectile);
        }

        // 3. Projectiles created this step
        self.flush_spawns();

        // 4. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        self.time.advance_step();
    }

    /// Integrate one projectile by one step without dispatching its impact.
    pub fn advance_projectile(&mut self, entity: Entity) -> Option<FlightStatus> {
        let mut projectile = self.world.get::<&mut Projectile>(entity).ok()?;
        Some(physics::advance_projectile(
            &mut projectile,
            &self.terrain,
            &self.config,
            self.wind,
        ))
    }

    /// Impact-phase dispatch for one projectile. The effect is returned, not applied.
    pub fn resolve_impact(&mut self, entity: Entity, hit: HitKind) -> Option<ImpactEffect> {
        self.with_projectile(entity, |projectile, ctx| {
            behavior::resolve_impact(projectile, hit, &mut ctx.behavior())
        })
    }

    /// Apply an impact effect on behalf of one projectile.
    pub fn apply_impact(&mut self, entity: Entity, effect: ImpactEffect) -> bool {
        self.with_projectile(entity, |projectile, ctx| {
            impact::apply_impact(projectile, effect, ctx)
        })
        .is_some()
    }

    /// Flight-phase dispatch for one projectile. The effect is returned, not applied.
    pub fn advance_flight_behavior(&mut self, entity: Entity) -> Option<FlightEffect> {
        self.with_projectile(entity, |projectile, ctx| {
            behavior::advance_flight_behavior(projectile, &mut ctx.behavior())
        })
    }

    /// Apply a flight effect on behalf of one projectile.
    pub fn apply_flight_effect(&mut self, entity: Entity, effect: FlightEffect) -> bool {
        self.with_projectile(entity, |projectile, ctx| {
            impact::apply_flight(projectile, effect, ctx)
        })
        .is_some()
    }

    pub fn carve_crater(&mut self, center: IVec2, radius: i32) {
        mutator::carve_crater(&mut self.terrain, center.x, center.y, radius);
    }

    pub fn fill_dirt(&mut self, center: IVec2, radius: i32) {
        mutator::fill_dirt(&mut self.terrain, center.x, center.y, radius);
    }

    pub fn fill_dirt_tower(&mut self, center: IVec2, height: i32) {
        mutator::fill_dirt_tower(&mut self.terrain, center.x, center.y, height);
    }

    pub fn dig_tunnel(&mut self, center: IVec2, depth: i32, down: bool) {
        mutator::dig_tunnel(&mut self.terrain, center.x, center.y, depth, down);
    }

    pub fn compact_terrain(&mut self, center: IVec2, radius: i32) {
        mutator::compact_terrain(&mut self.terrain, center.x, center.y, radius);
    }

    /// Damage actors around `center`. `carried` switches to directional damage.
    pub fn apply_explosion_damage(
        &mut self,
        center: DVec2,
        radius: i32,
        attacker: ActorId,
        carried: Option<DVec2>,
    ) -> DamageReport {
        let report = systems::damage::apply_explosion_damage(
            &mut self.actors,
            center,
            radius,
            attacker,
            carried,
            self.config.self_damage,
            &mut self.rng,
        );
        impact::push_damage_events(&mut self.events, &report, attacker);
        report
    }

    /// Start and advance actor falls by one frame. Returns true while any
    /// actor is still falling.
    pub fn step_falling(&mut self) -> bool {
        if !falling::check(&mut self.actors, &self.terrain) {
            return false;
        }
        let (still_falling, events) = falling::step(&mut self.actors, &mut self.terrain);
        self.events.extend(events);
        world_setup::stamp_actors(&mut self.terrain, &self.actors);
        still_falling
    }

    /// Advance the explosion animation. Returns true while one is playing.
    pub fn step_explosion_animation(&mut self) -> bool {
        self.explosions.step()
    }

    /// Random-walk the wind, as between turns.
    pub fn change_wind(&mut self) -> f64 {
        self.wind = systems::wind::change(self.wind, &self.config, &mut self.rng);
        self.events.push(SimEvent::WindChanged { wind: self.wind });
        self.wind
    }

    pub fn set_wind(&mut self, wind: f64) {
        self.wind = wind;
    }

    pub fn wind(&self) -> f64 {
        self.wind
    }

    pub fn terrain(&self) -> &TerrainRaster {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut TerrainRaster {
        &mut self.terrain
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn weapons(&self) -> &WeaponTable {
        &self.weapons
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn explosions(&self) -> &ExplosionQueue {
        &self.explosions
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Snapshot of one projectile.
    pub fn projectile(&self, entity: Entity) -> Option<Projectile> {
        self.world
            .get::<&Projectile>(entity)
            .ok()
            .map(|p| (*p).clone())
    }

    /// Live projectiles in world order.
    pub fn projectiles(&self) -> Vec<(Entity, Projectile)> {
        self.world
            .query::<&Projectile>()
            .iter()
            .map(|(entity, p)| (entity, p.clone()))
            .collect()
    }

    pub fn has_active_projectiles(&self) -> bool {
        self.world
            .query::<&Projectile>()
            .iter()
            .any(|(_, p)| p.active)
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn context(&mut self) -> StepContext<'_> {
        StepContext {
            terrain: &mut self.terrain,
            actors: &mut self.actors,
            weapons: &self.weapons,
            config: &self.config,
            rng: &mut self.rng,
            wind: self.wind,
            explosions: &mut self.explosions,
            events: &mut self.events,
            spawn: &mut self.spawn_buffer,
        }
    }

    /// Detach a projectile, run `f` with the step context, reattach it.
    fn with_projectile<R>(
        &mut self,
        entity: Entity,
        f: impl FnOnce(&mut Projectile, &mut StepContext<'_>) -> R,
    ) -> Option<R> {
        let mut projectile = self.world.remove_one::<Projectile>(entity).ok()?;
        let mut ctx = self.context();
        let result = f(&mut projectile, &mut ctx);
        self.reattach(entity, projectile);
        self.flush_spawns();
        Some(result)
    }

    fn reattach(&mut self, entity: Entity, projectile: Projectile) {
        if let Err(e) = self.world.insert_one(entity, projectile) {
            warn!(?entity, %e, "projectile entity vanished mid-step");
        }
    }

    fn flush_spawns(&mut self) {
        for spec in self.spawn_buffer.drain(..) {
            world_setup::spawn_projectile(&mut self.world, spec);
        }
    }
}
