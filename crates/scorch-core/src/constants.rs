//! Simulation constants and tuning parameters.
//!
//! Distances are screen pixels, velocities pixels per second.
//! Screen y grows downward; projectile vy is positive upward.

/// Fixed physics timestep (seconds).
pub const DT: f64 = 0.02;

/// Physics sub-steps per outer frame.
pub const STEPS_PER_FRAME: u32 = 3;

/// Launch speed at power 1000.
pub const MAX_SPEED: f64 = 400.0;

/// Full power setting.
pub const MAX_POWER: f64 = 1000.0;

/// Downward acceleration at gravity scale 1.0 (pixels/sec²).
pub const GRAVITY: f64 = 4.9;

/// Wind scalar to horizontal acceleration.
pub const WIND_SCALE: f64 = 0.15;

// --- Screen / raster ---

/// Default screen width.
pub const DEFAULT_SCREEN_WIDTH: usize = 320;

/// Default screen height.
pub const DEFAULT_SCREEN_HEIGHT: usize = 200;

/// First row below the HUD. Height scans and collision start here.
pub const PLAYFIELD_TOP: i32 = 15;

/// Raster values `1..ACTOR_BAND_END` belong to actors.
pub const ACTOR_BAND_END: u8 = 80;

/// Raster values per actor in the actor band.
pub const ACTOR_PALETTE_STRIDE: u8 = 8;

/// Highest actor index that fits in the actor band.
pub const MAX_ACTORS: usize = (ACTOR_BAND_END / ACTOR_PALETTE_STRIDE) as usize;

/// First sky gradient value.
pub const SKY_BASE: u8 = 80;

/// Number of sky gradient steps above `SKY_BASE`.
pub const SKY_STEPS: i32 = 23;

/// Raster values at or above this are terrain.
pub const TERRAIN_THRESHOLD: u8 = 105;

/// First terrain shade value.
pub const TERRAIN_SHADE_BASE: u8 = 120;

/// Number of terrain shade steps above `TERRAIN_SHADE_BASE`.
pub const TERRAIN_SHADE_STEPS: i32 = 29;

// --- Flight ---

/// Trail history length per projectile.
pub const TRAIL_LEN: usize = 200;

/// Steps after launch with collision checks suppressed.
pub const GRACE_STEPS: u32 = 2;

/// Horizontal distance past a bound before an unwalled projectile is offscreen.
pub const OFFSCREEN_MARGIN: f64 = 50.0;

/// Rows below the screen bottom before a projectile is offscreen.
pub const BOTTOM_MARGIN: i32 = 50;

/// Highest row above the screen a projectile may reach.
pub const TOP_LIMIT: i32 = -500;

/// Rubber wall reflection factor.
pub const RUBBER_REFLECT: f64 = 0.8;

/// Spring wall reflection factor.
pub const SPRING_REFLECT: f64 = 1.2;

/// Padded wall reflection factor.
pub const PADDED_REFLECT: f64 = 0.5;

// --- Actors ---

/// Barrel length from the dome center.
pub const BARREL_LENGTH: f64 = 12.0;

/// Actor body height above the ground line.
pub const ACTOR_BODY_HEIGHT: i32 = 4;

/// Actor dome rise above the body.
pub const ACTOR_DOME_HEIGHT: i32 = 4;

/// Half width of the actor footprint (7 px wide).
pub const ACTOR_HALF_WIDTH: i32 = 3;

/// Vertical offset from the ground line to the actor center.
pub const ACTOR_CENTER_OFFSET: f64 = 4.0;

/// Horizontal screen margin kept clear of actors at placement.
pub const ACTOR_PLACEMENT_MARGIN: usize = 20;

/// Starting energy.
pub const ACTOR_START_ENERGY: i32 = 100;

/// Falling speed (rows per frame).
pub const FALL_SPEED: i32 = 2;

/// Fall distance that starts hurting.
pub const FALL_SAFE_DISTANCE: i32 = 10;

/// Rows fallen per point of damage.
pub const FALL_DAMAGE_DIVISOR: i32 = 5;

// --- Damage ---

/// Extra reach of an explosion beyond its radius.
pub const DAMAGE_MARGIN: f64 = 10.0;

/// Carried velocity attenuation per victim.
pub const CARRIED_VELOCITY_DECAY: f64 = 0.7;

/// Carried velocity components below this are treated as zero.
pub const CARRIED_VELOCITY_EPSILON: f64 = 0.1;

/// Shield energy spent deflecting a projectile.
pub const DEFLECT_COST: i32 = 10;

// --- Behaviors ---

/// Radius used when a weapon descriptor is missing or has no parameter.
pub const DEFAULT_BLAST_RADIUS: i32 = 10;

/// Roller frame budget.
pub const ROLLER_MAX_FRAMES: u32 = 120;

/// Roller speed scale from impact vx.
pub const ROLLER_SPEED_SCALE: f64 = 0.01;

/// Minimum roller speed at entry.
pub const ROLLER_MIN_SPEED: f64 = 1.0;

/// Maximum roller movement per frame.
pub const ROLLER_MAX_STEP: f64 = 2.0;

/// Roller friction per frame.
pub const ROLLER_FRICTION: f64 = 0.98;

/// Roller speed below which it detonates.
pub const ROLLER_STOP_SPEED: f64 = 0.3;

/// Speed gained per row of descent.
pub const ROLLER_DOWNHILL_ACCEL: f64 = 0.1;

/// Column offset of the depth probes used to pick a roll direction.
pub const ROLLER_PROBE: i32 = 3;

/// Vertical reflection of a bouncing projectile.
pub const BOUNCE_REFLECT: f64 = 0.7;

/// Horizontal damping of a bouncing projectile.
pub const BOUNCE_DAMPING: f64 = 0.9;

/// Rows a bouncing projectile is lifted off the terrain.
pub const BOUNCE_LIFT: f64 = 3.0;

/// Blast radius at each intermediate bounce.
pub const BOUNCE_BLAST_RADIUS: i32 = 5;

/// Blast radius of the final bounce.
pub const BOUNCE_FINAL_RADIUS: i32 = 20;

/// Sub-warheads per MIRV split.
pub const MIRV_SUB_COUNT: usize = 6;

/// Angular spread of the light MIRV.
pub const MIRV_SPREAD: f64 = 1.5;

/// Angular spread of the heavy MIRV.
pub const MIRV_HEAVY_SPREAD: f64 = 3.0;

/// Sub-warhead radius of the light MIRV.
pub const MIRV_SUB_RADIUS: i32 = 15;

/// Sub-warhead radius of the heavy MIRV.
pub const MIRV_HEAVY_SUB_RADIUS: i32 = 25;

/// Horizontal fan speed of MIRV sub-warheads.
pub const MIRV_FAN_SPEED: f64 = 100.0;

/// Downward kick of MIRV sub-warheads.
pub const MIRV_DROP_SPEED: f64 = 25.0;

/// Blast radius when a MIRV impacts before splitting.
pub const MIRV_IMPACT_RADIUS: i32 = 20;

/// Upper bound on napalm particles per impact.
pub const NAPALM_MAX_PARTICLES: usize = 20;

/// Blast radius of the napalm canister itself.
pub const NAPALM_BLAST_RADIUS: i32 = 5;

/// Liquid dirt particle count.
pub const LIQUID_PARTICLES: usize = 15;

/// Default particle damping per step.
pub const PARTICLE_DAMPING: f64 = 0.93;

/// Particles slower than this (speed squared) expire.
pub const PARTICLE_MIN_SPEED_SQ: f64 = 25.0;

/// Fire particle burn radius.
pub const PARTICLE_BURN_RADIUS: i32 = 3;

/// Soil particle deposit radius.
pub const PARTICLE_DEPOSIT_RADIUS: i32 = 3;

/// Plasma radius per unit of impact speed.
pub const PLASMA_SPEED_FACTOR: f64 = 0.1;

/// Plasma base radius.
pub const PLASMA_BASE_RADIUS: f64 = 10.0;

/// Radius of the fixed plasma variant.
pub const PLASMA_FIXED_RADIUS: i32 = 25;

/// Earth disrupter compaction radius.
pub const DISRUPTER_RADIUS: i32 = 40;

/// Dirt tower height.
pub const DIRT_TOWER_HEIGHT: i32 = 30;

/// Dirt tower half width.
pub const DIRT_TOWER_HALF_WIDTH: i32 = 3;

/// Dirt charge blast and fill radius.
pub const DIRT_CHARGE_RADIUS: i32 = 15;

/// Scatter weapon blast radius at the trigger point.
pub const SCATTER_BLAST_RADIUS: i32 = 15;

/// Minimum scatter sub-bombs.
pub const SCATTER_MIN_COUNT: usize = 5;

/// Exclusive range of extra scatter sub-bombs (5..=10 total).
pub const SCATTER_EXTRA_COUNT: usize = 6;

/// Scatter sub-bomb radius.
pub const SCATTER_SUB_RADIUS: i32 = 10;

/// Scatter sub-bombs stay this far from the screen edges.
pub const SCATTER_EDGE_MARGIN: f64 = 10.0;

/// Minimum tunnel half width.
pub const TUNNEL_MIN_HALF_WIDTH: i32 = 3;

// --- Guidance ---

/// Velocity correction added each step once guidance locks.
pub const GUIDANCE_STRENGTH: f64 = 2.0;

/// Alignment tolerance for horizontal/vertical guidance (pixels).
pub const GUIDANCE_ALIGN_TOLERANCE: f64 = 4.0;

/// Heat guidance trigger distance (pixels).
pub const HEAT_LOCK_RADIUS: f64 = 40.0;

// --- Explosion presentation ---

/// Minimum animation frames per explosion.
pub const EXPLOSION_MIN_FRAMES: u32 = 8;

// --- Wind ---

/// Wind random walk half-range per change.
pub const WIND_WALK_STEP: i32 = 5;

/// Wind clamp as a multiple of the configured maximum.
pub const WIND_CLAMP_FACTOR: f64 = 4.0;
