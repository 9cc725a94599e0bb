//! Simulation engine for SCORCH.
//!
//! Owns the hecs world of live projectiles, the terrain raster and the
//! actor table, and runs the flight, behavior and damage systems at a
//! fixed step.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use scorch_core as core;
pub use scorch_terrain as terrain;
pub use engine::SimulationEngine;
