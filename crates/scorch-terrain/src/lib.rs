//! Destructible terrain for SCORCH.
//!
//! The classification raster, the collision oracle that reads it,
//! the mutators that carve and fill it, and the land generators.

pub use scorch_core as core;

pub mod collision;
pub mod generation;
pub mod mutator;
pub mod raster;

// Re-export key types for convenience.
pub use collision::{classify, classify_at, Contact};
pub use raster::TerrainRaster;
