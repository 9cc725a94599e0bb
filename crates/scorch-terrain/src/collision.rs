//! Collision oracle: classifies raster samples. Pure, never mutates.

use scorch_core::constants::{ACTOR_BAND_END, ACTOR_PALETTE_STRIDE, TERRAIN_THRESHOLD};
use scorch_core::types::ActorId;

use crate::raster::TerrainRaster;

/// What a projectile touches at a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    PassThrough,
    Tank(ActorId),
    Terrain,
}

/// Classify a raw sample. Empty and sky/HUD values pass through.
pub fn classify(sample: u8) -> Contact {
    if sample >= TERRAIN_THRESHOLD {
        Contact::Terrain
    } else if sample > 0 && sample < ACTOR_BAND_END {
        Contact::Tank(ActorId((sample / ACTOR_PALETTE_STRIDE) as usize))
    } else {
        Contact::PassThrough
    }
}

/// Classify the pixel at `(x, y)`. Out-of-bounds pixels pass through.
pub fn classify_at(raster: &TerrainRaster, x: i32, y: i32) -> Contact {
    if !raster.in_bounds(x, y) {
        return Contact::PassThrough;
    }
    classify(raster.sample(x, y))
}
