//! Terrain mutator: craters, dirt, tunnels and compaction.
//!
//! Every operation only rewrites cells of the band it targets (carving never
//! touches actor pixels, filling only writes over sky) and recomputes the
//! height index of every column it touched before returning.

use scorch_core::constants::*;

use crate::raster::{is_actor, is_terrain, sky_value, terrain_shade, TerrainRaster};

/// Reclassify every terrain cell inside the disc as sky.
pub fn carve_crater(raster: &mut TerrainRaster, cx: i32, cy: i32, radius: i32) {
    if radius < 0 {
        return;
    }
    let h = raster.height();
    let r2 = radius * radius;
    for dx in -radius..=radius {
        let x = cx + dx;
        if x < 0 || x as usize >= raster.width() {
            continue;
        }
        for dy in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let y = cy + dy;
            if is_terrain(raster.sample(x, y)) {
                raster.set_cell(x, y, sky_value(y, h));
            }
        }
        raster.recompute_column(x);
    }
}

/// Fill every sky cell inside the disc with terrain.
pub fn fill_dirt(raster: &mut TerrainRaster, cx: i32, cy: i32, radius: i32) {
    if radius < 0 {
        return;
    }
    let r2 = radius * radius;
    for dx in -radius..=radius {
        let x = cx + dx;
        if x < 0 || x as usize >= raster.width() {
            continue;
        }
        for dy in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                fill_cell(raster, x, cy + dy);
            }
        }
        raster.recompute_column(x);
    }
}

/// Raise a 7-column strip of dirt `height` rows upward from the impact row.
pub fn fill_dirt_tower(raster: &mut TerrainRaster, cx: i32, cy: i32, height: i32) {
    for dx in -DIRT_TOWER_HALF_WIDTH..=DIRT_TOWER_HALF_WIDTH {
        let x = cx + dx;
        if x < 0 || x as usize >= raster.width() {
            continue;
        }
        for dy in 0..height.max(0) {
            fill_cell(raster, x, cy - dy);
        }
        raster.recompute_column(x);
    }
}

/// Clear a strip `depth` rows long from the impact row, downward or upward.
/// Half width is `max(3, depth / 4)`. Stops at the playfield bounds.
pub fn dig_tunnel(raster: &mut TerrainRaster, cx: i32, cy: i32, depth: i32, down: bool) {
    let h = raster.height();
    let half_width = tunnel_half_width(depth);
    let dir = if down { 1 } else { -1 };

    for d in 0..depth.max(0) {
        let y = cy + d * dir;
        if y < PLAYFIELD_TOP || y >= h as i32 {
            break;
        }
        for dx in -half_width..=half_width {
            let x = cx + dx;
            if is_terrain(raster.sample(x, y)) {
                raster.set_cell(x, y, sky_value(y, h));
            }
        }
    }

    for dx in -half_width..=half_width {
        raster.recompute_column(cx + dx);
    }
}

/// Half width of a tunnel of the given depth.
pub fn tunnel_half_width(depth: i32) -> i32 {
    TUNNEL_MIN_HALF_WIDTH.max(depth / 4)
}

/// Let floating terrain fall: in every column within `radius` of `cx`, pack
/// the terrain cells to the bottom keeping their order. Actor pixels stay put.
pub fn compact_terrain(raster: &mut TerrainRaster, cx: i32, _cy: i32, radius: i32) {
    if radius < 0 {
        return;
    }
    let h = raster.height() as i32;
    let left = (cx - radius).max(0);
    let right = (cx + radius).min(raster.width() as i32 - 1);

    for x in left..=right {
        let packed: Vec<u8> = (PLAYFIELD_TOP..h)
            .rev()
            .map(|y| raster.sample(x, y))
            .filter(|&v| is_terrain(v))
            .collect();
        let mut packed = packed.into_iter();

        for y in (PLAYFIELD_TOP..h).rev() {
            let current = raster.sample(x, y);
            if is_actor(current) {
                continue;
            }
            match packed.next() {
                Some(value) => raster.set_cell(x, y, value),
                None if is_terrain(current) => raster.set_cell(x, y, sky_value(y, h as usize)),
                None => {}
            }
        }
        raster.recompute_column(x);
    }
}

/// Level the ground under a footprint to its average height.
pub fn level_footprint(raster: &mut TerrainRaster, cx: i32, half_width: i32) {
    let h = raster.height() as i32;
    let columns: Vec<i32> = (cx - half_width..=cx + half_width)
        .filter(|&x| x >= 0 && (x as usize) < raster.width())
        .collect();
    if columns.is_empty() {
        return;
    }
    let sum: i32 = columns.iter().map(|&x| raster.height_at(x)).sum();
    let level = (sum / columns.len() as i32).clamp(PLAYFIELD_TOP, h);

    for &x in &columns {
        for y in PLAYFIELD_TOP..h {
            let current = raster.sample(x, y);
            if y < level {
                if is_terrain(current) {
                    raster.set_cell(x, y, sky_value(y, h as usize));
                }
            } else if !is_terrain(current) && !is_actor(current) {
                raster.set_cell(x, y, terrain_shade(y, h as usize));
            }
        }
        raster.recompute_column(x);
    }
}

fn fill_cell(raster: &mut TerrainRaster, x: i32, y: i32) {
    if y < PLAYFIELD_TOP || !raster.in_bounds(x, y) {
        return;
    }
    let current = raster.sample(x, y);
    if !is_terrain(current) && !is_actor(current) {
        raster.set_cell(x, y, terrain_shade(y, raster.height()));
    }
}
