//! TerrainRaster: per-pixel classification grid with a per-column height index.
//!
//! Value bands: `0` empty, `1..80` actors (actor = value / 8), `80..105`
//! sky and HUD, `105..` terrain. The height index of a column is the first
//! terrain row at or below `PLAYFIELD_TOP`, or the screen height when the
//! column has no terrain.

use tracing::warn;

use scorch_core::constants::*;
use scorch_core::types::ActorId;

/// Destructible classification raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainRaster {
    width: usize,
    height: usize,
    /// Row-major, top-to-bottom.
    cells: Vec<u8>,
    heights: Vec<i32>,
}

/// Sky gradient value for a row.
pub fn sky_value(y: i32, height: usize) -> u8 {
    let span = (height as i32 - 1).max(1);
    let step = (y.clamp(0, span) * SKY_STEPS) / span;
    SKY_BASE + step as u8
}

/// Depth-graded terrain value for a row.
pub fn terrain_shade(y: i32, height: usize) -> u8 {
    let h = height as i32;
    let range = (h - PLAYFIELD_TOP).max(1);
    let step = ((h - 1 - y) * TERRAIN_SHADE_STEPS / range).clamp(0, TERRAIN_SHADE_STEPS);
    TERRAIN_SHADE_BASE + step as u8
}

pub fn is_terrain(value: u8) -> bool {
    value >= TERRAIN_THRESHOLD
}

pub fn is_actor(value: u8) -> bool {
    value > 0 && value < ACTOR_BAND_END
}

impl TerrainRaster {
    /// All-sky raster with no terrain.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = vec![0u8; width * height];
        for y in 0..height {
            let sky = sky_value(y as i32, height);
            cells[y * width..(y + 1) * width].fill(sky);
        }
        Self {
            width,
            height,
            cells,
            heights: vec![height as i32; width],
        }
    }

    /// Rasterize a height profile: terrain from `heights[x]` to the bottom.
    /// Missing columns are left empty.
    pub fn from_heights(width: usize, height: usize, heights: &[i32]) -> Self {
        let mut raster = Self::new(width, height);
        for (x, &top) in heights.iter().enumerate().take(width) {
            let top = top.clamp(PLAYFIELD_TOP, height as i32);
            for y in top..height as i32 {
                let shade = terrain_shade(y, height);
                raster.set_cell(x as i32, y, shade);
            }
        }
        raster.recompute_all();
        raster
    }

    /// Level ground with its surface at `ground_row`.
    pub fn flat(width: usize, height: usize, ground_row: i32) -> Self {
        Self::from_heights(width, height, &vec![ground_row; width])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Classification value at a pixel. Outside the raster reads as empty.
    pub fn sample(&self, x: i32, y: i32) -> u8 {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize]
        } else {
            0
        }
    }

    /// Write one pixel and keep the column's height index current.
    /// Writes outside the raster are ignored.
    pub fn write(&mut self, x: i32, y: i32, value: u8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let old = self.sample(x, y);
        self.set_cell(x, y, value);
        let col = x as usize;
        if y < PLAYFIELD_TOP {
            return;
        }
        if is_terrain(value) && y < self.heights[col] {
            self.heights[col] = y;
        } else if is_terrain(old) && !is_terrain(value) && y == self.heights[col] {
            self.recompute_column(x);
        }
    }

    /// Raw write without height maintenance. Callers recompute touched columns.
    pub(crate) fn set_cell(&mut self, x: i32, y: i32, value: u8) {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize] = value;
        }
    }

    /// Height index of a column. Outside the raster reports the screen height.
    pub fn height_at(&self, x: i32) -> i32 {
        if x >= 0 && (x as usize) < self.width {
            self.heights[x as usize]
        } else {
            self.height as i32
        }
    }

    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    /// Rescan one column from the playfield top.
    pub fn recompute_column(&mut self, x: i32) {
        if x < 0 || x as usize >= self.width {
            return;
        }
        let col = x as usize;
        self.heights[col] = (PLAYFIELD_TOP..self.height as i32)
            .find(|&y| is_terrain(self.cells[y as usize * self.width + col]))
            .unwrap_or(self.height as i32);
    }

    pub fn recompute_all(&mut self) {
        for x in 0..self.width as i32 {
            self.recompute_column(x);
        }
    }

    /// Every column's cached height matches a fresh scan.
    pub fn heights_consistent(&self) -> bool {
        (0..self.width as i32).all(|x| {
            let scanned = (PLAYFIELD_TOP..self.height as i32)
                .find(|&y| is_terrain(self.sample(x, y)))
                .unwrap_or(self.height as i32);
            scanned == self.height_at(x)
        })
    }

    /// Replace every actor pixel with sky.
    pub fn clear_actors(&mut self) {
        for y in 0..self.height {
            let sky = sky_value(y as i32, self.height);
            for cell in &mut self.cells[y * self.width..(y + 1) * self.width] {
                if is_actor(*cell) {
                    *cell = sky;
                }
            }
        }
    }

    /// Draw an actor's body and dome above `ground_y` in its palette slots.
    /// Terrain pixels are never overwritten.
    pub fn stamp_actor(&mut self, id: ActorId, x: i32, ground_y: i32) {
        if id.0 >= MAX_ACTORS {
            warn!(actor = id.0, "actor index does not fit the actor band");
            return;
        }
        let base = id.palette_base();

        for row in 0..ACTOR_BODY_HEIGHT {
            let y = ground_y - 1 - row;
            let slot = 1 + row as u8;
            for dx in -ACTOR_HALF_WIDTH..=ACTOR_HALF_WIDTH {
                self.stamp_pixel(x + dx, y, base + slot);
            }
        }

        for rise in 0..ACTOR_DOME_HEIGHT {
            let y = ground_y - ACTOR_BODY_HEIGHT - 1 - rise;
            let half = ACTOR_HALF_WIDTH - rise;
            for dx in -half..=half {
                self.stamp_pixel(x + dx, y, base + 4);
            }
        }
    }

    fn stamp_pixel(&mut self, x: i32, y: i32, value: u8) {
        if self.in_bounds(x, y) && !is_terrain(self.sample(x, y)) {
            self.set_cell(x, y, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_raster_heights() {
        let raster = TerrainRaster::flat(64, 100, 60);
        assert!(raster.heights().iter().all(|&h| h == 60));
        assert!(is_terrain(raster.sample(10, 60)));
        assert!(!is_terrain(raster.sample(10, 59)));
        assert!(raster.heights_consistent());
    }

    #[test]
    fn test_value_bands() {
        let h = 200;
        for y in 0..h as i32 {
            let sky = sky_value(y, h);
            assert!((SKY_BASE..TERRAIN_THRESHOLD).contains(&sky), "sky {sky} at row {y}");
            let shade = terrain_shade(y, h);
            assert!(shade >= TERRAIN_SHADE_BASE && shade <= TERRAIN_SHADE_BASE + 29);
            assert!(is_terrain(shade));
        }
    }

    #[test]
    fn test_out_of_bounds_is_harmless() {
        let mut raster = TerrainRaster::flat(32, 64, 40);
        assert_eq!(raster.sample(-1, 10), 0);
        assert_eq!(raster.sample(32, 10), 0);
        assert_eq!(raster.height_at(-5), 64);
        raster.write(100, 100, 200);
        assert!(raster.heights_consistent());
    }

    #[test]
    fn test_write_maintains_height_index() {
        let mut raster = TerrainRaster::flat(32, 64, 40);
        raster.write(5, 30, TERRAIN_SHADE_BASE);
        assert_eq!(raster.height_at(5), 30);
        raster.write(5, 30, sky_value(30, 64));
        assert_eq!(raster.height_at(5), 40);
        raster.write(5, 40, sky_value(40, 64));
        assert_eq!(raster.height_at(5), 41);
        assert!(raster.heights_consistent());
    }

    #[test]
    fn test_column_without_terrain_reports_screen_height() {
        let raster = TerrainRaster::new(16, 50);
        assert_eq!(raster.height_at(3), 50);
    }

    #[test]
    fn test_stamp_and_clear_actor() {
        let mut raster = TerrainRaster::flat(64, 100, 80);
        raster.stamp_actor(ActorId(2), 30, 80);
        let body = raster.sample(30, 79);
        assert!(is_actor(body));
        assert_eq!(body / ACTOR_PALETTE_STRIDE, 2);
        assert!(is_actor(raster.sample(30, 80 - 8)), "dome peak");
        assert!(!is_actor(raster.sample(34, 79)), "outside footprint");
        assert_eq!(raster.height_at(30), 80, "stamping leaves terrain alone");

        raster.clear_actors();
        assert!(!is_actor(raster.sample(30, 79)));
        assert_eq!(raster.sample(30, 79), sky_value(79, 100));
    }
}
