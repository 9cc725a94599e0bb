//! Land generators. Each produces a per-column height profile that
//! [`TerrainRaster::from_heights`] rasterizes.

use rand::Rng;

use scorch_core::constants::PLAYFIELD_TOP;
use scorch_core::enums::LandType;

use crate::raster::TerrainRaster;

/// Generate a terrain raster for the given land type.
pub fn generate(
    land: LandType,
    width: usize,
    height: usize,
    bumpiness: u32,
    rng: &mut impl Rng,
) -> TerrainRaster {
    let heights = generate_heights(land, width, height, bumpiness, rng);
    TerrainRaster::from_heights(width, height, &heights)
}

/// Height profile for the given land type.
pub fn generate_heights(
    land: LandType,
    width: usize,
    height: usize,
    bumpiness: u32,
    rng: &mut impl Rng,
) -> Vec<i32> {
    let top = PLAYFIELD_TOP;
    let bottom = height as i32 - 1;
    match land {
        LandType::Flat => vec![(top + bottom) / 2 + 20; width],
        LandType::Slope => slope(width, top, bottom),
        LandType::Rolling => rolling(width, top, bottom, bumpiness, rng),
        LandType::Mountain => mountain(width, top, bottom, rng),
        LandType::VShaped => v_shaped(width, top, bottom),
        LandType::Castle => castle(width, top, bottom, rng),
    }
}

/// Uniform integer in `[0, n)`; zero for an empty range.
fn rand_int(rng: &mut impl Rng, n: i32) -> i32 {
    if n <= 0 {
        0
    } else {
        rng.gen_range(0..n)
    }
}

fn slope(width: usize, top: i32, bottom: i32) -> Vec<i32> {
    let high = top + 40;
    let low = bottom - 1;
    let span = (width as i32 - 1).max(1);
    (0..width as i32)
        .map(|x| high + (low - high) * x / span)
        .collect()
}

fn v_shaped(width: usize, top: i32, bottom: i32) -> Vec<i32> {
    let center = (width as f64 / 2.0).floor().max(1.0);
    let high = (top + 50) as f64;
    let low = (bottom - 20) as f64;
    (0..width)
        .map(|x| {
            let dist = (x as f64 - center).abs() / center;
            (low - (low - high) * dist).floor() as i32
        })
        .collect()
}

/// Random walk with momentum. `bumpiness` is the percent chance to keep the
/// current slope, and separately to double a fresh one.
fn rolling(width: usize, top: i32, bottom: i32, bumpiness: u32, rng: &mut impl Rng) -> Vec<i32> {
    let chance = bumpiness as i32;
    let mut y = rand_int(rng, bottom - top - 60) + top + 40;
    let mut delta = 0;
    let mut heights = Vec::with_capacity(width);

    for _ in 0..width {
        heights.push(y.clamp(top + 20, bottom - 1));

        if rand_int(rng, 100) >= chance {
            delta = rand_int(rng, 3) - 1;
            if rand_int(rng, 100) < chance {
                delta *= 2;
            }
        }
        y += delta;

        if y < top + 40 {
            y = top + 40;
            if delta < 0 {
                delta = 1;
            }
        }
        if y > bottom - 1 {
            y = bottom - 1;
            if delta > 0 {
                delta = 0;
            }
        }
    }
    heights
}

/// Three overlaid sharp walks; the highest peak wins per column.
fn mountain(width: usize, top: i32, bottom: i32, rng: &mut impl Rng) -> Vec<i32> {
    let mut heights = vec![bottom - 1; width];

    for _ in 0..3 {
        let mut y = rand_int(rng, bottom - top - 80) + top + 50;
        let mut delta = 0;
        for col in heights.iter_mut() {
            *col = (*col).min(y.clamp(top + 20, bottom - 1));

            if rand_int(rng, 100) >= 8 {
                delta = rand_int(rng, 5) - 2;
                if rand_int(rng, 100) < 40 {
                    delta *= 2;
                }
            }
            y += delta;

            if y < top + 25 {
                y = top + 25;
                if delta < 0 {
                    delta = 2;
                }
            }
            if y > bottom - 1 {
                y = bottom - 1;
                if delta > 0 {
                    delta = -1;
                }
            }
        }
    }
    heights
}

/// Gently uneven base with crenellated towers.
fn castle(width: usize, top: i32, bottom: i32, rng: &mut impl Rng) -> Vec<i32> {
    let base = ((top + bottom) as f64 * 0.65).floor() as i32;
    let mut heights: Vec<i32> = (0..width).map(|_| base + rand_int(rng, 5) - 2).collect();

    let towers = 4 + rand_int(rng, 3);
    let spacing = width as i32 / (towers + 1);
    let w = width as i32;

    for t in 0..towers {
        let cx = spacing * (t + 1) + rand_int(rng, 20) - 10;
        let half = 10 + rand_int(rng, 8);
        let tower_top = (base - 30 - rand_int(rng, 25)).max(top + 5);

        for x in (cx - half).max(0)..=(cx + half).min(w - 1) {
            let col = &mut heights[x as usize];
            *col = (*col).min(tower_top);
        }

        let mut x = cx - half;
        while x <= cx + half {
            for bx in x..(x + 3).min(cx + half + 1) {
                if bx >= 0 && bx < w {
                    let col = &mut heights[bx as usize];
                    *col = (*col).min(tower_top - 5);
                }
            }
            x += 6;
        }
    }
    heights
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const ALL: [LandType; 6] = [
        LandType::Flat,
        LandType::Slope,
        LandType::Rolling,
        LandType::Mountain,
        LandType::VShaped,
        LandType::Castle,
    ];

    #[test]
    fn test_heights_stay_in_playfield() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for land in ALL {
            let heights = generate_heights(land, 320, 200, 20, &mut rng);
            assert_eq!(heights.len(), 320);
            for (x, &h) in heights.iter().enumerate() {
                assert!(
                    (PLAYFIELD_TOP..200).contains(&h),
                    "{land:?} column {x} height {h} outside playfield"
                );
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let ha = generate_heights(LandType::Rolling, 320, 200, 20, &mut a);
        let hb = generate_heights(LandType::Rolling, 320, 200, 20, &mut b);
        assert_eq!(ha, hb);
    }

    #[test]
    fn test_generated_raster_is_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let raster = generate(LandType::Mountain, 160, 120, 20, &mut rng);
        assert!(raster.heights_consistent());
    }

    #[test]
    fn test_slope_descends_left_to_right() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let heights = generate_heights(LandType::Slope, 100, 200, 20, &mut rng);
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }
}
