//! Wind random walk between shots.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use scorch_core::config::SimConfig;
use scorch_core::constants::{WIND_CLAMP_FACTOR, WIND_WALK_STEP};

/// Next wind value: a step of up to ±5 clamped to `±max_wind * 4`.
/// Unchanged when wind changes are disabled.
pub fn change(wind: f64, config: &SimConfig, rng: &mut ChaCha8Rng) -> f64 {
    if !config.change_wind {
        return wind;
    }
    let delta = rng.gen_range(-WIND_WALK_STEP..=WIND_WALK_STEP) as f64;
    let limit = config.max_wind * WIND_CLAMP_FACTOR;
    (wind + delta).clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_wind_walk_is_bounded() {
        let config = SimConfig {
            max_wind: 2.0,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut wind = 0.0;
        for _ in 0..500 {
            let next = change(wind, &config, &mut rng);
            assert!((next - wind).abs() <= WIND_WALK_STEP as f64);
            assert!(next.abs() <= 8.0);
            wind = next;
        }
    }

    #[test]
    fn test_disabled_wind_is_constant() {
        let config = SimConfig {
            change_wind: false,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        assert_eq!(change(3.0, &config, &mut rng), 3.0);
    }
}
