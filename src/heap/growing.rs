//! Old generation growing heuristics.
//!
//! After every full collection the old generation allocation limit is set to
//! the surviving size times a growing factor. The factor is picked in two
//! steps: [`max_growing_factor`] bounds it by how close the old generation is
//! to its ceiling, and [`heap_growing_factor`] picks a value under that bound
//! from the measured collector and mutator throughput.

use super::configuration::HeapConfiguration;
use super::constants::*;

/// Upper bound on the growing factor for an old generation of
/// `old_generation_size` bytes.
///
/// Grows linearly from `CONSERVATIVE_GROWING_FACTOR` at the configured minimum
/// to half of `MAX_GROWING_FACTOR` just below the configured maximum. Exactly at
/// (or past) the maximum the full `MAX_GROWING_FACTOR` is allowed again; from
/// there on the limit is capped by the ceiling itself, not by the factor.
pub fn max_growing_factor(config: &HeapConfiguration, old_generation_size: u64) -> f64 {
    let min_size = config.min_old_generation_size();
    let max_size = config.max_old_generation_size();

    if old_generation_size <= min_size {
        return CONSERVATIVE_GROWING_FACTOR;
    }
    if old_generation_size >= max_size {
        return MAX_GROWING_FACTOR;
    }

    let max_small_factor = MAX_GROWING_FACTOR / 2.0;
    let fraction = (old_generation_size - min_size) as f64 / (max_size - min_size) as f64;
    let factor =
        CONSERVATIVE_GROWING_FACTOR + fraction * (max_small_factor - CONSERVATIVE_GROWING_FACTOR);
    debug_assert!(factor >= CONSERVATIVE_GROWING_FACTOR && factor <= max_small_factor);
    factor
}

/// Growing factor for a cycle with the given collector and mutator speeds,
/// never above `max_factor` and never below `MIN_GROWING_FACTOR`.
///
/// With `mu` the target mutator utilization and `R` the speed ratio, the
/// factor `F` that gives the mutator `mu` of the time solves
/// `(F - 1) / F * (1 - mu) / mu = 1 / R`, i.e. `F = R * (1 - mu) / (R * (1 - mu) - mu)`.
/// Small ratios make the denominator vanish (or go negative), in which case
/// any factor meets the target and `max_factor` is used.
///
/// A missing sample (either speed `0`) also yields `max_factor`.
///
/// `max_factor` is expected in `[MIN_GROWING_FACTOR, MAX_GROWING_FACTOR]`, as
/// returned by [`max_growing_factor`]. Other values are accepted: the result
/// is still clamped to `max_factor` first and `MIN_GROWING_FACTOR` last.
pub fn heap_growing_factor(gc_speed: f64, mutator_speed: f64, max_factor: f64) -> f64 {
    // `!(x > 0.0)` also catches NaN.
    if !(gc_speed > 0.0) || !(mutator_speed > 0.0) {
        return max_factor;
    }

    let speed_ratio = gc_speed / mutator_speed;
    if !speed_ratio.is_finite() {
        return MIN_GROWING_FACTOR.min(max_factor);
    }
    let mu = TARGET_MUTATOR_UTILIZATION;

    let a = speed_ratio * (1.0 - mu);
    let b = speed_ratio * (1.0 - mu) - mu;

    // The factor is a / b, but b may be tiny or negative.
    let factor = if a < b * max_factor { a / b } else { max_factor };
    factor.min(max_factor).max(MIN_GROWING_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rounds to three digits.
    fn round(x: f64) -> f64 {
        (x * 1000.0 + 0.5).floor() / 1000.0
    }

    fn check_equal_rounded(expected: f64, actual: f64) {
        assert_eq!(round(expected), round(actual), "{} vs {}", expected, actual);
    }

    #[test]
    fn growing_factor() {
        check_equal_rounded(MAX_GROWING_FACTOR, heap_growing_factor(34.0, 1.0, 4.0));
        check_equal_rounded(3.553, heap_growing_factor(45.0, 1.0, 4.0));
        check_equal_rounded(2.830, heap_growing_factor(50.0, 1.0, 4.0));
        check_equal_rounded(1.478, heap_growing_factor(100.0, 1.0, 4.0));
        check_equal_rounded(1.193, heap_growing_factor(200.0, 1.0, 4.0));
        check_equal_rounded(1.121, heap_growing_factor(300.0, 1.0, 4.0));
        check_equal_rounded(
            heap_growing_factor(300.0, 1.0, 4.0),
            heap_growing_factor(600.0, 2.0, 4.0),
        );
        check_equal_rounded(MIN_GROWING_FACTOR, heap_growing_factor(400.0, 1.0, 4.0));
    }

    #[test]
    fn growing_factor_without_samples() {
        assert_eq!(heap_growing_factor(0.0, 1.0, 2.5), 2.5);
        assert_eq!(heap_growing_factor(100.0, 0.0, 2.5), 2.5);
        assert_eq!(heap_growing_factor(0.0, 0.0, MIN_GROWING_FACTOR), MIN_GROWING_FACTOR);
        assert_eq!(heap_growing_factor(f64::NAN, 1.0, 3.0), 3.0);
    }

    #[test]
    fn growing_factor_respects_ceiling() {
        // Cheap collections are capped by whatever the ceiling allows.
        assert_eq!(heap_growing_factor(1.0, 1.0, 1.3), 1.3);
        assert_eq!(heap_growing_factor(45.0, 1.0, 2.0), 2.0);
        // Expensive collections still bottom out at the minimum.
        assert_eq!(heap_growing_factor(10_000.0, 1.0, 1.3), MIN_GROWING_FACTOR);
    }

    #[test]
    fn growing_factor_with_out_of_range_ceiling() {
        assert_eq!(heap_growing_factor(0.0, 0.0, 4.5), 4.5);
        assert_eq!(heap_growing_factor(34.0, 1.0, 4.5), 4.5);
        assert_eq!(heap_growing_factor(45.0, 1.0, 1.0), MIN_GROWING_FACTOR);
    }

    #[test]
    fn growing_factor_with_infinite_ratio() {
        assert_eq!(heap_growing_factor(f64::INFINITY, 1.0, 4.0), MIN_GROWING_FACTOR);
        assert_eq!(heap_growing_factor(1.0, f64::INFINITY, 4.0), 4.0);
    }

    #[test]
    fn max_growing_factor_calibration() {
        for config in [HeapConfiguration::narrow(), HeapConfiguration::wide()].iter() {
            let pm = config.pointer_multiplier();
            check_equal_rounded(1.3, max_growing_factor(config, config.min_old_generation_size()));
            check_equal_rounded(
                1.6,
                max_growing_factor(config, config.max_old_generation_size() / 2),
            );
            check_equal_rounded(
                1.999,
                max_growing_factor(config, config.max_old_generation_size() - pm * MB),
            );
            check_equal_rounded(4.0, max_growing_factor(config, config.max_old_generation_size()));
        }
    }

    #[test]
    fn max_growing_factor_jumps_at_the_ceiling() {
        let config = HeapConfiguration::wide();
        let below = max_growing_factor(&config, config.max_old_generation_size() - 1);
        let at = max_growing_factor(&config, config.max_old_generation_size());
        assert!(below < MAX_GROWING_FACTOR / 2.0 + 1e-9);
        assert_eq!(at, MAX_GROWING_FACTOR);
        assert_eq!(max_growing_factor(&config, u64::MAX), MAX_GROWING_FACTOR);
    }

    #[test]
    fn max_growing_factor_below_minimum() {
        let config = HeapConfiguration::wide();
        assert_eq!(max_growing_factor(&config, 0), CONSERVATIVE_GROWING_FACTOR);
        assert_eq!(
            max_growing_factor(&config, config.min_old_generation_size() / 2),
            CONSERVATIVE_GROWING_FACTOR
        );
    }
}
