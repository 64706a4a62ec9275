/// Score given to every entity when the population has no spread.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Min-max scale `value` onto 0–100. No clamping: callers derive `min` and
/// `max` from a population that includes `value`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return NEUTRAL_SCORE;
    }
    (value - min) / (max - min) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_zero_and_hundred() {
        assert_eq!(normalize(2.0, 2.0, 12.0), 0.0);
        assert_eq!(normalize(12.0, 2.0, 12.0), 100.0);
        assert_eq!(normalize(7.0, 2.0, 12.0), 50.0);
    }

    #[test]
    fn flat_population_is_neutral() {
        for x in [0.0, -3.5, 42.0, 1e9] {
            assert_eq!(normalize(x, x, x), 50.0);
        }
    }

    #[test]
    fn values_in_range_stay_in_range() {
        let (lo, hi) = (-10.0, 30.0);
        let mut v = lo;
        while v <= hi {
            let n = normalize(v, lo, hi);
            assert!((0.0..=100.0).contains(&n), "normalize({v}) = {n}");
            v += 0.25;
        }
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        assert_eq!(normalize(20.0, 0.0, 10.0), 200.0);
        assert_eq!(normalize(-10.0, 0.0, 10.0), -100.0);
    }
}
