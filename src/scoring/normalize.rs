/// Score returned for a range that cannot be normalized against.
pub const NEUTRAL_SCORE: f64 = 50.0;

fn is_degenerate(min: f64, max: f64) -> bool {
    max <= min || min.is_nan() || max.is_nan()
}

/// Maps `x` onto 0..=100 where `min` scores 100 and `max` scores 0.
pub fn normalize_lower_better(x: f64, min: f64, max: f64) -> f64 {
    if is_degenerate(min, max) {
        return NEUTRAL_SCORE;
    }
    let clamped = x.clamp(min, max);
    ((max - clamped) / (max - min)) * 100.0
}

/// Maps `x` onto 0..=100 where `min` scores 0 and `max` scores 100.
pub fn normalize_higher_better(x: f64, min: f64, max: f64) -> f64 {
    if is_degenerate(min, max) {
        return NEUTRAL_SCORE;
    }
    let clamped = x.clamp(min, max);
    ((clamped - min) / (max - min)) * 100.0
}
