//! Numerically stable primitives for log-odds math.

/// Stable logistic function: 1 / (1 + exp(-x)).
///
/// Maps a log-odds value onto a probability in [0, 1] without overflowing
/// for large |x|. Returns NaN for NaN input.
pub fn logistic(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
