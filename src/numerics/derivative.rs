//! First derivatives of sampled data on a uniform spacing `h`.
//!
//! Each formula returns `f64::NAN` when the stencil does not fit inside `y`
//! or `h == 0`; callers must check for it before using the value.

/// Second-order one-sided forward difference.
pub fn forward(y: &[f64], i: usize, h: f64) -> f64 {
    if h == 0.0 || y.len() < 3 || i + 2 >= y.len() {
        return f64::NAN;
    }
    (-3.0 * y[i] + 4.0 * y[i + 1] - y[i + 2]) / (2.0 * h)
}

/// Second-order central difference.
pub fn central(y: &[f64], i: usize, h: f64) -> f64 {
    if h == 0.0 || y.len() < 3 || i < 1 || i + 1 >= y.len() {
        return f64::NAN;
    }
    (y[i + 1] - y[i - 1]) / (2.0 * h)
}

/// Second-order one-sided backward difference.
pub fn backward(y: &[f64], i: usize, h: f64) -> f64 {
    if h == 0.0 || y.len() < 3 || i < 2 || i >= y.len() {
        return f64::NAN;
    }
    (3.0 * y[i] - 4.0 * y[i - 1] + y[i - 2]) / (2.0 * h)
}

/// Derivative at every sample: forward at the first point, central in the
/// interior and backward at the last point.
pub fn gradient(y: &[f64], h: f64) -> Vec<f64> {
    let n = y.len();
    (0..n)
        .map(|i| {
            if i == 0 {
                forward(y, i, h)
            } else if i == n - 1 {
                backward(y, i, h)
            } else {
                central(y, i, h)
            }
        })
        .collect()
}
