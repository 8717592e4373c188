pub mod derivative;
pub mod timing;
pub mod transient;
pub mod tridiag;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    Absolute(f64),
    Relative(f64),
    Combined(f64, f64),
}

impl Tolerance {
    /// Whether a change of size `delta` against the reference magnitude
    /// `scale` is within tolerance. A relative change against a zero scale is
    /// never within tolerance.
    pub fn is_within(&self, delta: f64, scale: f64) -> bool {
        let relative = || {
            let r = (delta / scale).abs();
            r.is_finite() && r < self.relative_tol()
        };
        match *self {
            Tolerance::Absolute(tol) => delta.abs() < tol,
            Tolerance::Relative(_) => relative(),
            Tolerance::Combined(abs_tol, _) => delta.abs() < abs_tol || relative(),
        }
    }

    fn relative_tol(&self) -> f64 {
        match *self {
            Tolerance::Absolute(_) => 0.0,
            Tolerance::Relative(tol) | Tolerance::Combined(_, tol) => tol,
        }
    }
}
