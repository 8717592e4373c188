//! Tridiagonal systems solved with the Thomas algorithm.

use nalgebra::DVector;

/// `A x = d` with `A` stored as three diagonals of length `n`.
/// `a[0]` and `c[n-1]` are never read.
#[derive(Debug, Clone)]
pub struct TriDiagonalMatrix {
    pub a: DVector<f64>, // sub-diagonal
    pub b: DVector<f64>, // main diagonal
    pub c: DVector<f64>, // super-diagonal
}

impl TriDiagonalMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            a: DVector::zeros(n),
            b: DVector::zeros(n),
            c: DVector::zeros(n),
        }
    }

    /// Second-difference operator `1/h^2 [1, -2, 1]` on the interior rows and
    /// identity rows at both ends (Dirichlet boundaries).
    pub fn poisson_dirichlet(n: usize, h: f64) -> Self {
        let mut m = Self::zeros(n);
        let inv_h2 = 1.0 / (h * h);
        m.b[0] = 1.0;
        m.b[n - 1] = 1.0;
        for i in 1..n - 1 {
            m.a[i] = inv_h2;
            m.b[i] = -2.0 * inv_h2;
            m.c[i] = inv_h2;
        }
        m
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Forward elimination followed by back substitution, O(n).
    ///
    /// The diagonals are left untouched so the matrix can be reused with a new
    /// right-hand side every step. Panics if `d` has the wrong length.
    pub fn solve(&self, d: &DVector<f64>) -> DVector<f64> {
        let n = self.len();
        assert_eq!(d.len(), n, "rhs length must match matrix dimension");

        let mut c_prime = DVector::zeros(n);
        let mut d_prime = DVector::zeros(n);

        c_prime[0] = self.c[0] / self.b[0];
        d_prime[0] = d[0] / self.b[0];
        for i in 1..n {
            let den = self.b[i] - c_prime[i - 1] * self.a[i];
            if i < n - 1 {
                c_prime[i] = self.c[i] / den;
            }
            d_prime[i] = (d[i] - d_prime[i - 1] * self.a[i]) / den;
        }

        let mut x = DVector::zeros(n);
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }
        x
    }

    /// `A x`, used to check residuals.
    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        let n = self.len();
        DVector::from_fn(n, |i, _| {
            let mut v = self.b[i] * x[i];
            if i > 0 {
                v += self.a[i] * x[i - 1];
            }
            if i + 1 < n {
                v += self.c[i] * x[i + 1];
            }
            v
        })
    }
}
