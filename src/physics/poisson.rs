use super::EPSILON0;
use crate::discretization::grid::Grid;
use crate::error::PicError;
use crate::numerics::derivative;
use crate::numerics::tridiag::TriDiagonalMatrix;
use nalgebra::DVector;

/// Self-consistent beam field from `phi'' = -rho / eps0`.
///
/// Both electrodes are held at zero potential: the bias is already carried by
/// the applied field, so the solve only yields the beam's correction.
#[derive(Debug, Clone)]
pub struct FieldSolver {
    matrix: TriDiagonalMatrix,
    rhs: DVector<f64>,
    potential: DVector<f64>,
}

impl FieldSolver {
    pub fn new(grid: &Grid) -> Self {
        let n = grid.len();
        Self {
            matrix: TriDiagonalMatrix::poisson_dirichlet(n, grid.spacing()),
            rhs: DVector::zeros(n),
            potential: DVector::zeros(n),
        }
    }

    /// Potential of the last solve [V].
    pub fn potential(&self) -> &DVector<f64> {
        &self.potential
    }

    /// Rebuilds the right-hand side from the node densities, solves for the
    /// potential and stores `-dphi/dx` as each node's self field.
    pub fn solve(&mut self, grid: &mut Grid) -> Result<(), PicError> {
        let n = grid.len();
        self.rhs.fill(0.0);
        for i in 1..n - 1 {
            self.rhs[i] = -grid.node(i).density / EPSILON0;
        }
        self.potential = self.matrix.solve(&self.rhs);

        let slope = derivative::gradient(self.potential.as_slice(), grid.spacing());
        for (i, d) in slope.into_iter().enumerate() {
            if d.is_nan() {
                return Err(PicError::DerivativeDegenerate { node: i });
            }
            grid.set_self_field(i, -d);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::grid::AppliedField;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn grid(n: usize) -> Grid {
        Grid::uniform(
            1.0,
            n,
            AppliedField::Linear {
                voltage: 10.0,
                length: 1.0,
            },
        )
    }

    #[test]
    fn empty_gap_has_no_self_field() {
        let mut g = grid(21);
        let mut solver = FieldSolver::new(&g);
        solver.solve(&mut g).unwrap();
        for node in g.nodes() {
            assert_eq!(node.self_field, 0.0);
            assert_relative_eq!(node.combined_field(), -10.0);
        }
    }

    #[test]
    fn uniform_charge_gives_parabolic_potential() {
        let mut g = grid(41);
        let rho = -2.0 * EPSILON0;
        for i in 0..g.len() {
            g.add_density(i, rho);
        }
        let mut solver = FieldSolver::new(&g);
        solver.solve(&mut g).unwrap();

        // phi = -rho/(2 eps0) x (x - 1) = x (x - 1), E = -(2x - 1)
        for (i, node) in g.nodes().iter().enumerate() {
            let x = node.x;
            assert_abs_diff_eq!(solver.potential()[i], x * (x - 1.0), epsilon = 1e-10);
            assert_abs_diff_eq!(node.self_field, -2.0 * (x - 0.5), epsilon = 1e-9);
        }
        // Negative space charge weakens the accelerating field at the cathode.
        assert!(g.cathode().self_field > 0.0);
    }

    #[test]
    fn too_few_nodes_is_degenerate() {
        let mut g = grid(2);
        let mut solver = FieldSolver::new(&g);
        assert!(matches!(
            solver.solve(&mut g),
            Err(PicError::DerivativeDegenerate { node: 0 })
        ));
    }
}
