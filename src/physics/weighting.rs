//! Particle-to-grid weighting shared by charge deposition and force
//! interpolation.

use crate::discretization::grid::Grid;
use crate::error::PicError;
use serde::{Deserialize, Serialize};

/// Round-off tolerated on a weight before it is treated as out of range.
const WEIGHT_ROUNDOFF: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightingScheme {
    /// Whole charge on the closest node (NGP).
    #[default]
    NearestNode,
    /// Linear split between the two bracketing nodes (CIC).
    LinearTwoNode,
}

/// The (node, weight) pairs a particle couples to. At most two entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stencil {
    nodes: [usize; 2],
    weights: [f64; 2],
    len: usize,
}

impl Stencil {
    pub fn single(node: usize) -> Self {
        Self {
            nodes: [node, 0],
            weights: [1.0, 0.0],
            len: 1,
        }
    }

    pub fn pair(left: usize, w_left: f64, w_right: f64) -> Self {
        Self {
            nodes: [left, left + 1],
            weights: [w_left, w_right],
            len: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .take(self.len)
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights[..self.len].iter().sum()
    }
}

impl WeightingScheme {
    /// Stencil of a particle at `x`. Positions that cannot be assigned to
    /// valid nodes are a fatal [`PicError::DomainViolation`].
    pub fn stencil(&self, grid: &Grid, x: f64) -> Result<Stencil, PicError> {
        let h = grid.spacing();
        let n = grid.len();
        let out_of_domain = || PicError::DomainViolation {
            x,
            length: grid.length(),
        };

        match self {
            WeightingScheme::NearestNode => {
                if !(x >= -0.5 * h && x < grid.length() + 0.5 * h) {
                    return Err(out_of_domain());
                }
                let node = ((x / h).round() as usize).min(n - 1);
                Ok(Stencil::single(node))
            }
            WeightingScheme::LinearTwoNode => {
                if !(x >= 0.0 && x <= grid.length()) {
                    return Err(out_of_domain());
                }
                let left = ((x / h).floor() as usize).min(n - 2);
                let frac = snap_weight((x - grid.node(left).x) / h, x)?;
                Ok(Stencil::pair(left, 1.0 - frac, frac))
            }
        }
    }
}

fn snap_weight(w: f64, x: f64) -> Result<f64, PicError> {
    if (0.0..=1.0).contains(&w) {
        Ok(w)
    } else if w > -WEIGHT_ROUNDOFF && w < 1.0 + WEIGHT_ROUNDOFF {
        Ok(w.clamp(0.0, 1.0))
    } else {
        Err(PicError::WeightOutOfRange { weight: w, x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::grid::AppliedField;
    use approx::assert_relative_eq;

    fn grid() -> Grid {
        Grid::uniform(
            1.0,
            11,
            AppliedField::Linear {
                voltage: 1.0,
                length: 1.0,
            },
        )
    }

    #[test]
    fn linear_weights_sum_to_one_inside_the_domain() {
        let g = grid();
        for k in 0..1000 {
            let x = k as f64 * 1e-3 + 3.7e-4;
            let s = WeightingScheme::LinearTwoNode.stencil(&g, x).unwrap();
            assert_eq!(s.len(), 2);
            assert_relative_eq!(s.weight_sum(), 1.0, epsilon = 1e-14);
            for (node, w) in s.iter() {
                assert!((0.0..=1.0).contains(&w));
                assert_relative_eq!(w, 1.0 - (x - g.node(node).x).abs() / g.spacing(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn linear_brackets_the_anode_itself() {
        let g = grid();
        let s = WeightingScheme::LinearTwoNode.stencil(&g, 1.0).unwrap();
        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(pairs[0].0, 9);
        assert_eq!(pairs[1].0, 10);
        assert_relative_eq!(pairs[1].1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_rejects_positions_outside_the_gap() {
        let g = grid();
        for x in [-1e-9, 1.0 + 1e-9, f64::NAN] {
            assert!(matches!(
                WeightingScheme::LinearTwoNode.stencil(&g, x),
                Err(PicError::DomainViolation { .. })
            ));
        }
    }

    #[test]
    fn nearest_node_picks_closest() {
        let g = grid();
        let pick = |x| {
            WeightingScheme::NearestNode
                .stencil(&g, x)
                .unwrap()
                .iter()
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(0.0), vec![(0, 1.0)]);
        assert_eq!(pick(0.04), vec![(0, 1.0)]);
        assert_eq!(pick(0.06), vec![(1, 1.0)]);
        assert_eq!(pick(1.0), vec![(10, 1.0)]);
        assert!(WeightingScheme::NearestNode.stencil(&g, 1.06).is_err());
        assert!(WeightingScheme::NearestNode.stencil(&g, -0.06).is_err());
    }

    #[test]
    fn weights_far_outside_unit_interval_are_fatal() {
        assert!(matches!(
            snap_weight(-0.1, 0.5),
            Err(PicError::WeightOutOfRange { .. })
        ));
        assert_eq!(snap_weight(-1e-15, 0.5).unwrap(), 0.0);
        assert_eq!(snap_weight(1.0 + 1e-15, 0.5).unwrap(), 1.0);
    }
}
