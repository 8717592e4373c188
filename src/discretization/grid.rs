use serde::{Deserialize, Serialize};
use std::fmt;

/// Static field imposed by the electrode bias.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AppliedField {
    /// Uniform gap field `-voltage / length` of a planar diode.
    Linear { voltage: f64, length: f64 },
}

impl AppliedField {
    pub fn at(&self, _x: f64) -> f64 {
        match *self {
            AppliedField::Linear { voltage, length } => -voltage / length,
        }
    }
}

/// A single grid node. Position and applied field are fixed at construction.
#[derive(Debug, Clone)]
pub struct GridNode {
    pub x: f64,
    pub density: f64,    // [C/m^3]
    pub self_field: f64, // [V/m], beam contribution from the Poisson solve
    applied: AppliedField,
}

impl GridNode {
    pub fn applied_field(&self) -> f64 {
        self.applied.at(self.x)
    }

    pub fn combined_field(&self) -> f64 {
        self.applied_field() + self.self_field
    }
}

impl fmt::Display for GridNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node x={:.6e} rho={:.6e} E={:.6e}",
            self.x,
            self.density,
            self.combined_field()
        )
    }
}

/// Uniform 1D grid spanning the cathode (node 0) to the anode (node N-1).
#[derive(Debug, Clone)]
pub struct Grid {
    nodes: Vec<GridNode>,
    length: f64,
    spacing: f64,
}

impl Grid {
    /// Callers are expected to have validated `n_nodes >= 2` and `length > 0`.
    pub fn uniform(length: f64, n_nodes: usize, applied: AppliedField) -> Self {
        let spacing = length / (n_nodes - 1) as f64;
        let nodes = (0..n_nodes)
            .map(|i| GridNode {
                x: spacing * i as f64,
                density: 0.0,
                self_field: 0.0,
                applied,
            })
            .collect();
        Self {
            nodes,
            length,
            spacing,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn node(&self, i: usize) -> &GridNode {
        &self.nodes[i]
    }

    pub fn cathode(&self) -> &GridNode {
        &self.nodes[0]
    }

    pub fn clear_density(&mut self) {
        self.nodes.iter_mut().for_each(|n| n.density = 0.0);
    }

    pub fn add_density(&mut self, i: usize, rho: f64) {
        self.nodes[i].density += rho;
    }

    pub fn set_self_field(&mut self, i: usize, e: f64) {
        self.nodes[i].self_field = e;
    }

    /// Deposited charge per unit area, `sum(rho_i) * h`.
    pub fn total_charge(&self) -> f64 {
        self.nodes.iter().map(|n| n.density).sum::<f64>() * self.spacing
    }

    pub fn positions(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.x).collect()
    }

    pub fn densities(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.density).collect()
    }

    pub fn combined_fields(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.combined_field()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diode_grid() -> Grid {
        Grid::uniform(
            0.01,
            101,
            AppliedField::Linear {
                voltage: 1000.0,
                length: 0.01,
            },
        )
    }

    #[test]
    fn nodes_span_the_gap_uniformly() {
        let grid = diode_grid();
        assert_eq!(grid.len(), 101);
        assert_relative_eq!(grid.spacing(), 1e-4);
        assert_eq!(grid.node(0).x, 0.0);
        assert_relative_eq!(grid.node(100).x, 0.01, epsilon = 1e-15);
        for w in grid.nodes().windows(2) {
            assert_relative_eq!(w[1].x - w[0].x, 1e-4, epsilon = 1e-15);
        }
    }

    #[test]
    fn combined_field_adds_beam_correction() {
        let mut grid = diode_grid();
        assert_relative_eq!(grid.cathode().combined_field(), -1e5);
        grid.set_self_field(0, 2.5e4);
        assert_relative_eq!(grid.cathode().applied_field(), -1e5);
        assert_relative_eq!(grid.cathode().combined_field(), -7.5e4);
    }

    #[test]
    fn clear_density_resets_every_node() {
        let mut grid = diode_grid();
        grid.add_density(3, 1.0);
        grid.add_density(3, 2.0);
        assert_relative_eq!(grid.total_charge(), 3.0 * 1e-4);
        grid.clear_density();
        assert!(grid.densities().iter().all(|&d| d == 0.0));
    }
}
