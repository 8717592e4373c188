use super::particle::{Particle, ParticleSet};
use crate::discretization::grid::Grid;

/// Reads the combined grid field back onto the particles.
///
/// Uses the stencil stored on each particle by the preceding deposition, so
/// a particle is pushed by the same nodes and weights it deposited on. Must
/// only run after the whole deposition pass and the field solve.
#[derive(Debug, Clone, Copy)]
pub struct ForceInterpolator {
    /// Limit each node's field to `min(E, 0)`, i.e. only accelerating fields
    /// act on the electrons.
    pub clamp_retarding_field: bool,
}

impl ForceInterpolator {
    pub fn new(clamp_retarding_field: bool) -> Self {
        Self {
            clamp_retarding_field,
        }
    }

    pub fn interpolate(&self, grid: &Grid, particles: &mut ParticleSet) {
        for particle in particles.iter_mut() {
            particle.e_field = self.field_at(grid, particle);
        }
    }

    pub fn field_at(&self, grid: &Grid, particle: &Particle) -> f64 {
        particle
            .stencil
            .iter()
            .map(|(node, w)| {
                let e = grid.node(node).combined_field();
                let e = if self.clamp_retarding_field { e.min(0.0) } else { e };
                e * w
            })
            .sum()
    }
}
