use super::particle::ParticleSet;
use super::weighting::WeightingScheme;
use crate::discretization::grid::Grid;
use crate::error::PicError;

/// Maps particle charge onto the grid density.
#[derive(Debug, Clone, Copy)]
pub struct ChargeDepositor {
    pub scheme: WeightingScheme,
}

impl ChargeDepositor {
    pub fn new(scheme: WeightingScheme) -> Self {
        Self { scheme }
    }

    /// Zeroes the grid density and accumulates `q * w / h` from every
    /// particle. Each particle's stencil is stored for the interpolation
    /// that follows.
    pub fn deposit(&self, grid: &mut Grid, particles: &mut ParticleSet) -> Result<(), PicError> {
        grid.clear_density();
        let inv_h = 1.0 / grid.spacing();
        for particle in particles.iter_mut() {
            particle.e_field = 0.0;
            let stencil = self.scheme.stencil(grid, particle.x)?;
            for (node, w) in stencil.iter() {
                grid.add_density(node, particle.charge * w * inv_h);
            }
            particle.stencil = stencil;
        }
        Ok(())
    }
}
