use super::weighting::Stencil;
use super::{beta, energy_from_momentum};
use std::fmt;

/// A charged macro-particle: a sheet of charge per unit electrode area.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,       // [m]
    pub p: f64,       // reduced momentum, dx/dtau = p / sqrt(1 + p^2)
    pub e_field: f64, // [V/m], field acting on the particle this step
    pub charge: f64,  // [C/m^2]
    /// Set until the first half-kick of the leapfrog has been applied.
    pub first_step: bool,
    /// Nodes and weights used for this step's deposition, reused verbatim by
    /// the interpolation.
    pub stencil: Stencil,
}

impl Particle {
    pub fn at_cathode(p0: f64, charge: f64) -> Self {
        Self {
            x: 0.0,
            p: p0,
            e_field: 0.0,
            charge,
            first_step: true,
            stencil: Stencil::default(),
        }
    }

    pub fn beta(&self) -> f64 {
        beta(self.p)
    }

    /// Kinetic energy [eV].
    pub fn energy(&self) -> f64 {
        energy_from_momentum(self.p)
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "particle: x={:.6e}, p={:.7}, beta={:.7}, W={:.7} eV",
            self.x,
            self.p,
            self.beta(),
            self.energy()
        )
    }
}

/// Particles removed at the anode by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Absorbed {
    pub count: usize,
    pub charge: f64,
}

/// Owns every active particle. Removal only happens in [`ParticleSet::absorb_beyond`],
/// never while the particles are being pushed.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn total_charge(&self) -> f64 {
        self.particles.iter().map(|p| p.charge).sum()
    }

    /// Removes every particle with `x > length` (strictly) by swapping it to
    /// the end and truncating. Order of the survivors is not preserved.
    pub fn absorb_beyond(&mut self, length: f64) -> Absorbed {
        let mut absorbed = Absorbed::default();
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].x > length {
                let gone = self.particles.swap_remove(i);
                absorbed.count += 1;
                absorbed.charge += gone.charge;
            } else {
                i += 1;
            }
        }
        absorbed
    }
}
