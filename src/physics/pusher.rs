use super::particle::ParticleSet;
use super::{ALPHA, C};

/// Relativistic leapfrog in reduced time `tau = c t`:
/// `dp/dtau = alpha E`, `dx/dtau = beta(p)`.
#[derive(Debug, Clone, Copy)]
pub struct ParticlePusher {
    pub dtau: f64, // [m]
    pub alpha: f64,
}

impl ParticlePusher {
    pub fn new(dt: f64) -> Self {
        Self {
            dtau: C * dt,
            alpha: ALPHA,
        }
    }

    /// Advances every particle by one step. A particle's first step starts
    /// with a backward half kick so momentum lags position by half a step.
    pub fn push(&self, particles: &mut ParticleSet) {
        for particle in particles.iter_mut() {
            let kick = self.dtau * self.alpha * particle.e_field;
            if particle.first_step {
                particle.p -= 0.5 * kick;
                particle.first_step = false;
            }
            particle.p += kick;
            particle.x += self.dtau * particle.beta();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::beta;
    use crate::physics::particle::Particle;
    use approx::assert_relative_eq;

    #[test]
    fn first_step_applies_net_half_kick() {
        let pusher = ParticlePusher::new(1e-12);
        let mut set = ParticleSet::default();
        let mut particle = Particle::at_cathode(1e-3, -1.0);
        particle.e_field = -1e5;
        set.push(particle);

        pusher.push(&mut set);
        let kick = pusher.dtau * ALPHA * -1e5;
        let p1 = 1e-3 + 0.5 * kick;
        let first = set.iter().next().unwrap().clone();
        assert!(!first.first_step);
        assert_relative_eq!(first.p, p1, max_relative = 1e-12);
        assert_relative_eq!(first.x, pusher.dtau * beta(p1), max_relative = 1e-12);

        pusher.push(&mut set);
        let second = set.iter().next().unwrap();
        assert_relative_eq!(second.p, p1 + kick, max_relative = 1e-12);
    }

    #[test]
    fn electrons_accelerate_toward_the_anode() {
        let pusher = ParticlePusher::new(1e-12);
        let mut set = ParticleSet::default();
        let mut particle = Particle::at_cathode(0.0, -1.0);
        particle.e_field = -1e5;
        set.push(particle);
        let mut last_x = 0.0;
        for _ in 0..100 {
            pusher.push(&mut set);
            let x = set.iter().next().unwrap().x;
            assert!(x > last_x);
            last_x = x;
        }
        // 0.5 (e E / m) t^2 at t = 100 ps
        assert_relative_eq!(last_x, 0.5 * 1.7588e16 * 1e-20, max_relative = 2e-2);
    }
}
