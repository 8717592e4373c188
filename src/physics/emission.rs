use super::particle::{Particle, ParticleSet};
use super::EPSILON0;
use crate::discretization::grid::Grid;
use crate::numerics::Tolerance;
use tracing::{info, trace};

/// Space-charge-limited current density of a planar diode [A/m^2],
/// `2.33e-6 U^1.5 / d^2`. Reference value only.
pub fn child_langmuir_current(u_anode: f64, length: f64) -> f64 {
    2.33e-6 * u_anode.powf(1.5) / (length * length)
}

/// Injects one particle per step at the cathode until the cathode field
/// settles, then switches injection off for good.
#[derive(Debug, Clone)]
pub struct EmissionController {
    pub p0: f64,
    pub t_imp: f64,
    pub tolerance: Tolerance,
    injection_enabled: bool,
    previous_cathode_field: Option<f64>,
    pub emitted_count: u64,
    pub emitted_charge: f64,
}

impl EmissionController {
    pub fn new(p0: f64, t_imp: f64, tolerance: Tolerance) -> Self {
        Self {
            p0,
            t_imp,
            tolerance,
            injection_enabled: true,
            previous_cathode_field: None,
            emitted_count: 0,
            emitted_charge: 0.0,
        }
    }

    pub fn injection_enabled(&self) -> bool {
        self.injection_enabled
    }

    /// Charge [C/m^2] that cancels the cathode field not yet screened by
    /// the charge already sitting on the cathode node.
    pub fn emission_charge(grid: &Grid) -> f64 {
        let cathode = grid.cathode();
        cathode.combined_field() * EPSILON0 - cathode.density * grid.spacing()
    }

    /// Adds a particle at `x = 0` and returns its charge, or `0.0` when
    /// injection is off or the cathode field does not call for electrons.
    pub fn inject(&mut self, grid: &Grid, particles: &mut ParticleSet) -> f64 {
        if !self.injection_enabled {
            return 0.0;
        }
        let q = Self::emission_charge(grid);
        if q.is_nan() || q >= 0.0 {
            trace!(charge = q, "cathode field does not extract electrons, skipping injection");
            return 0.0;
        }
        particles.push(Particle::at_cathode(self.p0, q));
        self.emitted_count += 1;
        self.emitted_charge += q;
        q
    }

    /// Compares this step's cathode field with the previous one once the
    /// warm-up `t_imp` has passed. Returns `true` on the step injection is
    /// switched off; it is never switched back on.
    pub fn check_convergence(&mut self, t: f64, cathode_field: f64) -> bool {
        let previous = self.previous_cathode_field.replace(cathode_field);
        if !self.injection_enabled || t <= self.t_imp {
            return false;
        }
        let Some(previous) = previous else {
            return false;
        };
        if self.tolerance.is_within(cathode_field - previous, cathode_field) {
            self.injection_enabled = false;
            info!(t, cathode_field, "cathode field settled, injection stopped");
            return true;
        }
        false
    }
}
