use crate::discretization::grid::{AppliedField, Grid};
use crate::error::PicError;
use crate::physics::emission::child_langmuir_current;
use crate::physics::momentum_from_energy;
use crate::physics::weighting::WeightingScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Planar diode problem definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiodeParams {
    pub length: f64,  // [m] cathode-anode gap
    pub n_nodes: usize,
    pub dt: f64,      // [s]
    pub t_imp: f64,   // [s] warm-up before the convergence test runs
    pub u_anode: f64, // [V]
    pub e0: f64,      // [eV] starting kinetic energy of emitted electrons
    pub method: WeightingScheme,
    /// Relative change of the cathode field below which injection stops.
    pub convergence_eps: f64,
    /// Only let accelerating (negative) node fields act on particles.
    pub clamp_retarding_field: bool,
    /// Number of steps averaged for the steady-state anode current.
    pub current_window: usize,
    /// Steps between progress log lines.
    pub progress_interval: u64,
    /// Abort if the gap has not drained after this many steps.
    pub max_steps: Option<u64>,
}

impl Default for DiodeParams {
    fn default() -> Self {
        Self {
            length: 0.01,
            n_nodes: 101,
            dt: 1e-12,
            t_imp: 5e-8,
            u_anode: 1000.0,
            e0: 1.0,
            method: WeightingScheme::NearestNode,
            convergence_eps: 1e-5,
            clamp_retarding_field: true,
            current_window: 1000,
            progress_interval: 10_000,
            max_steps: None,
        }
    }
}

impl DiodeParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PicError> {
        let content = fs::read_to_string(path)?;
        let params: DiodeParams = toml::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), PicError> {
        let fail = |msg: &str| Err(PicError::InvalidConfig(msg.to_string()));
        if !(self.length > 0.0) {
            return fail("length must be positive");
        }
        if self.n_nodes < 3 {
            return fail("n_nodes must be at least 3");
        }
        if !(self.dt > 0.0) {
            return fail("dt must be positive");
        }
        if !(self.t_imp >= 0.0) {
            return fail("t_imp must not be negative");
        }
        if !(self.u_anode > 0.0) {
            return fail("u_anode must be positive");
        }
        if !(self.e0 >= 0.0) {
            return fail("e0 must not be negative");
        }
        if !(self.convergence_eps > 0.0) {
            return fail("convergence_eps must be positive");
        }
        if self.current_window == 0 {
            return fail("current_window must be at least 1");
        }
        Ok(())
    }

    pub fn spacing(&self) -> f64 {
        self.length / (self.n_nodes - 1) as f64
    }

    pub fn applied_field(&self) -> AppliedField {
        AppliedField::Linear {
            voltage: self.u_anode,
            length: self.length,
        }
    }

    pub fn build_grid(&self) -> Grid {
        Grid::uniform(self.length, self.n_nodes, self.applied_field())
    }

    /// Reduced momentum of a freshly emitted electron.
    pub fn p0(&self) -> f64 {
        momentum_from_energy(self.e0)
    }

    pub fn child_langmuir_current(&self) -> f64 {
        child_langmuir_current(self.u_anode, self.length)
    }
}
