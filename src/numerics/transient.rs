use crate::discretization::grid::Grid;
use crate::error::PicError;
use crate::models::diode::DiodeParams;
use crate::numerics::timing::{Phase, TimingStats};
use crate::numerics::Tolerance;
use crate::physics::deposition::ChargeDepositor;
use crate::physics::emission::EmissionController;
use crate::physics::interpolation::ForceInterpolator;
use crate::physics::particle::ParticleSet;
use crate::physics::poisson::FieldSolver;
use crate::physics::pusher::ParticlePusher;
use nalgebra::DVector;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Injecting while waiting for the cathode field to settle.
    Running,
    /// Injection stopped, particles still in flight.
    Draining,
    /// Gap empty. Terminal.
    Done,
}

/// Diagnostics of one completed step. Currents are magnitudes [A/m^2].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub iteration: u64,
    pub time: f64,
    pub cathode_field: f64,
    pub cathode_current: f64,
    pub anode_current: f64,
    pub child_langmuir: f64,
    pub particles: usize,
    pub state: LoopState,
}

pub struct RunResult {
    pub iterations: u64,
    pub time: f64,
    pub emitted_count: u64,
    pub emitted_charge: f64,
    pub absorbed_count: u64,
    pub absorbed_charge: f64,
    pub injection_stopped_at: Option<f64>,
    pub settled_cathode_field: Option<f64>,
    pub settled_cathode_current: Option<f64>,
    /// Mean anode current over the averaging window when injection stopped.
    pub steady_state_current: f64,
    pub child_langmuir: f64,
}

/// Particle-in-cell model of the diode gap, advanced one step at a time.
pub struct ParticleInCell {
    params: DiodeParams,
    grid: Grid,
    particles: ParticleSet,
    depositor: ChargeDepositor,
    field_solver: FieldSolver,
    interpolator: ForceInterpolator,
    pusher: ParticlePusher,
    emission: EmissionController,
    state: LoopState,
    t: f64,
    iterations: u64,
    absorbed_count: u64,
    absorbed_charge: f64,
    anode_window: VecDeque<f64>,
    injection_stopped_at: Option<f64>,
    settled_cathode_field: Option<f64>,
    settled_cathode_current: Option<f64>,
    steady_state_current: Option<f64>,
    timings: TimingStats,
}

impl ParticleInCell {
    pub fn new(params: DiodeParams) -> Result<Self, PicError> {
        params.validate()?;
        let grid = params.build_grid();
        let field_solver = FieldSolver::new(&grid);
        let expected = (params.t_imp / params.dt) as usize + 1;
        Ok(Self {
            depositor: ChargeDepositor::new(params.method),
            interpolator: ForceInterpolator::new(params.clamp_retarding_field),
            pusher: ParticlePusher::new(params.dt),
            emission: EmissionController::new(
                params.p0(),
                params.t_imp,
                Tolerance::Relative(params.convergence_eps),
            ),
            particles: ParticleSet::with_capacity(expected.min(1 << 20)),
            anode_window: VecDeque::with_capacity(params.current_window),
            grid,
            field_solver,
            params,
            state: LoopState::Running,
            t: 0.0,
            iterations: 0,
            absorbed_count: 0,
            absorbed_charge: 0.0,
            injection_stopped_at: None,
            settled_cathode_field: None,
            settled_cathode_current: None,
            steady_state_current: None,
            timings: TimingStats::new(),
        })
    }

    pub fn params(&self) -> &DiodeParams {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn potential(&self) -> &DVector<f64> {
        self.field_solver.potential()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn emission(&self) -> &EmissionController {
        &self.emission
    }

    pub fn timings(&self) -> &TimingStats {
        &self.timings
    }

    /// One full tick: inject, deposit, solve, interpolate, push, absorb,
    /// convergence check, advance time.
    pub fn step(&mut self) -> Result<StepRecord, PicError> {
        let dt = self.params.dt;
        let emitted = self.emission.inject(&self.grid, &mut self.particles);

        self.timings.record(Phase::Deposition, || {
            self.depositor.deposit(&mut self.grid, &mut self.particles)
        })?;
        self.timings.record(Phase::FieldSolve, || {
            self.field_solver.solve(&mut self.grid)
        })?;
        self.timings.record(Phase::Interpolation, || {
            self.interpolator.interpolate(&self.grid, &mut self.particles)
        });
        let absorbed = self.timings.record(Phase::Integration, || {
            self.pusher.push(&mut self.particles);
            self.particles.absorb_beyond(self.grid.length())
        });

        self.absorbed_count += absorbed.count as u64;
        self.absorbed_charge += absorbed.charge;
        let cathode_current = (emitted / dt).abs();
        let anode_current = (absorbed.charge / dt).abs();
        if self.anode_window.len() == self.params.current_window {
            self.anode_window.pop_front();
        }
        self.anode_window.push_back(anode_current);

        let cathode_field = self.grid.cathode().combined_field();
        if self.emission.check_convergence(self.t, cathode_field) {
            let steady = self.window_mean();
            info!(
                cathode_field,
                cathode_current,
                steady_state_current = steady,
                child_langmuir = self.params.child_langmuir_current(),
                "steady state reached"
            );
            self.injection_stopped_at = Some(self.t);
            self.settled_cathode_field = Some(cathode_field);
            self.settled_cathode_current = Some(cathode_current);
            self.steady_state_current = Some(steady);
        }

        self.t += dt;
        self.iterations += 1;

        self.state = if self.particles.is_empty() {
            LoopState::Done
        } else if self.emission.injection_enabled() {
            LoopState::Running
        } else {
            LoopState::Draining
        };

        Ok(StepRecord {
            iteration: self.iterations,
            time: self.t,
            cathode_field,
            cathode_current,
            anode_current,
            child_langmuir: self.params.child_langmuir_current(),
            particles: self.particles.len(),
            state: self.state,
        })
    }

    /// Steps until the gap has drained, handing every step's record to
    /// `on_step`.
    pub fn run(&mut self, mut on_step: impl FnMut(&StepRecord)) -> Result<RunResult, PicError> {
        info!(
            length = self.params.length,
            nodes = self.params.n_nodes,
            dt = self.params.dt,
            u_anode = self.params.u_anode,
            method = ?self.params.method,
            "starting particle-in-cell run"
        );

        while self.state != LoopState::Done {
            if let Some(max) = self.params.max_steps {
                if self.iterations >= max {
                    return Err(PicError::StepLimitExceeded { steps: max });
                }
            }
            let record = self.step()?;
            on_step(&record);

            if self.params.progress_interval > 0
                && record.iteration % self.params.progress_interval == 0
            {
                debug!(
                    iteration = record.iteration,
                    t = record.time,
                    particles = record.particles,
                    cathode_field = record.cathode_field,
                    "progress"
                );
            }
        }

        if self.injection_stopped_at.is_none() {
            warn!("gap drained before the cathode field settled");
        }
        info!(iterations = self.iterations, t = self.t, "gap drained");
        Ok(self.result())
    }

    pub fn result(&self) -> RunResult {
        RunResult {
            iterations: self.iterations,
            time: self.t,
            emitted_count: self.emission.emitted_count,
            emitted_charge: self.emission.emitted_charge,
            absorbed_count: self.absorbed_count,
            absorbed_charge: self.absorbed_charge,
            injection_stopped_at: self.injection_stopped_at,
            settled_cathode_field: self.settled_cathode_field,
            settled_cathode_current: self.settled_cathode_current,
            steady_state_current: self
                .steady_state_current
                .unwrap_or_else(|| self.window_mean()),
            child_langmuir: self.params.child_langmuir_current(),
        }
    }

    fn window_mean(&self) -> f64 {
        if self.anode_window.is_empty() {
            return 0.0;
        }
        self.anode_window.iter().sum::<f64>() / self.anode_window.len() as f64
    }
}
