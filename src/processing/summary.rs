use crate::models::diode::DiodeParams;
use crate::numerics::timing::{Phase, TimingStats};
use crate::numerics::transient::RunResult;
use crate::physics::weighting::WeightingScheme;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

pub struct RunSummary {
    // Problem
    pub length: f64,
    pub n_nodes: usize,
    pub spacing: f64,
    pub dt: f64,
    pub t_imp: f64,
    pub u_anode: f64,
    pub e0: f64,
    pub method: WeightingScheme,

    // Run
    pub iterations: Option<u64>,
    pub time_of_flight: Option<f64>,
    pub emitted_count: Option<u64>,
    pub absorbed_count: Option<u64>,
    pub emitted_charge: Option<f64>,
    pub absorbed_charge: Option<f64>,
    pub injection_stopped_at: Option<f64>,
    pub settled_cathode_field: Option<f64>,
    pub settled_cathode_current: Option<f64>,
    pub steady_state_current: Option<f64>,
    pub child_langmuir: f64,

    // Phase timings
    pub timings: Vec<(Phase, Duration)>,
}

impl RunSummary {
    pub fn from_problem(params: &DiodeParams) -> Self {
        Self {
            length: params.length,
            n_nodes: params.n_nodes,
            spacing: params.spacing(),
            dt: params.dt,
            t_imp: params.t_imp,
            u_anode: params.u_anode,
            e0: params.e0,
            method: params.method,
            iterations: None,
            time_of_flight: None,
            emitted_count: None,
            absorbed_count: None,
            emitted_charge: None,
            absorbed_charge: None,
            injection_stopped_at: None,
            settled_cathode_field: None,
            settled_cathode_current: None,
            steady_state_current: None,
            child_langmuir: params.child_langmuir_current(),
            timings: Vec::new(),
        }
    }

    pub fn add_run_info(&mut self, result: &RunResult) {
        self.iterations = Some(result.iterations);
        self.time_of_flight = Some(result.time);
        self.emitted_count = Some(result.emitted_count);
        self.absorbed_count = Some(result.absorbed_count);
        self.emitted_charge = Some(result.emitted_charge);
        self.absorbed_charge = Some(result.absorbed_charge);
        self.injection_stopped_at = result.injection_stopped_at;
        self.settled_cathode_field = result.settled_cathode_field;
        self.settled_cathode_current = result.settled_cathode_current;
        self.steady_state_current = Some(result.steady_state_current);
    }

    pub fn add_timings(&mut self, stats: &TimingStats) {
        self.timings = Phase::ALL.iter().map(|&p| (p, stats.total(p))).collect();
    }

    /// Steady-state anode current relative to the Child-Langmuir value.
    pub fn current_ratio(&self) -> Option<f64> {
        self.steady_state_current.map(|j| j / self.child_langmuir)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        self.write_report(&mut file)
    }

    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "PLANAR DIODE PIC SUMMARY")?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        writeln!(out, "PROBLEM")?;
        writeln!(out, "{}", "-".repeat(60))?;
        writeln!(out, "Gap length:          {:.6e} m", self.length)?;
        writeln!(out, "Grid nodes:          {}", self.n_nodes)?;
        writeln!(out, "Grid spacing:        {:.6e} m", self.spacing)?;
        writeln!(out, "Time step:           {:.6e} s", self.dt)?;
        writeln!(out, "Warm-up (t_imp):     {:.6e} s", self.t_imp)?;
        writeln!(out, "Anode voltage:       {:.4} V", self.u_anode)?;
        writeln!(out, "Starting energy:     {:.4} eV", self.e0)?;
        writeln!(out, "Weighting:           {:?}", self.method)?;
        writeln!(out)?;

        if let (Some(iter), Some(t)) = (self.iterations, self.time_of_flight) {
            writeln!(out, "RUN")?;
            writeln!(out, "{}", "-".repeat(60))?;
            writeln!(out, "Iterations:          {}", iter)?;
            writeln!(out, "Time of flight:      {:.6e} s", t)?;
            if let (Some(n), Some(q)) = (self.emitted_count, self.emitted_charge) {
                writeln!(out, "Emitted:             {} particles, {:.6e} C/m^2", n, q)?;
            }
            if let (Some(n), Some(q)) = (self.absorbed_count, self.absorbed_charge) {
                writeln!(out, "Absorbed:            {} particles, {:.6e} C/m^2", n, q)?;
            }
            match self.injection_stopped_at {
                Some(ts) => writeln!(out, "Injection stopped:   {:.6e} s", ts)?,
                None => writeln!(out, "Injection stopped:   never (drained first)")?,
            }
            writeln!(out)?;
        }

        writeln!(out, "CURRENT")?;
        writeln!(out, "{}", "-".repeat(60))?;
        if let Some(e) = self.settled_cathode_field {
            writeln!(out, "Settled cathode E:   {:.6e} V/m", e)?;
        }
        if let Some(j) = self.settled_cathode_current {
            writeln!(out, "Cathode current:     {:.6e} A/m^2", j)?;
        }
        if let Some(j) = self.steady_state_current {
            writeln!(out, "Anode current:       {:.6e} A/m^2", j)?;
        }
        writeln!(out, "Child-Langmuir:      {:.6e} A/m^2", self.child_langmuir)?;
        if let Some(ratio) = self.current_ratio() {
            writeln!(out, "Ratio to CL:         {:.4}", ratio)?;
        }
        writeln!(out)?;

        if !self.timings.is_empty() {
            writeln!(out, "PHASE TIMINGS")?;
            writeln!(out, "{}", "-".repeat(60))?;
            for (phase, d) in &self.timings {
                writeln!(
                    out,
                    "{:<21}{:.3} ms",
                    format!("{}:", phase),
                    d.as_secs_f64() * 1000.0
                )?;
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", "=".repeat(60))?;
        Ok(())
    }

    pub fn print_to_console(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SIMULATION SUMMARY");
        println!("{}", "=".repeat(60));
        if let Some(iter) = self.iterations {
            println!("Iterations:    {}", iter);
        }
        if let Some(t) = self.time_of_flight {
            println!("Flight time:   {:.4e} s", t);
        }
        if let Some(n) = self.emitted_count {
            println!("Emitted:       {} particles", n);
        }
        if let Some(j) = self.steady_state_current {
            println!(
                "Current:       {:.4e} A/m^2 (Child-Langmuir {:.4e})",
                j, self.child_langmuir
            );
        }
        println!("{}\n", "=".repeat(60));
    }
}
