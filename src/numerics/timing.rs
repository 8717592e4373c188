use std::fmt;
use std::time::{Duration, Instant};

/// Phases of one simulation step that are timed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Deposition,
    FieldSolve,
    Interpolation,
    Integration,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Deposition,
        Phase::FieldSolve,
        Phase::Interpolation,
        Phase::Integration,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Deposition => "Charge deposition",
            Phase::FieldSolve => "Field solve",
            Phase::Interpolation => "Force interpolation",
            Phase::Integration => "Integration",
        };
        f.write_str(name)
    }
}

/// Cumulative wall-clock time spent in each phase.
///
/// With the `timing` feature every individual sample is kept as well, for
/// the per-step breakdown printed by [`TimingStats::print_detailed`].
#[derive(Default, Clone, Debug)]
pub struct TimingStats {
    totals: [Duration; 4],
    #[cfg(feature = "timing")]
    samples: [Vec<Duration>; 4],
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<F, R>(&mut self, phase: Phase, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.add(phase, start.elapsed());
        result
    }

    pub fn add(&mut self, phase: Phase, elapsed: Duration) {
        self.totals[phase.index()] += elapsed;
        #[cfg(feature = "timing")]
        self.samples[phase.index()].push(elapsed);
    }

    pub fn total(&self, phase: Phase) -> Duration {
        self.totals[phase.index()]
    }

    pub fn accounted(&self) -> Duration {
        self.totals.iter().sum()
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("{:^60}", "PHASE TIMING SUMMARY");
        println!("{}", "=".repeat(60));
        for phase in Phase::ALL {
            println!(
                "  {:<24} {:>12.3}ms",
                phase.to_string(),
                self.total(phase).as_secs_f64() * 1000.0
            );
        }
        println!("{}", "-".repeat(60));
        println!(
            "  {:<24} {:>12.3}ms",
            "Total",
            self.accounted().as_secs_f64() * 1000.0
        );
        println!("{}\n", "=".repeat(60));
    }

    #[cfg(feature = "timing")]
    pub fn print_detailed(&self) {
        let n = self.samples.iter().map(Vec::len).min().unwrap_or(0);
        if n == 0 {
            return;
        }

        println!("\n{}", "=".repeat(60));
        println!("{:^60}", "PER-STEP PHASE TIMINGS (avg / max)");
        println!("{}", "=".repeat(60));
        for phase in Phase::ALL {
            let samples = &self.samples[phase.index()];
            let max = samples.iter().max().copied().unwrap_or_default();
            let avg = self.total(phase).as_secs_f64() / samples.len() as f64;
            println!(
                "  {:<24} {:>9.3}us / {:>9.3}us",
                phase.to_string(),
                avg * 1e6,
                max.as_secs_f64() * 1e6
            );
        }
        println!("  {} steps sampled\n", n);
    }

    #[cfg(not(feature = "timing"))]
    pub fn print_detailed(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_per_phase() {
        let mut stats = TimingStats::new();
        let v = stats.record(Phase::FieldSolve, || 41 + 1);
        assert_eq!(v, 42);
        stats.add(Phase::Deposition, Duration::from_millis(3));
        stats.add(Phase::Deposition, Duration::from_millis(2));
        assert_eq!(stats.total(Phase::Deposition), Duration::from_millis(5));
        assert_eq!(stats.total(Phase::Integration), Duration::ZERO);
        assert!(stats.accounted() >= Duration::from_millis(5));
    }
}
