use crate::numerics::transient::StepRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write column data to a CSV file with headers
pub fn write_csv<P: AsRef<Path>>(path: P, headers: &[&str], data: &[Vec<f64>]) -> io::Result<()> {
    if !headers.is_empty() && !data.is_empty() && headers.len() != data.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Headers count ({}) doesn't match data columns ({})",
                headers.len(),
                data.len()
            ),
        ));
    }

    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "{}", headers.join(","))?;

    let n_rows = data.iter().map(|col| col.len()).max().unwrap_or(0);

    for i in 0..n_rows {
        let row: Vec<String> = data
            .iter()
            .map(|col| {
                if i < col.len() {
                    format!("{:.15e}", col[i])
                } else {
                    String::new()
                }
            })
            .collect();
        writeln!(file, "{}", row.join(","))?;
    }

    file.flush()
}

/// Streams one row per simulation step.
pub struct DiagnosticWriter<W: Write> {
    out: W,
    every: u64,
}

impl DiagnosticWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P, every: u64) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?), every)
    }
}

impl<W: Write> DiagnosticWriter<W> {
    pub const HEADERS: [&'static str; 7] = [
        "iteration",
        "time",
        "cathode_field",
        "cathode_current",
        "child_langmuir",
        "anode_current",
        "particles",
    ];

    /// `every` thins the output to every n-th step (0 or 1 keeps all).
    pub fn new(mut out: W, every: u64) -> io::Result<Self> {
        writeln!(out, "{}", Self::HEADERS.join(","))?;
        Ok(Self { out, every })
    }

    pub fn record(&mut self, rec: &StepRecord) -> io::Result<()> {
        if self.every > 1 && rec.iteration % self.every != 0 {
            return Ok(());
        }
        writeln!(
            self.out,
            "{},{:.15e},{:.15e},{:.15e},{:.15e},{:.15e},{}",
            rec.iteration,
            rec.time,
            rec.cathode_field,
            rec.cathode_current,
            rec.child_langmuir,
            rec.anode_current,
            rec.particles
        )
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
