use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use diode_pic::processing::csv_writer::{self, DiagnosticWriter};
use diode_pic::processing::summary::RunSummary;
use diode_pic::{DiodeParams, ParticleInCell, WeightingScheme};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diode_pic")]
#[command(about = "Particle-in-cell simulation of a space-charge-limited planar diode")]
#[command(version)]
struct Args {
    /// TOML file with diode parameters (defaults are used for missing keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the charge weighting scheme
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Directory for diagnostics, grid profile and summary
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Write only every n-th step to diagnostics.csv
    #[arg(long, default_value = "1")]
    every: u64,

    /// Abort if the gap has not drained after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Nearest,
    Linear,
}

impl From<Method> for WeightingScheme {
    fn from(m: Method) -> Self {
        match m {
            Method::Nearest => WeightingScheme::NearestNode,
            Method::Linear => WeightingScheme::LinearTwoNode,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut params = match &args.config {
        Some(path) => DiodeParams::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DiodeParams::default(),
    };
    if let Some(method) = args.method {
        params.method = method.into();
    }
    if args.max_steps.is_some() {
        params.max_steps = args.max_steps;
    }

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;

    let mut summary = RunSummary::from_problem(&params);
    let mut pic = ParticleInCell::new(params)?;

    let diag_path = args.output_dir.join("diagnostics.csv");
    let mut diagnostics = DiagnosticWriter::create(&diag_path, args.every)
        .with_context(|| format!("Failed to create {}", diag_path.display()))?;
    let mut write_error = None;

    let result = pic.run(|rec| {
        if write_error.is_none() {
            if let Err(e) = diagnostics.record(rec) {
                warn!("diagnostics output stopped: {}", e);
                write_error = Some(e);
            }
        }
    })?;
    diagnostics.finish().context("Failed to flush diagnostics")?;
    if let Some(e) = write_error {
        return Err(e).context("Failed to write diagnostics");
    }
    info!("Diagnostics saved to {}", diag_path.display());

    save_grid_profile(&pic, &args.output_dir.join("grid_profile.csv"))?;

    summary.add_run_info(&result);
    summary.add_timings(pic.timings());
    let summary_path = args.output_dir.join("summary.txt");
    summary
        .write_to_file(&summary_path)
        .context("Failed to write summary")?;
    summary.print_to_console();
    pic.timings().print_summary();
    pic.timings().print_detailed();

    println!("Summary saved to {}", summary_path.display());
    Ok(())
}

fn save_grid_profile(pic: &ParticleInCell, path: &Path) -> Result<()> {
    let grid = pic.grid();
    let self_field: Vec<f64> = grid.nodes().iter().map(|n| n.self_field).collect();
    csv_writer::write_csv(
        path,
        &["x", "density", "self_field", "combined_field", "potential"],
        &[
            grid.positions(),
            grid.densities(),
            self_field,
            grid.combined_fields(),
            pic.potential().iter().copied().collect(),
        ],
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Grid profile saved to {}", path.display());
    Ok(())
}
