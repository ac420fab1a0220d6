use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use simulator::{gamma_sweep, output::write_sweep_csv, EngineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Trajectory-averaged system purity vs ancilla damping")]
struct Args {
    /// Rounds of feedback per trajectory (1-10)
    #[arg(short = 'n', long, env = "FEEDBACK_ITERATIONS", default_value_t = 5,
          value_parser = clap::value_parser!(u64).range(1..=10))]
    iterations: u64,

    /// Independent trajectories averaged per gamma
    #[arg(long, default_value_t = 64)]
    trajectories: usize,

    /// Number of gamma intervals on [0, 1]
    #[arg(long, default_value_t = 10)]
    gamma_steps: usize,

    /// RNG seed
    #[arg(long, env = "FEEDBACK_SEED", default_value = "42")]
    seed: String,

    /// Tolerance for unitarity and density-matrix checks
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,

    /// Output CSV path
    #[arg(long, default_value = "gamma_sweep.csv")]
    out: PathBuf,

    /// Number of Rayon worker threads (0 = Rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    exit_status(run(args))
}

/// Logs a failed run and maps it to a non-zero exit code.
fn exit_status(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("failed to build Rayon thread pool")?;
    }

    let base = EngineConfig {
        tolerance: args.tolerance,
        ..EngineConfig::default()
    };
    let points = gamma_sweep(
        base,
        args.iterations as usize,
        args.trajectories,
        args.gamma_steps,
        &args.seed,
    )
    .context("gamma sweep failed")?;

    for p in &points {
        let [a, b] = &p.records;
        println!(
            "gamma={:.3}  P(q0)={:.4}  P(q1)={:.4}  x(q0)={:+.4}  x(q1)={:+.4}",
            p.gamma, a.purity, b.purity, a.bloch_vector[0], b.bloch_vector[0]
        );
    }

    write_sweep_csv(&args.out, &points)
        .with_context(|| format!("failed to write CSV to {}", args.out.display()))?;
    info!(path = %args.out.display(), points = points.len(), "sweep written");

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}
