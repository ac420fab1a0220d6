use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rng::ONDRng;
use simulator::{
    analyze, output::write_records_csv, EngineConfig, FeedbackEngine, ReportSink, TextSink,
    MAX_ITERATIONS, MIN_ITERATIONS,
};

/// Two system qubits, one noisy ancilla, and hidden-bit feedback (OND-RNG)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rounds of feedback (1-10); prompted for when omitted
    #[arg(short = 'n', long, env = "FEEDBACK_ITERATIONS",
          value_parser = clap::value_parser!(u64).range(1..=10))]
    iterations: Option<u64>,

    /// Amplitude-damping strength of the ancilla reset, in [0, 1]
    #[arg(long, env = "FEEDBACK_GAMMA", default_value_t = 0.1)]
    gamma: f64,

    /// RNG seed (full reproducibility)
    #[arg(long, env = "FEEDBACK_SEED", default_value = "42")]
    seed: String,

    /// Tolerance for unitarity and density-matrix checks
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,

    /// Skip unitarity and density-matrix checks
    #[arg(long)]
    no_validate: bool,

    /// Also write the interpretation records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

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
    let iterations = match args.iterations {
        Some(n) => n as usize,
        None => read_iterations(io::stdin().lock(), io::stdout())?,
    };

    let config = EngineConfig {
        gamma: args.gamma,
        tolerance: args.tolerance,
        validate: !args.no_validate,
    };
    let engine = FeedbackEngine::new(config).context("invalid engine configuration")?;

    let mut rng = ONDRng::new(args.seed.as_bytes());
    let outcome = engine
        .run_recorded(iterations, &mut rng)
        .context("feedback run failed")?;
    info!(
        iterations,
        gamma = config.gamma,
        seed = %args.seed,
        decisions = %outcome.decision_string(),
        "feedback run complete"
    );

    let records = analyze(&outcome.rho).context("could not interpret final state")?;

    let mut sink = TextSink::new(io::stdout().lock());
    sink.render(iterations, &records)?;

    if let Some(path) = &args.csv {
        write_records_csv(path, &records)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "records written");
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

/// Prompts until a whole number in range is entered.
fn read_iterations<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<usize> {
    let mut line = String::new();
    loop {
        write!(
            out,
            "Enter number of iterations (rounds of feedback, {}-{}): ",
            MIN_ITERATIONS, MAX_ITERATIONS
        )?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("no iteration count given on stdin");
        }
        match line.trim().parse::<i64>() {
            Ok(n) if n >= MIN_ITERATIONS as i64 && n <= MAX_ITERATIONS as i64 => {
                return Ok(n as usize)
            }
            Ok(_) => writeln!(
                out,
                "Please enter a value between {} and {}.",
                MIN_ITERATIONS, MAX_ITERATIONS
            )?,
            Err(_) => writeln!(out, "Invalid input. Please enter an integer.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::process::ExitCode;

    use clap::Parser;

    use super::{exit_status, read_iterations, run, Args};

    #[test]
    fn prompt_retries_until_valid() {
        let input = b"abc\n0\n11\n  7 \n" as &[u8];
        let mut out = Vec::new();
        let n = read_iterations(input, &mut out).unwrap();
        assert_eq!(n, 7);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Enter number of iterations").count(), 4);
        assert_eq!(text.matches("Invalid input").count(), 1);
        assert_eq!(text.matches("Please enter a value between 1 and 10.").count(), 2);
    }

    #[test]
    fn prompt_fails_on_eof() {
        assert!(read_iterations(b"" as &[u8], Vec::new()).is_err());
    }

    fn code(c: ExitCode) -> String {
        format!("{:?}", c)
    }

    #[test]
    fn bad_gamma_fails_with_non_zero_exit() {
        let args = Args::try_parse_from(["feedback", "-n", "2", "--gamma", "1.5"]).unwrap();
        let result = run(args);
        assert!(format!("{:#}", result.as_ref().unwrap_err()).contains("invalid engine configuration"));
        assert_eq!(code(exit_status(result)), code(ExitCode::FAILURE));
        assert_eq!(code(exit_status(Ok(()))), code(ExitCode::SUCCESS));
    }
}
