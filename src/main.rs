use anyhow::{Context, Result};
use clap::Parser;
use eurovision::cli::Cli;
use eurovision::error::{SweepstakeError, EXIT_FAILURE};
use eurovision::sweepstake::{self, RunConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run the sweepstake described by the command line
fn run(args: Cli) -> Result<()> {
    let config = RunConfig::from(args);
    let mut rng = config.rng();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    sweepstake::run(&config, &mut rng, &mut out).with_context(|| {
        format!(
            "Sweepstake run failed ({} rounds, results to {})",
            config.rounds,
            config.outfile.display()
        )
    })?;
    Ok(())
}

/// Exit status for a failed run: the library error decides, else generic failure
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<SweepstakeError>()
        .map(SweepstakeError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    init_tracing(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}
