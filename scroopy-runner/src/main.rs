mod error;
mod repl;
mod runner;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::RunError;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to run. Starts an interactive session when omitted.
    path: Option<PathBuf>,
    /// Skip the greeting printed by the interactive session.
    #[arg(long)]
    no_banner: bool,
    /// Raise the log level (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.path {
        None => repl::start(!cli.no_banner),
        Some(path) => runner::execute(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "run failed");
            // Diagnostics and evaluation errors were already printed.
            if !matches!(err, RunError::Parse(_) | RunError::Evaluation(_)) {
                eprintln!("scroopy: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}
