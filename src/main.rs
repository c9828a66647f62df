//! Command-line entry point for the model integrity checker.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use modelcheck::check::{check_project, report};

#[derive(Parser)]
#[command(name = "modelcheck")]
#[command(about = "Checks referential integrity of UML model and diagram documents")]
#[command(version)]
struct Cli {
    /// Path to the model project manifest
    manifest: PathBuf,

    /// Block on stdin before exiting (debugging affordance)
    #[arg(long)]
    wait: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let diagnostics = match check_project(&cli.manifest) {
        Ok(diagnostics) => diagnostics,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let stderr = io::stderr();
    let mut out = stderr.lock();
    for diagnostic in &diagnostics {
        if let Err(e) = report(&mut out, diagnostic) {
            error!("failed to write diagnostic: {e}");
            return ExitCode::FAILURE;
        }
    }
    debug!(failures = diagnostics.len(), "run complete");

    if cli.wait {
        let _ = out.write_all(b"Press enter to continue ...\n");
        let _ = io::stdin().lock().read_line(&mut String::new());
    }

    // A completed run exits 0 even when diagnostics were reported.
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "modelcheck=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
