use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod source;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);
    let proceed = commands::run_command(cli)?;
    Ok(if proceed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
