//! yamlsettings: inspect layered YAML settings from the command line.
//!
//! Parses arguments, installs logging, dispatches to the command handler and
//! maps errors to exit codes.

mod cli;
mod commands;

use cli::Cli;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use yamlsettings::exit_codes;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG always takes precedence; --verbose falls back to DEBUG.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
