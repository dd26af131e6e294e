//! ## agentmon
//! Inspect the agent's monitoring configuration: print the built-in defaults,
//! or decode a config file (plus `AGENTMON_*` environment overrides) and show
//! the effective settings.

use agentmon_telemetry::logging::EventLogger;
use clap::Parser;

mod commands;
mod error;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    commands::run_command(cli, &mut stdout)?;
    Ok(())
}
