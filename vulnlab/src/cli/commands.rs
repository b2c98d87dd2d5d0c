//! CLI command execution.

use anyhow::Result;

use crate::server;

use super::args::{Cli, Commands};

/// Execute the parsed CLI command.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Csrf {
            bank_port,
            evil_port,
            assets,
        } => server::run_csrf(&assets, bank_port, evil_port).await,
        Commands::Clickjacking {
            bank_port,
            evil_port,
            assets,
        } => server::run_clickjacking(&assets, bank_port, evil_port).await,
    }
}
