//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vulnlab - two-server demos of clickjacking and CSRF
#[derive(Parser, Debug)]
#[command(name = "vulnlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Demo to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available demos
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the CSRF demo (stateful bank + auto-submitting attacker page)
    Csrf {
        /// Port for the bank (victim) server
        #[arg(long, default_value = "8080")]
        bank_port: u16,

        /// Port for the evil (attacker) server
        #[arg(long, default_value = "8081")]
        evil_port: u16,

        /// Directory holding the demo pages
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
    },

    /// Run the clickjacking demo (two static sites, bank framable)
    Clickjacking {
        /// Port for the bank (victim) server
        #[arg(long, default_value = "8080")]
        bank_port: u16,

        /// Port for the evil (attacker) server
        #[arg(long, default_value = "8081")]
        evil_port: u16,

        /// Directory holding the demo pages
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
    },
}
