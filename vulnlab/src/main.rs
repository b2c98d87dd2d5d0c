//! Vulnlab - paired victim/attacker servers for studying classic web bugs.
//!
//! Each demo runs two HTTP servers in one process:
//! - a "bank" (victim) site, port 8080 by default
//! - an "evil" (attacker) site, port 8081 by default
//!
//! The CSRF demo pairs a cookie-authenticated bank API (one transfer route
//! unprotected, one gated on a per-session token) with an attacker page that
//! forges a transfer using the victim's ambient cookie. The clickjacking demo
//! serves a framable bank page and a decoy page that overlays it invisibly.

mod bank;
mod cli;
mod error;
mod evil;
mod models;
mod relay;
mod respond;
mod server;
mod store;

use anyhow::Result;
use clap::Parser;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
