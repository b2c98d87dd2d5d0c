//! Demo runners: each starts a bank and an evil server in one process.
//!
//! The two listeners share nothing except, in the CSRF demo, the bank's
//! session store. There is no cancellation, timeout, or retry logic; a slow
//! request body stalls only its own connection.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::bank::{self, BankState};
use crate::evil;
use crate::relay;
use crate::store::SessionStore;

/// Run the CSRF demo: stateful bank on `bank_port`, attacker page on
/// `evil_port`, both serving pages from `<assets>/csrf`.
pub async fn run_csrf(assets: &Path, bank_port: u16, evil_port: u16) -> Result<()> {
    let pages = assets.join("csrf");
    let state = Arc::new(BankState {
        store: SessionStore::new(),
        pages: pages.clone(),
    });
    serve_pair(bank::router(state), evil::router(pages), bank_port, evil_port).await
}

/// Run the clickjacking demo: two plain static sites. The bank sets no
/// framing-protection headers, which is the vulnerability under study.
pub async fn run_clickjacking(assets: &Path, bank_port: u16, evil_port: u16) -> Result<()> {
    let root = assets.join("clickjacking");
    let bank = relay::site_router(root.join("bank"));
    let evil = relay::site_router(root.join("evil"));
    serve_pair(bank, evil, bank_port, evil_port).await
}

async fn serve_pair(bank: Router, evil: Router, bank_port: u16, evil_port: u16) -> Result<()> {
    let bank_addr = SocketAddr::from(([127, 0, 0, 1], bank_port));
    let evil_addr = SocketAddr::from(([127, 0, 0, 1], evil_port));

    let bank_listener = TcpListener::bind(bank_addr)
        .await
        .with_context(|| format!("Failed to bind bank server on {bank_addr}"))?;
    let evil_listener = TcpListener::bind(evil_addr)
        .await
        .with_context(|| format!("Failed to bind evil server on {evil_addr}"))?;

    println!("BANK on http://{bank_addr}");
    println!("EVIL on http://{evil_addr}");

    tokio::try_join!(
        axum::serve(bank_listener, bank).into_future(),
        axum::serve(evil_listener, evil).into_future(),
    )
    .context("Server error")?;

    Ok(())
}
