//! Bank (victim) server: login, balance queries, and the two transfer
//! endpoints — one deliberately CSRF-vulnerable, one gated on the session's
//! token.
//!
//! Endpoints:
//! - GET  /, /bank.html       - landing page (via the static relay)
//! - POST /login              - open a demo account, set the `sid` cookie
//! - GET  /me                 - owner, balance, and account log
//! - POST /transfer           - debit with NO CSRF check (the bug on display)
//! - POST /transfer-protected - debit only with the session's CSRF token
//! - GET  /csrf-token         - token for the legitimate same-origin form
//!
//! Authentication everywhere is "does the `sid` cookie name a live session";
//! body fields and other headers play no part in it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::error::BankError;
use crate::models::{EventKind, LogEntry, Session};
use crate::relay;
use crate::respond::{not_found_page, PrettyJson};
use crate::store::SessionStore;

/// Shared bank state: the session store plus the page root for the relay.
pub struct BankState {
    pub store: SessionStore,
    pub pages: PathBuf,
}

/// Build the bank router.
pub fn router(state: Arc<BankState>) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/bank.html", get(landing))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/transfer", post(transfer))
        .route("/transfer-protected", post(transfer_protected))
        .route("/csrf-token", get(csrf_token))
        .fallback(not_found_page)
        .with_state(state)
}

// === Response types ===

#[derive(Debug, Serialize)]
struct LoginResponse {
    ok: bool,
    message: &'static str,
    sid: String,
}

#[derive(Debug, Serialize)]
struct MeResponse {
    ok: bool,
    user: String,
    balance: f64,
    log: Vec<LogEntry>,
}

#[derive(Debug, Serialize)]
struct TransferResponse {
    ok: bool,
    balance: f64,
}

#[derive(Debug, Serialize)]
struct CsrfTokenResponse {
    ok: bool,
    #[serde(rename = "csrfToken")]
    csrf_token: String,
}

// === Cookie and form plumbing ===

/// Split a `Cookie` header into percent-decoded key/value pairs.
fn parse_cookies(header: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for part in header.split(';') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), decode_component(value));
    }
    out
}

/// Session id from the request's `sid` cookie, if any.
fn session_id(headers: &HeaderMap) -> Option<String> {
    let cookie = headers.get(header::COOKIE)?.to_str().ok()?;
    parse_cookies(cookie).remove("sid")
}

/// Parse an `application/x-www-form-urlencoded` body into fields.
fn parse_form(body: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for pair in body.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        out.insert(decode_component(key), decode_component(value));
    }
    out
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

/// Validate the transfer fields: trimmed non-empty recipient, finite
/// positive amount. Anything else is invalid input, never a panic.
fn validate_transfer(form: &HashMap<String, String>) -> Result<(String, f64), BankError> {
    let to = form.get("to").map_or("", |s| s.trim());
    let amount: f64 = form
        .get("amount")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0.0);
    if to.is_empty() || !amount.is_finite() || amount <= 0.0 {
        return Err(BankError::InvalidTransfer);
    }
    Ok((to.to_string(), amount))
}

/// Debit the account and append the TRANSFER entry.
fn apply_transfer(session: &mut Session, to: &str, amount: f64) -> f64 {
    session.balance -= amount;
    session
        .log
        .push(LogEntry::new(EventKind::Transfer, format!("€{amount} to {to}")));
    session.balance
}

// === Handlers ===

async fn landing(State(state): State<Arc<BankState>>) -> Response {
    relay::serve(&state.pages, "/bank.html").await
}

/// Any login call opens a fresh account; there is no credential check.
/// The cookie deliberately carries no HttpOnly/SameSite/Secure attributes —
/// that absence is the vulnerability under study.
async fn login(State(state): State<Arc<BankState>>) -> Response {
    let session = state.store.create().await;
    let cookie = format!("sid={}; Path=/", session.id);
    (
        [(header::SET_COOKIE, cookie)],
        PrettyJson(LoginResponse {
            ok: true,
            message: "Logged in",
            sid: session.id,
        }),
    )
        .into_response()
}

async fn me(
    State(state): State<Arc<BankState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BankError> {
    let sid = session_id(&headers).ok_or(BankError::NotLoggedIn)?;
    let session = state.store.get(&sid).await.ok_or(BankError::NotLoggedIn)?;
    Ok(PrettyJson(MeResponse {
        ok: true,
        user: session.owner,
        balance: session.balance,
        log: session.log,
    }))
}

/// The vulnerable route: any request with a valid `sid` cookie moves money,
/// no matter which origin submitted the form.
async fn transfer(
    State(state): State<Arc<BankState>>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, BankError> {
    let sid = session_id(&headers).ok_or(BankError::NotLoggedIn)?;
    let form = parse_form(&body);
    let balance = state
        .store
        .update(&sid, |session| {
            let (to, amount) = validate_transfer(&form)?;
            Ok::<_, BankError>(apply_transfer(session, &to, amount))
        })
        .await
        .ok_or(BankError::NotLoggedIn)??;
    Ok(PrettyJson(TransferResponse { ok: true, balance }))
}

/// The fixed route: the `csrf` field must equal the session's token before
/// the recipient or amount are even looked at. A mismatch is recorded in the
/// log and nothing is debited.
async fn transfer_protected(
    State(state): State<Arc<BankState>>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, BankError> {
    let sid = session_id(&headers).ok_or(BankError::NotLoggedIn)?;
    let form = parse_form(&body);
    let balance = state
        .store
        .update(&sid, |session| {
            let supplied = form.get("csrf").map_or("", String::as_str);
            if supplied != session.csrf_token {
                session
                    .log
                    .push(LogEntry::new(EventKind::Block, "CSRF blocked: bad token"));
                return Err(BankError::CsrfBlocked);
            }
            let (to, amount) = validate_transfer(&form)?;
            Ok(apply_transfer(session, &to, amount))
        })
        .await
        .ok_or(BankError::NotLoggedIn)??;
    Ok(PrettyJson(TransferResponse { ok: true, balance }))
}

/// Hand the session's token to the legitimate same-origin page so its form
/// can echo it back on `/transfer-protected`.
async fn csrf_token(
    State(state): State<Arc<BankState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BankError> {
    let sid = session_id(&headers).ok_or(BankError::NotLoggedIn)?;
    let session = state.store.get(&sid).await.ok_or(BankError::NotLoggedIn)?;
    Ok(PrettyJson(CsrfTokenResponse {
        ok: true,
        csrf_token: session.csrf_token,
    }))
}
