//! Session model: one logged-in demo account with its append-only log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every login opens the same demo account.
pub const ACCOUNT_OWNER: &str = "tom";

/// Starting balance for a fresh session.
pub const STARTING_BALANCE: f64 = 10_000.0;

/// Kind of an account log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Account opened by a login.
    Init,
    /// A transfer debited the account.
    Transfer,
    /// A forged transfer was stopped by the CSRF token check.
    Block,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Transfer => "TRANSFER",
            Self::Block => "BLOCK",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a session's account log, latest entry last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// What happened.
    pub kind: EventKind,
    /// Human-readable description.
    pub message: String,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create a log entry stamped with the current time.
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A logged-in demo account, keyed by its session id.
///
/// Sessions live until the process exits; there is no expiry, logout, or
/// eviction, and balances may go negative (no insufficient-funds check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session identifier; doubles as the `sid` cookie value.
    pub id: String,
    /// Fixed display name for the demo account.
    pub owner: String,
    /// Current balance, decremented by transfers.
    pub balance: f64,
    /// Per-session CSRF token, generated once and never rotated.
    pub csrf_token: String,
    /// Append-only account log.
    pub log: Vec<LogEntry>,
}

impl Session {
    /// Open a fresh account with the fixed starting balance and a single
    /// initialization entry.
    pub fn new(id: String, csrf_token: String) -> Self {
        Self {
            id,
            owner: ACCOUNT_OWNER.to_string(),
            balance: STARTING_BALANCE,
            csrf_token,
            log: vec![LogEntry::new(EventKind::Init, "Account opened")],
        }
    }
}
