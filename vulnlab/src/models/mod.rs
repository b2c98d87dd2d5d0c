//! Data models for the bank demo.

mod session;

pub use session::{EventKind, LogEntry, Session, ACCOUNT_OWNER, STARTING_BALANCE};
