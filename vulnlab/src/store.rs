//! In-memory session store shared by the bank's request handlers.
//!
//! The store is an owned map behind a `tokio` `RwLock`, handed to handlers
//! through shared state. Holding the write lock across a transfer keeps its
//! check-validate-mutate-log sequence atomic with respect to other requests.

use std::collections::HashMap;

use rand::Rng;
use tokio::sync::RwLock;

use crate::models::Session;

/// Opaque 128-bit token as 32 hex characters.
fn generate_token() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Holds every live session, keyed by session id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session with independent session and CSRF tokens.
    pub async fn create(&self) -> Session {
        let session = Session::new(generate_token(), generate_token());
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    /// Look up a session by id.
    ///
    /// `None` means "not authenticated", never an error to retry.
    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Run `f` against the session under the write lock.
    ///
    /// Returns `None` when the id is unknown; otherwise the closure's result.
    pub async fn update<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.sessions.write().await.get_mut(id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{EventKind, ACCOUNT_OWNER, STARTING_BALANCE};

    #[tokio::test]
    async fn test_create_opens_account() {
        let store = SessionStore::new();
        let session = store.create().await;

        assert_eq!(session.owner, ACCOUNT_OWNER);
        assert!((session.balance - STARTING_BALANCE).abs() < f64::EPSILON);
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.log[0].kind, EventKind::Init);
    }

    #[tokio::test]
    async fn test_tokens_are_independent() {
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;

        assert_eq!(a.id.len(), 32);
        assert_eq!(a.csrf_token.len(), 32);
        assert_ne!(a.id, a.csrf_token);
        assert_ne!(a.id, b.id);
        assert_ne!(a.csrf_token, b.csrf_token);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = SessionStore::new();
        assert!(store.get("deadbeef").await.is_none());
    }

    #[tokio::test]
    async fn test_update_mutates_under_lock() {
        let store = SessionStore::new();
        let session = store.create().await;

        let balance = store
            .update(&session.id, |s| {
                s.balance -= 250.0;
                s.balance
            })
            .await
            .unwrap();

        assert!((balance - (STARTING_BALANCE - 250.0)).abs() < f64::EPSILON);
        let reread = store.get(&session.id).await.unwrap();
        assert!((reread.balance - balance).abs() < f64::EPSILON);

        assert!(store.update("unknown", |_| ()).await.is_none());
    }
}
