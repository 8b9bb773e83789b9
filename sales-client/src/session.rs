//! Bearer session
//!
//! Holds the token shared by every transport and store. A 401 from the API
//! clears it and flips the status to [`SessionStatus::SignedOut`], which is
//! the front end's cue to go back to the login screen.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

/// Authentication status observed by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated,
    SignedOut,
}

/// Shared bearer token holder
#[derive(Debug, Clone)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
    status: Arc<watch::Sender<SessionStatus>>,
}

impl AuthSession {
    pub fn new(token: Option<String>) -> Self {
        let status = if token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::SignedOut
        };
        let (tx, _) = watch::channel(status);
        Self {
            token: Arc::new(RwLock::new(token)),
            status: Arc::new(tx),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
        self.status.send_replace(SessionStatus::Authenticated);
    }

    /// Drop the token (logout or 401)
    pub fn clear(&self) {
        self.token.write().take();
        self.status.send_replace(SessionStatus::SignedOut);
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// `Authorization` header value
    pub(crate) fn bearer(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new(None)
    }
}
