//! Session
//!
//! Owns the auth token for the current user. The token is read from the
//! store on every call and never cached, so a logout from another handle
//! takes effect on the next request.

mod store;

pub use store::{FileTokenStore, MemoryTokenStore, SessionError, TokenStore};

use std::sync::Arc;

/// Handle to the persisted auth token
///
/// Cloning a session shares the underlying store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Create a session backed by the given token store
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session that only lives in memory
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Current token, if logged in
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        self.store.load()
    }

    /// Whether a token is present
    pub fn is_logged_in(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Persist a freshly issued token
    pub fn store_token(&self, token: &str) -> Result<(), SessionError> {
        tracing::debug!("Storing session token");
        self.store.save(token)
    }

    /// Forget the token
    pub fn logout(&self) -> Result<(), SessionError> {
        tracing::debug!("Clearing session token");
        self.store.clear()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
