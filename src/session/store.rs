use parking_lot::RwLock;
use tracing::warn;

use crate::api::{auth, ApiClient};
use crate::tprintln;

use super::token_file::TokenStore;
use super::user::User;

/// Derived session status. The store starts in `Loading` and leaves it
/// exactly once, when `restore` completes; there is no way back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Anonymous,
    Authenticated,
}

struct Inner {
    token: Option<String>,
    user: Option<User>,
    state: SessionState,
    restored: bool,
}

/// Single source of truth for "who is logged in".
///
/// All pages read through the accessors; mutation happens only through
/// `restore`, `login` and `logout`. The durable mirror (the persisted bearer
/// token) is written by the same three operations and nothing else.
pub struct SessionStore {
    storage: Box<dyn TokenStore>,
    inner: RwLock<Inner>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn TokenStore>) -> Self {
        Self {
            storage,
            inner: RwLock::new(Inner {
                token: None,
                user: None,
                state: SessionState::Loading,
                restored: false,
            }),
        }
    }

    pub fn state(&self) -> SessionState { self.inner.read().state }

    pub fn loading(&self) -> bool { self.inner.read().state == SessionState::Loading }

    pub fn user(&self) -> Option<User> { self.inner.read().user.clone() }

    pub fn token(&self) -> Option<String> { self.inner.read().token.clone() }

    /// Attempt to restore a session from the persisted token. Runs at most
    /// once per process lifetime; later calls are no-ops.
    ///
    /// Every failure path degrades to `Anonymous` and discards the persisted
    /// token; this never returns an error and the store is guaranteed to have
    /// left `Loading` when it returns.
    pub async fn restore(&self, api: &ApiClient) {
        {
            let mut inner = self.inner.write();
            if inner.restored {
                return;
            }
            inner.restored = true;
            inner.state = SessionState::Loading;
        }

        let persisted = match self.storage.load() {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "hexabid::session", "token load failed: {}", e);
                None
            }
        };

        let Some(token) = persisted else {
            // No persisted token: anonymous, and no network call is made.
            self.inner.write().state = SessionState::Anonymous;
            return;
        };

        match auth::me(api, &token).await {
            Ok(user) => {
                tprintln!("session.restore user={}", user.id);
                let mut inner = self.inner.write();
                inner.token = Some(token);
                inner.user = Some(user);
                inner.state = SessionState::Authenticated;
            }
            Err(e) => {
                // Expired or invalid token, or the backend was unreachable:
                // drop the persisted credential and come up anonymous.
                warn!(target: "hexabid::session", "session restore failed: {}", e);
                if let Err(e) = self.storage.clear() {
                    warn!(target: "hexabid::session", "token clear failed: {}", e);
                }
                let mut inner = self.inner.write();
                inner.token = None;
                inner.user = None;
                inner.state = SessionState::Anonymous;
            }
        }
    }

    /// Install a session obtained from a successful login or registration.
    /// The caller already holds both values from the backend; no call is made
    /// here. Calling again fully replaces the prior session.
    pub fn login(&self, token: &str, user: User) {
        if let Err(e) = self.storage.save(token) {
            // In-memory session still stands; it just won't survive a restart.
            warn!(target: "hexabid::session", "token persist failed: {}", e);
        }
        tprintln!("session.login user={}", user.id);
        let mut inner = self.inner.write();
        inner.token = Some(token.to_string());
        inner.user = Some(user);
        inner.state = SessionState::Authenticated;
    }

    /// Drop the session. Purely client-side: the token simply stops being
    /// sent; there is no server-side invalidation call. Idempotent.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            warn!(target: "hexabid::session", "token clear failed: {}", e);
        }
        let mut inner = self.inner.write();
        inner.token = None;
        inner.user = None;
        inner.state = SessionState::Anonymous;
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
