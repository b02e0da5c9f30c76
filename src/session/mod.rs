//! Session state: bearer token + identity, hydrated from durable storage.
//!
//! ## Lifecycle
//!
//! 1. `Session::new(store)`: booting; the route guard defers every decision.
//! 2. `hydrate()`: restores the user when the store holds a token and at
//!    least one identity field, ends booting, re-checks the current route.
//! 3. `login(token, identity)`: persists, sets the user, moves to `/dashboard`.
//! 4. `logout()`: clears storage and the user, moves to `/login`.
//!
//! Tokens are never validated or refreshed client-side: presence of a token
//! string is what grants access to protected routes.

pub mod guard;
pub mod store;

use std::sync::Arc;

use taskboard_common::Identity;
use tracing::{debug, info, warn};

use crate::errors::SessionError;
pub use guard::{GuardDecision, Route};
pub use store::{EMAIL_KEY, FileStore, KeyValueStore, MemoryStore, TOKEN_KEY, USERNAME_KEY};

pub struct Session {
    store: Arc<dyn KeyValueStore>,
    user: Option<Identity>,
    booting: bool,
    location: Route,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            user: None,
            booting: true,
            location: Route::Root,
        }
    }

    /// Shared handle to the backing store, for the API client.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn is_booting(&self) -> bool {
        self.booting
    }

    pub fn location(&self) -> &Route {
        &self.location
    }

    pub fn token(&self) -> Result<Option<String>, SessionError> {
        self.read(TOKEN_KEY)
    }

    /// Read a stored value. Unreadable storage counts as signed out; the next
    /// login or logout rewrites it.
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        match self.store.get(key) {
            Err(e @ SessionError::Corrupt { .. }) => {
                warn!(key, error = %e, "ignoring unreadable session storage");
                Ok(None)
            }
            other => other,
        }
    }

    /// Restore in-memory state from durable storage. Must run before the
    /// guard makes any decision.
    pub fn hydrate(&mut self) -> Result<(), SessionError> {
        let token = self.read(TOKEN_KEY)?;
        let identity = Identity {
            email: self.read(EMAIL_KEY)?,
            username: self.read(USERNAME_KEY)?,
        };
        if token.is_some() && !identity.is_empty() {
            debug!(user = ?identity.display_name(), "session restored from storage");
            self.user = Some(identity);
        }
        self.booting = false;
        self.enforce()
    }

    pub fn login(&mut self, token: &str, identity: Identity) -> Result<&Route, SessionError> {
        self.store.set(TOKEN_KEY, token)?;
        if let Some(email) = &identity.email {
            self.store.set(EMAIL_KEY, email)?;
        }
        if let Some(username) = &identity.username {
            self.store.set(USERNAME_KEY, username)?;
        }
        info!(user = ?identity.display_name(), "logged in");
        self.user = Some(identity);
        self.booting = false;
        self.location = Route::Dashboard;
        Ok(&self.location)
    }

    pub fn logout(&mut self) -> Result<&Route, SessionError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(EMAIL_KEY)?;
        self.store.remove(USERNAME_KEY)?;
        info!("logged out");
        self.user = None;
        self.location = Route::Login;
        Ok(&self.location)
    }

    /// Navigate to `path`, applying the route guard. Returns where the
    /// session actually ended up.
    pub fn navigate(&mut self, path: &str) -> Result<&Route, SessionError> {
        self.location = Route::parse(path);
        self.enforce()?;
        Ok(&self.location)
    }

    /// Guard decision for the current location.
    pub fn check(&self) -> Result<GuardDecision, SessionError> {
        let has_token = self.token()?.is_some();
        Ok(guard::evaluate(self.booting, has_token, &self.location))
    }

    fn enforce(&mut self) -> Result<(), SessionError> {
        if let GuardDecision::Redirect(target) = self.check()? {
            debug!(from = %self.location, to = %target, "route guard redirect");
            self.location = target;
        }
        Ok(())
    }
}
