//! Explicit session state: the persisted token plus the cached profile.
//!
//! A [`Session`] is constructed by the application composition root and
//! handed to every component that needs it. The token lives in a
//! [`TokenStore`] so it survives restarts; the profile is cached in memory
//! only and is re-fetched when the application starts.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::api::{AuthToken, ClientError, UserProfile};

/// Local-storage key the session token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Persistent storage for the session token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Loads the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store fails.
    fn load(&self) -> Result<Option<AuthToken>, ClientError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store fails.
    fn save(&self, token: &AuthToken) -> Result<(), ClientError>;

    /// Removes the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store fails.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    /// Creates a store pre-populated with `token`.
    #[must_use]
    pub const fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>, ClientError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &AuthToken) -> Result<(), ClientError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The signed-in user's session.
pub struct Session {
    tokens: Arc<dyn TokenStore>,
    profile: Mutex<Option<UserProfile>>,
}

impl Session {
    /// Creates a session backed by `tokens` with no cached profile.
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            tokens,
            profile: Mutex::new(None),
        }
    }

    /// Shared handle to the token store, for the gateway.
    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// Returns the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the token store fails.
    pub fn token(&self) -> Result<Option<AuthToken>, ClientError> {
        self.tokens.load()
    }

    /// Returns true when a token is stored. Storage failures count as
    /// signed out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.tokens.load(), Ok(Some(_)))
    }

    /// Returns a copy of the cached profile.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persists a freshly issued token and caches the profile, when known.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the token cannot be saved.
    pub fn establish(
        &self,
        token: &AuthToken,
        profile: Option<UserProfile>,
    ) -> Result<(), ClientError> {
        self.tokens.save(token)?;
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = profile;
        info!("session established");
        Ok(())
    }

    /// Replaces the cached profile.
    pub fn set_profile(&self, profile: UserProfile) {
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile);
    }

    /// Merges a profile update into the cached profile, or caches it when
    /// nothing was cached yet.
    pub fn merge_profile(&self, update: UserProfile) {
        let mut guard = self.profile.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(cached) => cached.merge(update),
            None => *guard = Some(update),
        }
    }

    /// Destroys the session: removes the persisted token and drops the
    /// cached profile. Used for logout and after a 401.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the token cannot be removed.
    /// The cached profile is dropped either way.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.drop_profile();
        self.tokens.clear()?;
        info!("session cleared");
        Ok(())
    }

    /// Drops the cached profile but keeps the persisted token, so the next
    /// start can restore the session.
    pub fn teardown(&self) {
        self.drop_profile();
    }

    fn drop_profile(&self) {
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("profile", &self.profile())
            .finish()
    }
}

#[cfg(test)]
mod tests;
