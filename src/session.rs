// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context: the signed-in token and identity.
//!
//! One context is created per client (`restore` from durable storage) and
//! shared by `Arc` with the HTTP client, the router and the auth store.
//! The in-memory token is the source of truth for `is_logged_in`; durable
//! storage mirrors it so the next run starts signed in.

use crate::models::User;
use crate::storage::{StorageError, TokenStorage};
use std::sync::{PoisonError, RwLock};

pub struct SessionContext {
    storage: Box<dyn TokenStorage>,
    token: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
}

impl SessionContext {
    /// Initialize from whatever token durable storage holds.
    pub fn restore(storage: impl TokenStorage + 'static) -> Result<Self, StorageError> {
        let token = storage.load()?;
        if token.is_some() {
            tracing::debug!("Restored session token from storage");
        }

        Ok(Self {
            storage: Box::new(storage),
            token: RwLock::new(token),
            user: RwLock::new(None),
        })
    }

    /// Current bearer token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist a new token, then make it current. Nothing changes in memory
    /// if persisting fails.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.store(token)?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        tracing::info!("Session started");
        Ok(())
    }

    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Tear down the session: forget token and user and remove the
    /// persisted token. Storage failures are logged, never returned; the
    /// in-memory session is cleared regardless.
    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;

        if let Err(e) = self.storage.remove() {
            tracing::warn!(error = %e, "Failed to remove persisted token");
        }
        tracing::info!("Session cleared");
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("logged_in", &self.is_logged_in())
            .field("user", &self.user())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStorage;

    #[test]
    fn test_restore_from_storage() {
        let session = SessionContext::restore(MemoryTokenStorage::with_token("saved")).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some("saved"));

        let session = SessionContext::restore(MemoryTokenStorage::new()).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_set_token_persists() {
        let storage = MemoryTokenStorage::new();
        let session = SessionContext::restore(storage.clone()).unwrap();

        session.set_token("fresh").unwrap();

        assert!(session.is_logged_in());
        assert_eq!(storage.peek().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = MemoryTokenStorage::with_token("saved");
        let session = SessionContext::restore(storage.clone()).unwrap();
        session.set_user(Some(User {
            username: "researcher".to_string(),
            email: None,
            is_active: true,
            is_superuser: false,
        }));

        session.clear();

        assert!(!session.is_logged_in());
        assert!(session.user().is_none());
        assert_eq!(storage.peek(), None);
    }
}
