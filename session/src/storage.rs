//! Durable bearer-token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Exactly one value survives a restart: the current bearer token. The
//! identity is always re-derived from it, never stored on its own.

use std::cell::RefCell;

use crate::error::StorageError;

/// Key under which hosts persist the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key-value persistence for the single bearer token.
pub trait TokenStorage {
    /// Read the stored token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store rejects the write.
    fn store(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the stored token. Never fails; a missing token is already cleared.
    fn clear(&self);
}

/// In-process storage that does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Storage pre-seeded with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RefCell::new(Some(token.into())) }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}
