//! `localStorage`-backed token persistence.
//!
//! The token lives under the `token` key so a page reload rehydrates the
//! session. Off-browser every operation is a no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{StorageError, TokenStorage};
#[cfg(feature = "csr")]
use session::TOKEN_KEY;

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StorageError(format!("{e:?}")))?
        .ok_or_else(|| StorageError("localStorage unavailable".to_owned()))
}

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage().ok()?.get_item(TOKEN_KEY).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(TOKEN_KEY, token).map_err(|e| StorageError(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Ok(())
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            match local_storage() {
                Ok(storage) => {
                    if let Err(e) = storage.remove_item(TOKEN_KEY) {
                        log::warn!("failed to remove token: {e:?}");
                    }
                }
                Err(e) => log::warn!("failed to remove token: {e}"),
            }
        }
    }
}
