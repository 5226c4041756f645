//! `localStorage`-backed preference store

use crate::dom;
use egov_prefs::PreferenceStore;
use web_sys::Storage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Browser `localStorage`, resolved on every access so a page where storage
/// is disabled keeps working with in-memory state.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, WebStorageError> {
        dom::local_storage().map_err(|err| WebStorageError::Storage(dom::js_error_message(&err)))
    }
}

impl PreferenceStore for LocalStore {
    type Error = WebStorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| WebStorageError::Storage(dom::js_error_message(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| WebStorageError::Storage(dom::js_error_message(&err)))
    }
}
