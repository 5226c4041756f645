//! In-memory preference store

use crate::PreferenceStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

/// In-memory [`PreferenceStore`].
///
/// Clones share the same map, so a test can keep a handle to inspect what a
/// manager persisted, or hand the same map to a second manager to simulate a
/// page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `key = value`.
    #[must_use]
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Stored value for `key`, for assertions.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.item(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
