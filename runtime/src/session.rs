//! In-memory key-value persistence.
//!
//! Stands in for per-session browser storage: the blob lives for the
//! process and is shared by everything holding a clone. Tests use it as
//! the persistence port; a browser deployment would implement
//! [`KeyValueStore`] over its session storage instead.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use taproom_core::environment::KeyValueStore;

/// Session-scoped in-memory blob storage.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct SessionStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStorage {
    /// Create a new empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    #[must_use]
    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn clear(&self, key: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
