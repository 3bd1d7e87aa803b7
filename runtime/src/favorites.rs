//! The persisted favorites collaborator.
//!
//! A deduplicated, insertion-ordered collection of catalog items, mirrored
//! to a JSON blob through the [`KeyValueStore`] port on every mutation.
//! Restoring from a corrupted blob falls back to an empty collection; the
//! failure is logged, never propagated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use taproom_core::environment::{Clock, Favorites, KeyValueStore};
use taproom_core::types::{Beer, BeerId};

/// Storage key of the favorites blob
pub const FAVORITES_KEY: &str = "taproom.favorites";

/// One persisted favorite: the full cached item plus when it was saved.
///
/// The full record is cached so favorites mode can render without the
/// remote catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct FavoriteEntry {
    beer: Beer,
    added_at: DateTime<Utc>,
}

/// The favorites store.
///
/// Mutations are synchronous and each one rewrites the blob, so the
/// persisted state never lags the in-memory collection.
pub struct FavoritesStore {
    entries: Mutex<Vec<FavoriteEntry>>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl FavoritesStore {
    /// Creates a store, restoring any previously persisted collection
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let entries = Self::restore(storage.as_ref());
        Self {
            entries: Mutex::new(entries),
            storage,
            clock,
        }
    }

    fn restore(storage: &dyn KeyValueStore) -> Vec<FavoriteEntry> {
        let Some(blob) = storage.get(FAVORITES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<FavoriteEntry>>(&blob) {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "restored favorites");
                entries
            }
            Err(error) => {
                tracing::warn!(%error, "discarding corrupted favorites blob");
                Vec::new()
            }
        }
    }

    fn persist(&self, entries: &[FavoriteEntry]) {
        match serde_json::to_string(entries) {
            Ok(blob) => self.storage.set(FAVORITES_KEY, &blob),
            Err(error) => tracing::error!(%error, "failed to serialize favorites"),
        }
        // Note: Precision loss acceptable for metrics (collection sizes < 2^52)
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("favorites.size").set(entries.len() as f64);
    }

    /// When the given item was favorited, if it is a member
    #[must_use]
    pub fn added_at(&self, id: BeerId) -> Option<DateTime<Utc>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|entry| entry.beer.id == id)
            .map(|entry| entry.added_at)
    }

    /// Empties the collection and removes the persisted blob
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.storage.clear(FAVORITES_KEY);
        metrics::gauge!("favorites.size").set(0.0);
    }
}

impl Favorites for FavoritesStore {
    fn all(&self) -> Vec<Beer> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.beer.clone())
            .collect()
    }

    fn is_member(&self, id: BeerId) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|entry| entry.beer.id == id)
    }

    fn add(&self, beer: Beer) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|entry| entry.beer.id == beer.id) {
            tracing::debug!(id = %beer.id, "already a favorite, ignoring add");
            return;
        }
        entries.push(FavoriteEntry {
            beer,
            added_at: self.clock.now(),
        });
        self.persist(&entries);
    }

    fn remove(&self, id: BeerId) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|entry| entry.beer.id != id);
        if entries.len() != before {
            self.persist(&entries);
        }
    }

    fn toggle(&self, beer: Beer) {
        if self.is_member(beer.id) {
            self.remove(beer.id);
        } else {
            self.add(beer);
        }
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
