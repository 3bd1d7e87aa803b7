//! Collaborator contracts injected into the catalog store.
//!
//! All external dependencies are abstracted behind traits and passed in via
//! the environment at construction — no ambient or global state. Each trait
//! here has a production implementation elsewhere in the workspace and a
//! mock in `taproom-testing`.

use crate::error::GatewayError;
use crate::types::{Beer, BeerId, QueryParams};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```ignore
/// // Production - uses system clock
/// let clock = SystemClock;
///
/// // Test - fixed time for deterministic tests
/// let clock = FixedClock::new(some_time);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock backed by [`Utc::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The remote data gateway: one paginated, filtered query against the
/// upstream catalog.
///
/// Implementations own their retry policy: transient failures (network,
/// 5xx) are retried with bounded exponential backoff *inside* the gateway;
/// client failures (4xx, including 429) surface immediately. The store only
/// ever sees the settled outcome.
///
/// The trait is object-safe so the environment can hold
/// `Arc<dyn CatalogGateway>`; implementations return a boxed future that
/// owns everything it needs.
pub trait CatalogGateway: Send + Sync {
    /// Issues one catalog query.
    ///
    /// Resolves to the page of items in upstream order, or to the
    /// [`GatewayError`] left after the gateway's own retries are exhausted.
    fn search(&self, params: QueryParams) -> BoxFuture<'static, Result<Vec<Beer>, GatewayError>>;

    /// Most recent rate-limit-remaining count reported by the transport,
    /// if any. Informational only.
    fn rate_limit_remaining(&self) -> Option<u32> {
        None
    }
}

/// The local favorites collection: deduplicated by identity, persisted on
/// every mutation.
///
/// `add` is idempotent — adding an item that is already a member is a
/// logged no-op. Mutations are synchronous; there is no async boundary in
/// this collaborator.
pub trait Favorites: Send + Sync {
    /// Snapshot of the collection in insertion order
    fn all(&self) -> Vec<Beer>;

    /// Membership test by identity
    fn is_member(&self, id: BeerId) -> bool;

    /// Adds an item; a duplicate add is a no-op
    fn add(&self, beer: Beer);

    /// Removes an item by identity; absent ids are ignored
    fn remove(&self, id: BeerId);

    /// Adds the item if absent, removes it otherwise
    fn toggle(&self, beer: Beer);

    /// Number of favorites
    fn len(&self) -> usize;

    /// True when no favorites exist
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key-value persistence port backing the favorites blob.
///
/// The catalog core never touches this directly; only the favorites store
/// reads and writes through it. A browser deployment maps it onto session
/// storage; tests and the demo use the in-memory implementation.
pub trait KeyValueStore: Send + Sync {
    /// Reads the blob stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous blob
    fn set(&self, key: &str, value: &str);

    /// Removes the blob stored under `key`
    fn clear(&self, key: &str);
}
