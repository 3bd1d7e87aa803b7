//! Mock implementations of the collaborator traits.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use taproom_core::environment::{CatalogGateway, Clock, Favorites};
use taproom_core::error::GatewayError;
use taproom_core::types::{Beer, BeerId, QueryParams};

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making tests reproducible.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
///
/// # Panics
///
/// This function will panic if the hardcoded timestamp fails to parse,
/// which should never happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

struct Scripted {
    outcome: Result<Vec<Beer>, GatewayError>,
    delay: Option<Duration>,
}

/// Scripted catalog gateway for store and reducer tests.
///
/// Outcomes are served in the order they were pushed; once the script runs
/// dry the gateway answers with empty pages. Every query it receives is
/// recorded, so tests can assert on request counts and parameters. An
/// optional per-outcome delay makes request-ordering races reproducible
/// (issue a slow response, supersede it with a fast one).
#[derive(Default)]
pub struct MockGateway {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<QueryParams>>,
    rate_limit: Mutex<Option<u32>>,
}

impl MockGateway {
    /// Creates a gateway with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful page
    pub fn push_page(&self, items: Vec<Beer>) {
        self.push(Ok(items), None);
    }

    /// Queues a successful page served after `delay`
    pub fn push_page_after(&self, items: Vec<Beer>, delay: Duration) {
        self.push(Ok(items), Some(delay));
    }

    /// Queues a failure
    pub fn push_error(&self, error: GatewayError) {
        self.push(Err(error), None);
    }

    /// Queues a failure served after `delay`
    pub fn push_error_after(&self, error: GatewayError, delay: Duration) {
        self.push(Err(error), Some(delay));
    }

    /// Sets the reported rate-limit-remaining count
    pub fn set_rate_limit_remaining(&self, remaining: u32) {
        *self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(remaining);
    }

    /// Every query received so far, in issue order
    #[must_use]
    pub fn requests(&self) -> Vec<QueryParams> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of queries received so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, outcome: Result<Vec<Beer>, GatewayError>, delay: Option<Duration>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted { outcome, delay });
    }
}

impl CatalogGateway for MockGateway {
    fn search(&self, params: QueryParams) -> BoxFuture<'static, Result<Vec<Beer>, GatewayError>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params);

        // Dequeue synchronously so scripted outcomes pair with requests in
        // issue order even when their futures settle out of order.
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        Box::pin(async move {
            match scripted {
                Some(Scripted { outcome, delay }) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    outcome
                }
                None => Ok(Vec::new()),
            }
        })
    }

    fn rate_limit_remaining(&self) -> Option<u32> {
        *self.rate_limit.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Plain in-memory favorites collection without persistence.
///
/// Behaves like the production store (insertion order, idempotent add) but
/// skips the blob round-trip, which keeps reducer tests free of storage
/// setup.
#[derive(Default)]
pub struct MemoryFavorites {
    entries: Mutex<Vec<Beer>>,
}

impl MemoryFavorites {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection seeded with `beers`
    #[must_use]
    pub fn with_beers(beers: Vec<Beer>) -> Self {
        Self {
            entries: Mutex::new(beers),
        }
    }
}

impl Favorites for MemoryFavorites {
    fn all(&self) -> Vec<Beer> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_member(&self, id: BeerId) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|beer| beer.id == id)
    }

    fn add(&self, beer: Beer) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !entries.iter().any(|existing| existing.id == beer.id) {
            entries.push(beer);
        }
    }

    fn remove(&self, id: BeerId) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|beer| beer.id != id);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn mock_gateway_serves_script_in_order() {
        let gateway = MockGateway::new();
        gateway.push_page(vec![fixtures::buzz()]);
        gateway.push_error(GatewayError::RateLimited);

        let params = taproom_core::catalog::CatalogState::new().query_params();
        let first = gateway.search(params.clone()).await;
        assert_eq!(first.map(|items| items.len()), Ok(1));

        let second = gateway.search(params.clone()).await;
        assert_eq!(second, Err(GatewayError::RateLimited));

        // Script exhausted: empty pages from here on.
        let third = gateway.search(params).await;
        assert_eq!(third, Ok(Vec::new()));
        assert_eq!(gateway.request_count(), 3);
    }

    #[test]
    fn memory_favorites_add_is_idempotent() {
        let favorites = MemoryFavorites::new();
        favorites.add(fixtures::buzz());
        favorites.add(fixtures::buzz());
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
