//! HTTP catalog client implementation.

use crate::retry::{RetryPolicy, retry_with_predicate};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::sync::{Arc, Mutex, PoisonError};
use taproom_core::environment::CatalogGateway;
use taproom_core::error::GatewayError;
use taproom_core::types::{Beer, QueryParams};

/// Base URL of the public beer catalog
pub const DEFAULT_API_URL: &str = "https://api.punkapi.com/v2";

const RATE_LIMIT_HEADER: &str = "x-ratelimit-remaining";

/// HTTP gateway to the upstream beer catalog.
///
/// Cheap to clone; clones share the connection pool and the captured
/// rate-limit metadata.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    api_url: String,
    retry_policy: RetryPolicy,
    rate_limit: Arc<Mutex<Option<u32>>>,
}

impl CatalogClient {
    /// Create a client against the public catalog
    #[must_use]
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    /// Create a client against a specific base URL
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            retry_policy: RetryPolicy::default(),
            rate_limit: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Runs one catalog query under the client's retry policy.
    ///
    /// Transient failures (network, 5xx) are retried with exponential
    /// backoff; 4xx — the rate limit included — surface immediately.
    ///
    /// # Errors
    ///
    /// Returns the [`GatewayError`] left once retries are exhausted, or the
    /// first non-transient failure.
    pub async fn search_beers(&self, params: &QueryParams) -> Result<Vec<Beer>, GatewayError> {
        retry_with_predicate(
            self.retry_policy.clone(),
            || self.search_once(params),
            GatewayError::is_transient,
        )
        .await
    }

    async fn search_once(&self, params: &QueryParams) -> Result<Vec<Beer>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/beers", self.api_url))
            .query(&query_pairs(params))
            .send()
            .await
            .map_err(|error| GatewayError::Network(error.to_string()))?;

        self.record_rate_limit(response.headers());

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<Beer>>()
                .await
                .map_err(|error| GatewayError::Decode(error.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GatewayError::from_status(status.as_u16(), body))
            }
        }
    }

    fn record_rate_limit(&self, headers: &HeaderMap) {
        if let Some(remaining) = parse_rate_limit(headers) {
            tracing::trace!(remaining, "rate limit header observed");
            *self
                .rate_limit
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(remaining);
        }
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogGateway for CatalogClient {
    fn search(&self, params: QueryParams) -> BoxFuture<'static, Result<Vec<Beer>, GatewayError>> {
        let client = self.clone();
        Box::pin(async move { client.search_beers(&params).await })
    }

    fn rate_limit_remaining(&self) -> Option<u32> {
        *self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Maps query parameters onto the upstream query string.
///
/// The upstream matches names on underscore-separated tokens and exposes
/// its ABV window as `abv_gt`/`abv_lt`; the requested bounds are forwarded
/// as-is and inclusivity is enforced client-side by the filter stage.
fn query_pairs(params: &QueryParams) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("page", params.page.to_string()),
        ("per_page", params.page_size.to_string()),
    ];
    if let Some(name) = &params.name_contains {
        pairs.push(("beer_name", name.replace(' ', "_")));
    }
    if let Some(min) = params.abv_min {
        pairs.push(("abv_gt", min.to_string()));
    }
    if let Some(max) = params.abv_max {
        pairs.push(("abv_lt", max.to_string()));
    }
    pairs
}

fn parse_rate_limit(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RATE_LIMIT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taproom_core::types::PAGE_SIZE;

    fn params() -> QueryParams {
        QueryParams {
            page: 2,
            page_size: PAGE_SIZE,
            name_contains: None,
            abv_min: None,
            abv_max: None,
        }
    }

    #[test]
    fn pagination_is_always_sent() {
        let pairs = query_pairs(&params());
        assert_eq!(
            pairs,
            vec![("page", "2".to_string()), ("per_page", "25".to_string())]
        );
    }

    #[test]
    fn name_filter_uses_underscores() {
        let mut params = params();
        params.name_contains = Some("punk ipa".to_string());

        let pairs = query_pairs(&params);
        assert!(pairs.contains(&("beer_name", "punk_ipa".to_string())));
    }

    #[test]
    fn abv_bounds_map_to_the_upstream_dialect() {
        let mut params = params();
        params.abv_min = Some(4.5);
        params.abv_max = Some(8.0);

        let pairs = query_pairs(&params);
        assert!(pairs.contains(&("abv_gt", "4.5".to_string())));
        assert!(pairs.contains(&("abv_lt", "8".to_string())));
    }

    #[test]
    fn rate_limit_header_parses() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_rate_limit(&headers), None);

        headers.insert(RATE_LIMIT_HEADER, "3599".parse().unwrap());
        assert_eq!(parse_rate_limit(&headers), Some(3599));

        headers.insert(RATE_LIMIT_HEADER, "not a number".parse().unwrap());
        assert_eq!(parse_rate_limit(&headers), None);
    }
}
