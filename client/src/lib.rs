//! # Taproom Client
//!
//! HTTP implementation of the remote data gateway.
//!
//! [`CatalogClient`] issues paginated, filtered queries against the
//! upstream beer catalog, maps transport and status outcomes into the
//! [`GatewayError`](taproom_core::error::GatewayError) taxonomy, and
//! retries transient failures with exponential backoff. Client errors
//! (4xx, including the rate limit) are never retried.
//!
//! ## Example
//!
//! ```ignore
//! use taproom_client::CatalogClient;
//! use taproom_core::catalog::CatalogState;
//!
//! let client = CatalogClient::new();
//! let page = client.search_beers(&CatalogState::new().query_params()).await?;
//! ```

pub mod client;
pub mod retry;

pub use client::{CatalogClient, DEFAULT_API_URL};
pub use retry::{RetryPolicy, retry_with_predicate};
