//! Error types for the remote catalog gateway.

use thiserror::Error;

/// Errors surfaced by a [`CatalogGateway`](crate::environment::CatalogGateway).
///
/// The transient/permanent split drives the gateway's retry policy:
/// transport failures and upstream 5xx are worth retrying, everything the
/// client did wrong (4xx, including the rate limit) is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Transport-level failure: DNS, connect, or dropped connection.
    ///
    /// The browser-era equivalent is an XHR with status 0.
    #[error("the catalog service could not be reached: {0}")]
    Network(String),

    /// The upstream catalog failed (5xx)
    #[error("the catalog service failed (status {status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The request was rejected (4xx other than 429)
    #[error("the catalog rejected the request (status {status}): {message}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Too many requests (429); never retried
    #[error("the catalog rate limit was hit")]
    RateLimited,

    /// The response body could not be decoded
    #[error("the catalog response could not be decoded: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Builds the error matching an HTTP status code
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            429 => Self::RateLimited,
            s if s >= 500 => Self::Server {
                status: s,
                message: message.into(),
            },
            s => Self::Client {
                status: s,
                message: message.into(),
            },
        }
    }

    /// Whether retrying this error could plausibly succeed.
    ///
    /// Only transport failures and 5xx qualify; 4xx (including 429) and
    /// decode failures surface immediately.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    /// HTTP status code associated with this error; 0 for transport failures
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Network(_) | Self::Decode(_) => 0,
            Self::Server { status, .. } | Self::Client { status, .. } => *status,
            Self::RateLimited => 429,
        }
    }
}
