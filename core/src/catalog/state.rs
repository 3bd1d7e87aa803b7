//! State of the catalog store.

use crate::types::{AbvRange, Beer, Mode, PAGE_SIZE, QueryParams, SortSpec};

/// The store's only mutable truth.
///
/// Created once with fixed defaults and kept for the whole session; every
/// field is mutated only through reducer actions, never directly by the
/// presentation layer.
#[derive(Clone, Debug)]
pub struct CatalogState {
    /// Latest successfully completed remote response, in upstream order.
    ///
    /// Only meaningful while `mode` is [`Mode::Remote`]; retained across a
    /// failed refresh so stale data stays visible under the error banner.
    pub items: Vec<Beer>,
    /// True strictly between request start and settle of the latest request
    pub loading: bool,
    /// Message from the last failed request; cleared when a new one starts
    pub last_error: Option<String>,
    /// Current 1-based page; never below 1
    pub page: u32,
    /// Which source feeds the display pipeline
    pub mode: Mode,
    /// Name filter, compared trimmed and case-insensitively
    pub search_text: String,
    /// Inclusive ABV window
    pub abv_range: AbvRange,
    /// Display ordering
    pub sort_spec: SortSpec,
    /// Monotonic counter identifying the latest issued request.
    ///
    /// A gateway response is applied only while its sequence number still
    /// equals this field; anything older has been superseded.
    pub request_seq: u64,
}

impl CatalogState {
    /// Creates the session-initial state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            last_error: None,
            page: 1,
            mode: Mode::Remote,
            search_text: String::new(),
            abv_range: AbvRange::UNBOUNDED,
            sort_spec: SortSpec::natural(),
            request_seq: 0,
        }
    }

    /// Snapshots the query parameters for a gateway request.
    ///
    /// Built immediately before each request; the result is a value object
    /// and is never mutated afterwards.
    #[must_use]
    pub fn query_params(&self) -> QueryParams {
        let trimmed = self.search_text.trim();
        QueryParams {
            page: self.page,
            page_size: PAGE_SIZE,
            name_contains: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            abv_min: self.abv_range.min,
            abv_max: self.abv_range.max,
        }
    }

    /// True when the user has narrowed the list by name or ABV
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_text.trim().is_empty() || self.abv_range.is_bounded()
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}
