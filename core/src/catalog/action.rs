//! Actions processed by the catalog reducer.

use crate::types::{AbvRange, Beer, Mode, SortSpec};

/// Every input to the catalog store.
///
/// Commands come from the presentation layer through the named mutators;
/// feedback actions are produced by the gateway effect when a request
/// settles. Feedback carries the sequence number of the request that
/// produced it so superseded results can be recognized and dropped.
#[derive(Clone, Debug)]
pub enum CatalogAction {
    // ========== Commands ==========
    /// Command: Replace the name filter; resets the page and reloads in
    /// remote mode
    SetSearchText(String),

    /// Command: Replace the ABV window; resets the page and reloads in
    /// remote mode
    SetAbvRange(AbvRange),

    /// Command: Replace the ordering; never triggers a request
    SetSortSpec(SortSpec),

    /// Command: Switch the data source; switching to remote reloads
    SetMode(Mode),

    /// Command: Advance one page (remote mode only)
    NextPage,

    /// Command: Go back one page, floored at 1 (remote mode only)
    PreviousPage,

    /// Command: Restore filters, sort, and page to defaults, force remote
    /// mode, and reload
    ResetFilters,

    /// Command: Fetch the current page from the gateway; a no-op in
    /// favorites mode
    Load,

    /// Command: Flip the item's membership in the favorites collection
    ToggleFavorite(Beer),

    // ========== Gateway feedback ==========
    /// Feedback: The request identified by `seq` completed successfully
    PageLoaded {
        /// Sequence number of the originating request
        seq: u64,
        /// The response page, in upstream order
        items: Vec<Beer>,
    },

    /// Feedback: The request identified by `seq` failed after the
    /// gateway's retries were exhausted
    LoadFailed {
        /// Sequence number of the originating request
        seq: u64,
        /// User-facing failure message
        message: String,
    },
}
