//! The typed facade the presentation layer talks to.
//!
//! Wraps the generic [`Store`] with the catalog's named mutators. All
//! writes go through these methods (and therefore through the reducer);
//! reads come back as a [`CatalogView`] snapshot.

use crate::{EffectHandle, Store};
use std::sync::Arc;
use taproom_core::catalog::{CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState};
use taproom_core::environment::{CatalogGateway, Favorites};
use taproom_core::types::{AbvRange, Beer, BeerId, Mode, SortSpec};
use taproom_core::view::{self, CatalogView};

/// The catalog store, ready to be driven by a UI.
///
/// Mutators return an [`EffectHandle`]; awaiting it is only needed when
/// the caller wants to observe the settled request (tests, demos) — the
/// UI normally just re-renders from [`Catalog::view`] as state changes.
pub struct Catalog {
    store: Store<CatalogState, CatalogAction, CatalogEnvironment, CatalogReducer>,
}

impl Catalog {
    /// Creates a catalog store over the two injected collaborators
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>, favorites: Arc<dyn Favorites>) -> Self {
        Self {
            store: Store::new(
                CatalogState::new(),
                CatalogReducer::new(),
                CatalogEnvironment::new(gateway, favorites),
            ),
        }
    }

    /// Fetches the current page from the gateway; a no-op in favorites mode
    pub async fn load(&self) -> EffectHandle {
        self.store.send(CatalogAction::Load).await
    }

    /// Replaces the name filter; resets the page and reloads in remote mode
    pub async fn set_search_text(&self, text: impl Into<String>) -> EffectHandle {
        self.store
            .send(CatalogAction::SetSearchText(text.into()))
            .await
    }

    /// Replaces the ABV window; resets the page and reloads in remote mode
    pub async fn set_abv_range(&self, range: AbvRange) -> EffectHandle {
        self.store.send(CatalogAction::SetAbvRange(range)).await
    }

    /// Replaces the ordering; never triggers a request
    pub async fn set_sort_spec(&self, spec: SortSpec) -> EffectHandle {
        self.store.send(CatalogAction::SetSortSpec(spec)).await
    }

    /// Switches the data source; switching to remote reloads
    pub async fn set_mode(&self, mode: Mode) -> EffectHandle {
        self.store.send(CatalogAction::SetMode(mode)).await
    }

    /// Advances one page (remote mode only)
    pub async fn next_page(&self) -> EffectHandle {
        self.store.send(CatalogAction::NextPage).await
    }

    /// Goes back one page, floored at 1 (remote mode only)
    pub async fn previous_page(&self) -> EffectHandle {
        self.store.send(CatalogAction::PreviousPage).await
    }

    /// Restores filters, sort, and page to defaults, forces remote mode,
    /// and reloads
    pub async fn reset_filters(&self) -> EffectHandle {
        self.store.send(CatalogAction::ResetFilters).await
    }

    /// Flips the item's membership in the favorites collection
    pub async fn toggle_favorite(&self, beer: Beer) {
        // No effects to wait on: favorites mutate synchronously.
        let _ = self.store.send(CatalogAction::ToggleFavorite(beer)).await;
    }

    /// Membership test against the favorites collaborator
    #[must_use]
    pub fn is_favorite(&self, id: BeerId) -> bool {
        self.store.environment().favorites.is_member(id)
    }

    /// Latest rate-limit-remaining count reported by the gateway, if any
    #[must_use]
    pub fn rate_limit_remaining(&self) -> Option<u32> {
        self.store.environment().gateway.rate_limit_remaining()
    }

    /// Renders the presentation snapshot from current state and the live
    /// favorites collection
    pub async fn view(&self) -> CatalogView {
        let favorites = self.store.environment().favorites.all();
        self.store
            .state(|state| view::render(state, &favorites))
            .await
    }

    /// Read raw store state via a closure (mainly for tests)
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&CatalogState) -> T,
    {
        self.store.state(f).await
    }
}
