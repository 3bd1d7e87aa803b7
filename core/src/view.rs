//! Read-side snapshot of the catalog store.
//!
//! [`render`] runs the full derivation pipeline over the current state and
//! the live favorites collection, then classifies the result into one of
//! the user-facing empty states.

use crate::catalog::CatalogState;
use crate::pipeline;
use crate::types::{AbvRange, Beer, Mode, SortSpec};

/// The mutually exclusive user-facing states for a depleted (or failed)
/// display list, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyKind {
    /// Favorites mode and nothing has been favorited yet
    NoFavorites,
    /// Favorites exist but none survive the current filters
    NoFavoritesMatch,
    /// The latest remote request failed; stale items may still be shown
    LoadFailed,
    /// Remote mode with active filters and no matches
    NoMatches,
    /// Remote mode, no filters, and still nothing to show
    NothingAvailable,
}

impl EmptyKind {
    /// User-facing message for this state
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoFavorites => "You have no favorite beers yet.",
            Self::NoFavoritesMatch => "None of your favorites match the current filters.",
            Self::LoadFailed => "Failed to load beers from the catalog.",
            Self::NoMatches => "No beers match the current filters.",
            Self::NothingAvailable => "There is nothing to show right now.",
        }
    }
}

/// Everything the presentation layer reads, computed in one pass.
///
/// A value snapshot: holding one never blocks the store.
#[derive(Clone, Debug)]
pub struct CatalogView {
    /// The displayed list, already filtered and sorted
    pub items: Vec<Beer>,
    /// True while the latest request is in flight
    pub loading: bool,
    /// Message from the last failed request, if it has not been superseded
    pub last_error: Option<String>,
    /// Current 1-based page
    pub page: u32,
    /// Active data source
    pub mode: Mode,
    /// Current name filter
    pub search_text: String,
    /// Current ABV window
    pub abv_range: AbvRange,
    /// Current ordering
    pub sort_spec: SortSpec,
    /// True when the displayed list has zero items
    pub is_empty: bool,
    /// The empty-state (or failure-banner) classification, if any
    pub empty_state: Option<EmptyKind>,
}

/// Classifies the display outcome per the empty-state precedence rules.
///
/// In remote mode a failed load wins over filter-emptiness even when stale
/// items are still displayed, which is why this is independent of the
/// `is_empty` flag.
#[must_use]
pub fn classify(
    state: &CatalogState,
    favorites_len: usize,
    displayed_len: usize,
) -> Option<EmptyKind> {
    match state.mode {
        Mode::Favorites => {
            if favorites_len == 0 {
                Some(EmptyKind::NoFavorites)
            } else if displayed_len == 0 {
                Some(EmptyKind::NoFavoritesMatch)
            } else {
                None
            }
        }
        Mode::Remote => {
            if state.last_error.is_some() {
                Some(EmptyKind::LoadFailed)
            } else if displayed_len > 0 {
                None
            } else if state.has_active_filters() {
                Some(EmptyKind::NoMatches)
            } else {
                Some(EmptyKind::NothingAvailable)
            }
        }
    }
}

/// Runs source selection, filtering, sorting, and classification over the
/// current state and returns the presentation snapshot.
#[must_use]
pub fn render(state: &CatalogState, favorites: &[Beer]) -> CatalogView {
    let source = pipeline::select_source(state.mode, &state.items, favorites);
    let mut hits = pipeline::filter(source, &state.search_text, &state.abv_range);
    pipeline::sort(&mut hits, state.sort_spec);
    let items: Vec<Beer> = hits.into_iter().cloned().collect();

    let empty_state = classify(state, favorites.len(), items.len());
    let is_empty = items.is_empty();

    CatalogView {
        items,
        loading: state.loading,
        last_error: state.last_error.clone(),
        page: state.page,
        mode: state.mode,
        search_text: state.search_text.clone(),
        abv_range: state.abv_range,
        sort_spec: state.sort_spec,
        is_empty,
        empty_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BeerId;

    fn beer(id: u64, name: &str, abv: Option<f64>) -> Beer {
        Beer {
            id: BeerId::new(id),
            name: name.to_string(),
            tagline: None,
            first_brewed: None,
            description: None,
            abv,
            ibu: None,
            image_url: None,
        }
    }

    fn remote_state(items: Vec<Beer>) -> CatalogState {
        CatalogState {
            items,
            ..CatalogState::new()
        }
    }

    #[test]
    fn favorites_mode_with_no_favorites() {
        let mut state = CatalogState::new();
        state.mode = Mode::Favorites;

        let view = render(&state, &[]);
        assert!(view.is_empty);
        assert_eq!(view.empty_state, Some(EmptyKind::NoFavorites));
    }

    #[test]
    fn favorites_mode_with_no_matching_favorites() {
        let mut state = CatalogState::new();
        state.mode = Mode::Favorites;
        state.search_text = "stout".to_string();

        let favorites = vec![beer(1, "Buzz", Some(4.5))];
        let view = render(&state, &favorites);
        assert!(view.is_empty);
        assert_eq!(view.empty_state, Some(EmptyKind::NoFavoritesMatch));
    }

    #[test]
    fn remote_error_wins_over_filter_emptiness() {
        let mut state = remote_state(vec![]);
        state.search_text = "nothing matches".to_string();
        state.last_error = Some("Failed to load beers from the catalog.".to_string());

        let view = render(&state, &[]);
        assert_eq!(view.empty_state, Some(EmptyKind::LoadFailed));
    }

    #[test]
    fn remote_error_reported_with_stale_items_still_displayed() {
        // Scenario C: the previous page survives a failed refresh.
        let mut state = remote_state(vec![beer(1, "Buzz", Some(4.5))]);
        state.last_error = Some("Failed to load beers from the catalog.".to_string());

        let view = render(&state, &[]);
        assert!(!view.is_empty);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.empty_state, Some(EmptyKind::LoadFailed));
    }

    #[test]
    fn remote_filter_miss() {
        let mut state = remote_state(vec![beer(1, "Buzz", Some(4.5))]);
        state.search_text = "stout".to_string();

        let view = render(&state, &[]);
        assert!(view.is_empty);
        assert_eq!(view.empty_state, Some(EmptyKind::NoMatches));
    }

    #[test]
    fn remote_empty_without_filters() {
        let state = remote_state(vec![]);
        let view = render(&state, &[]);
        assert_eq!(view.empty_state, Some(EmptyKind::NothingAvailable));
    }

    #[test]
    fn non_empty_display_has_no_empty_state() {
        let state = remote_state(vec![beer(1, "Buzz", Some(4.5))]);
        let view = render(&state, &[]);
        assert!(!view.is_empty);
        assert_eq!(view.empty_state, None);
    }

    #[test]
    fn render_applies_the_full_pipeline() {
        let mut state = remote_state(vec![
            beer(1, "Buzz", Some(4.5)),
            beer(2, "Trashy Blonde", Some(4.1)),
            beer(3, "Punk IPA", Some(5.6)),
        ]);
        state.abv_range = AbvRange::new(Some(4.5), None);
        state.sort_spec = SortSpec::by_abv(crate::types::SortDirection::Desc);

        let view = render(&state, &[]);
        let names: Vec<&str> = view.items.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Punk IPA", "Buzz"]);
    }
}
