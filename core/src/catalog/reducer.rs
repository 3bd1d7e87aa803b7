//! Reducer logic for the catalog store.
//!
//! All request lifecycle policy lives here: when a reload is triggered,
//! how a new request supersedes the one in flight, and how settled
//! results are applied or discarded. The reducer itself never performs
//! I/O — the gateway call is returned as an effect.

use crate::catalog::{CatalogAction, CatalogState};
use crate::effect::Effect;
use crate::environment::{CatalogGateway, Favorites};
use crate::reducer::{Effects, Reducer};
use crate::types::{AbvRange, Mode, SortSpec};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// Environment dependencies for the catalog reducer
#[derive(Clone)]
pub struct CatalogEnvironment {
    /// The remote data gateway
    pub gateway: Arc<dyn CatalogGateway>,
    /// The local favorites collection
    pub favorites: Arc<dyn Favorites>,
}

impl CatalogEnvironment {
    /// Creates a new `CatalogEnvironment`
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>, favorites: Arc<dyn Favorites>) -> Self {
        Self { gateway, favorites }
    }
}

/// Reducer for the catalog store
#[derive(Clone, Debug, Default)]
pub struct CatalogReducer;

impl CatalogReducer {
    /// Creates a new `CatalogReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Starts a gateway request for the current state.
    ///
    /// Bumping `request_seq` is what supersedes any request still in
    /// flight: its eventual feedback will carry a stale sequence number
    /// and be dropped. No-op in favorites mode — that source is local.
    fn begin_load(state: &mut CatalogState, env: &CatalogEnvironment) -> Effects<CatalogAction> {
        if state.mode == Mode::Favorites {
            return SmallVec::new();
        }

        state.request_seq += 1;
        let seq = state.request_seq;
        state.loading = true;
        state.last_error = None;

        let params = state.query_params();
        tracing::debug!(seq, page = params.page, "issuing catalog request");

        let gateway = Arc::clone(&env.gateway);
        smallvec![Effect::future(async move {
            match gateway.search(params).await {
                Ok(items) => Some(CatalogAction::PageLoaded { seq, items }),
                Err(error) => {
                    tracing::error!(seq, error = %error, "catalog request failed");
                    Some(CatalogAction::LoadFailed {
                        seq,
                        message: error.to_string(),
                    })
                }
            }
        })]
    }

    /// Whether feedback for `seq` still refers to the latest request
    fn is_current(state: &CatalogState, seq: u64) -> bool {
        if seq == state.request_seq {
            return true;
        }
        tracing::debug!(
            seq,
            current = state.request_seq,
            "dropping superseded gateway response"
        );
        false
    }
}

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            // ========== Commands ==========
            CatalogAction::SetSearchText(text) => {
                state.search_text = text;
                if state.mode == Mode::Remote {
                    state.page = 1;
                    Self::begin_load(state, env)
                } else {
                    // Favorites are filtered client-side; the pipeline
                    // recomputes on the next read.
                    SmallVec::new()
                }
            }

            CatalogAction::SetAbvRange(range) => {
                state.abv_range = range;
                if state.mode == Mode::Remote {
                    state.page = 1;
                    Self::begin_load(state, env)
                } else {
                    SmallVec::new()
                }
            }

            CatalogAction::SetSortSpec(spec) => {
                // Sorting is always client-side, regardless of mode.
                state.sort_spec = spec;
                SmallVec::new()
            }

            CatalogAction::SetMode(mode) => {
                state.mode = mode;
                match mode {
                    Mode::Remote => Self::begin_load(state, env),
                    Mode::Favorites => SmallVec::new(),
                }
            }

            CatalogAction::NextPage => {
                if state.mode == Mode::Favorites {
                    tracing::warn!("pagination is unavailable in favorites mode");
                    return SmallVec::new();
                }
                state.page += 1;
                Self::begin_load(state, env)
            }

            CatalogAction::PreviousPage => {
                if state.mode == Mode::Favorites {
                    tracing::warn!("pagination is unavailable in favorites mode");
                    return SmallVec::new();
                }
                if state.page <= 1 {
                    tracing::debug!("already on the first page");
                    return SmallVec::new();
                }
                state.page -= 1;
                Self::begin_load(state, env)
            }

            CatalogAction::ResetFilters => {
                state.search_text.clear();
                state.abv_range = AbvRange::UNBOUNDED;
                state.sort_spec = SortSpec::natural();
                state.page = 1;
                state.mode = Mode::Remote;
                Self::begin_load(state, env)
            }

            CatalogAction::Load => Self::begin_load(state, env),

            CatalogAction::ToggleFavorite(beer) => {
                env.favorites.toggle(beer);
                SmallVec::new()
            }

            // ========== Gateway feedback ==========
            CatalogAction::PageLoaded { seq, items } => {
                if Self::is_current(state, seq) {
                    state.items = items;
                    state.loading = false;
                }
                SmallVec::new()
            }

            CatalogAction::LoadFailed { seq, message } => {
                if Self::is_current(state, seq) {
                    // Stale items stay visible under the error banner.
                    state.last_error = Some(message);
                    state.loading = false;
                }
                SmallVec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Beer, BeerId};
    use taproom_testing::mocks::{MemoryFavorites, MockGateway};
    use taproom_testing::{ReducerTest, assertions};

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

    fn test_env() -> CatalogEnvironment {
        CatalogEnvironment::new(
            Arc::new(MockGateway::new()),
            Arc::new(MemoryFavorites::new()),
        )
    }

    #[test]
    fn search_in_remote_mode_resets_page_and_reloads() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                page: 3,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::SetSearchText("punk".to_string()))
            .then_state(|state| {
                assert_eq!(state.search_text, "punk");
                assert_eq!(state.page, 1);
                assert!(state.loading);
                assert_eq!(state.last_error, None);
                assert_eq!(state.request_seq, 1);
            })
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn search_in_favorites_mode_issues_no_request() {
        // Scenario D, second half.
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                mode: Mode::Favorites,
                page: 2,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::SetSearchText("ipa".to_string()))
            .then_state(|state| {
                assert_eq!(state.search_text, "ipa");
                assert_eq!(state.page, 2);
                assert!(!state.loading);
                assert_eq!(state.request_seq, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn abv_range_follows_the_search_pattern() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                page: 5,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::SetAbvRange(AbvRange::new(Some(4.5), None)))
            .then_state(|state| {
                assert_eq!(state.abv_range, AbvRange::new(Some(4.5), None));
                assert_eq!(state.page, 1);
                assert!(state.loading);
            })
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn sorting_never_triggers_a_request() {
        for mode in [Mode::Remote, Mode::Favorites] {
            ReducerTest::new(CatalogReducer::new())
                .with_env(test_env())
                .given_state(CatalogState {
                    mode,
                    ..CatalogState::new()
                })
                .when_action(CatalogAction::SetSortSpec(SortSpec::by_name(
                    crate::types::SortDirection::Desc,
                )))
                .then_state(|state| {
                    assert_eq!(state.sort_spec.key, crate::types::SortKey::Name);
                    assert!(!state.loading);
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn switching_to_remote_always_reloads() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::SetMode(Mode::Remote))
            .then_state(|state| assert!(state.loading))
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn switching_to_favorites_never_reloads() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::SetMode(Mode::Favorites))
            .then_state(|state| {
                assert_eq!(state.mode, Mode::Favorites);
                assert!(!state.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn next_page_advances_and_reloads() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::NextPage)
            .then_state(|state| {
                assert_eq!(state.page, 2);
                assert!(state.loading);
            })
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn previous_page_floors_at_one_without_a_request() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::PreviousPage)
            .then_state(|state| {
                assert_eq!(state.page, 1);
                assert!(!state.loading);
                assert_eq!(state.request_seq, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn previous_page_decrements_above_one() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                page: 2,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::PreviousPage)
            .then_state(|state| assert_eq!(state.page, 1))
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn pagination_is_a_noop_in_favorites_mode() {
        for action in [CatalogAction::NextPage, CatalogAction::PreviousPage] {
            ReducerTest::new(CatalogReducer::new())
                .with_env(test_env())
                .given_state(CatalogState {
                    mode: Mode::Favorites,
                    page: 4,
                    ..CatalogState::new()
                })
                .when_action(action)
                .then_state(|state| assert_eq!(state.page, 4))
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn reset_filters_restores_defaults_and_forces_remote() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                mode: Mode::Favorites,
                page: 7,
                search_text: "stout".to_string(),
                abv_range: AbvRange::new(Some(8.0), None),
                sort_spec: SortSpec::by_abv(crate::types::SortDirection::Desc),
                ..CatalogState::new()
            })
            .when_action(CatalogAction::ResetFilters)
            .then_state(|state| {
                assert_eq!(state.search_text, "");
                assert_eq!(state.abv_range, AbvRange::UNBOUNDED);
                assert_eq!(state.sort_spec, SortSpec::natural());
                assert_eq!(state.page, 1);
                assert_eq!(state.mode, Mode::Remote);
                assert!(state.loading);
            })
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn load_is_a_noop_in_favorites_mode() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                mode: Mode::Favorites,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::Load)
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.request_seq, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn load_clears_previous_error() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                last_error: Some("the catalog service failed (status 500)".to_string()),
                ..CatalogState::new()
            })
            .when_action(CatalogAction::Load)
            .then_state(|state| {
                assert_eq!(state.last_error, None);
                assert!(state.loading);
            })
            .then_effect_count(1)
            .run();
    }

    #[test]
    fn current_response_is_applied() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                loading: true,
                request_seq: 2,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::PageLoaded {
                seq: 2,
                items: vec![beer(1, "Buzz", Some(4.5))],
            })
            .then_state(|state| {
                assert_eq!(state.items.len(), 1);
                assert!(!state.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn superseded_response_is_dropped() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                loading: true,
                request_seq: 3,
                items: vec![beer(1, "Buzz", Some(4.5))],
                ..CatalogState::new()
            })
            .when_action(CatalogAction::PageLoaded {
                seq: 2,
                items: vec![beer(2, "Trashy Blonde", Some(4.1))],
            })
            .then_state(|state| {
                // Still the newer request's job to settle this state.
                assert_eq!(state.items[0].name, "Buzz");
                assert!(state.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failure_keeps_stale_items() {
        // Scenario C at the reducer level.
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                loading: true,
                request_seq: 1,
                items: vec![beer(1, "Buzz", Some(4.5))],
                ..CatalogState::new()
            })
            .when_action(CatalogAction::LoadFailed {
                seq: 1,
                message: "the catalog service could not be reached".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.items.len(), 1);
                assert!(!state.loading);
                assert!(state.last_error.is_some());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn superseded_failure_is_dropped() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                loading: true,
                request_seq: 5,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::LoadFailed {
                seq: 4,
                message: "stale failure".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.last_error, None);
                assert!(state.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_favorite_delegates_to_the_collaborator() {
        let favorites = Arc::new(MemoryFavorites::new());
        let env = CatalogEnvironment::new(Arc::new(MockGateway::new()), favorites.clone());
        let reducer = CatalogReducer::new();
        let mut state = CatalogState::new();

        let item = beer(1, "Buzz", Some(4.5));
        let effects = reducer.reduce(&mut state, CatalogAction::ToggleFavorite(item.clone()), &env);
        assert!(effects.is_empty());
        assert!(favorites.is_member(BeerId::new(1)));

        let effects = reducer.reduce(&mut state, CatalogAction::ToggleFavorite(item), &env);
        assert!(effects.is_empty());
        assert!(!favorites.is_member(BeerId::new(1)));
    }
}
