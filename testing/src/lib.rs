//! # Taproom Testing
//!
//! Testing utilities and helpers for the Taproom catalog store.
//!
//! This crate provides:
//! - Mock implementations of the collaborator traits
//!   ([`mocks::MockGateway`], [`mocks::MemoryFavorites`], [`mocks::FixedClock`])
//! - The [`ReducerTest`] Given/When/Then harness for reducer unit tests
//! - Canonical catalog [`fixtures`] shared across the workspace's tests
//!
//! ## Example
//!
//! ```ignore
//! use taproom_testing::{ReducerTest, assertions, fixtures, mocks::MockGateway};
//!
//! ReducerTest::new(CatalogReducer::new())
//!     .with_env(test_environment())
//!     .given_state(CatalogState::new())
//!     .when_action(CatalogAction::NextPage)
//!     .then_state(|state| assert_eq!(state.page, 2))
//!     .then_effect_count(1)
//!     .run();
//! ```

pub mod fixtures;
pub mod mocks;
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};
