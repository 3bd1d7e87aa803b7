//! # Taproom Core
//!
//! Core types and logic for the Taproom catalog store: a dual-source
//! reactive store over a remote paginated beer catalog and a locally
//! persisted favorites collection, under one set of filter/sort controls.
//!
//! ## Core Concepts
//!
//! - **State**: [`catalog::CatalogState`] — the store's only mutable truth
//! - **Action**: [`catalog::CatalogAction`] — every input to the store
//!   (user commands and gateway feedback)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side-effect descriptions (not execution); the runtime
//!   crate executes them and feeds produced actions back in
//! - **Environment**: injected collaborators ([`environment::CatalogGateway`],
//!   [`environment::Favorites`]) — no globals
//!
//! Derived state (the visible list and the empty-state message) is never
//! stored: [`view::render`] recomputes it from state through the pure
//! [`pipeline`] stages on every read, so observers always see the latest
//! fully applied mutation.
//!
//! ## Example
//!
//! ```
//! use taproom_core::catalog::CatalogState;
//! use taproom_core::types::{Mode, SortSpec};
//!
//! let state = CatalogState::new();
//! assert_eq!(state.page, 1);
//! assert_eq!(state.mode, Mode::Remote);
//! assert_eq!(state.sort_spec, SortSpec::natural());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub mod catalog;
pub mod environment;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod view;

/// Reducer module - the core trait for store logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all store logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// How many effects a reducer can return without allocating.
    ///
    /// Catalog actions produce at most one gateway effect.
    pub const INLINE_EFFECTS: usize = 2;

    /// Effect container returned by [`Reducer::reduce`]
    pub type Effects<A> = SmallVec<[Effect<A>; INLINE_EFFECTS]>;

    /// The Reducer trait - core abstraction for store logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates state in place and returns effect descriptions to be
        /// executed by the runtime. Must not block or perform I/O itself —
        /// anything asynchronous goes into an effect.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects describe side effects to be performed by the runtime. They are
/// values (not execution): a reducer returns them, the store runtime runs
/// them and feeds any produced action back through the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back
        /// into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wraps a future that may produce a feedback action
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Self::Future(Box::pin(fut))
        }
    }
}
