//! # Taproom Runtime
//!
//! Runtime implementation for the Taproom catalog store.
//!
//! This crate is the imperative shell around `taproom-core`:
//!
//! - **Store**: the runtime that owns state, applies the reducer, and
//!   executes effects with an action feedback loop
//! - **`FavoritesStore`**: the persisted favorites collaborator
//! - **`SessionStorage`**: in-memory key-value persistence (the
//!   per-session blob stand-in)
//! - **`Catalog`**: the typed facade the presentation layer talks to
//!
//! ## Example
//!
//! ```ignore
//! use taproom_runtime::{Catalog, FavoritesStore, SessionStorage};
//! use taproom_client::CatalogClient;
//! use taproom_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(SessionStorage::new());
//! let favorites = Arc::new(FavoritesStore::new(storage, Arc::new(SystemClock)));
//! let catalog = Catalog::new(Arc::new(CatalogClient::new()), favorites);
//!
//! let mut handle = catalog.load().await;
//! handle.wait().await;
//! let view = catalog.view().await;
//! ```

pub mod catalog;
pub mod favorites;
pub mod session;

pub use catalog::Catalog;
pub use error::StoreError;
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use session::SessionStorage;
pub use store::Store;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur while waiting on Store operations
    ///
    /// The store's mutators themselves never fail — request failures are
    /// captured in state — so the only runtime error is running out of
    /// patience.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Timeout waiting for spawned effects to settle
        #[error("timed out waiting for effects to settle")]
        Timeout,
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the action's effects
/// (and any actions they feed back) to be fully applied.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(CatalogAction::Load).await;
/// handle.wait().await;
/// // The gateway response has settled and state reflects it.
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete
    ///
    /// Returns once the effect counter reaches zero; actions produced by
    /// the effects have been applied to state by then.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Store module - the runtime for reducers
pub mod store {
    use super::{Arc, DecrementGuard, EffectHandle, EffectTracking};
    use futures::future::BoxFuture;
    use taproom_core::effect::Effect;
    use taproom_core::reducer::Reducer;
    use tokio::sync::RwLock;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind an async `RwLock`)
    /// 2. Reducer (store logic)
    /// 3. Environment (injected collaborators)
    /// 4. Effect execution (with the action feedback loop)
    ///
    /// The reducer runs synchronously under the write lock, so a reader
    /// never observes a partially applied mutation; effects run in spawned
    /// tasks and feed any produced action back through [`Store::send`].
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: E,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: self.environment.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        S: Send + Sync + 'static,
        A: Send + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment,
            }
        }

        /// Send an action to the store
        ///
        /// Applies the reducer synchronously (the returned handle's state
        /// mutation is visible as soon as this returns), then starts the
        /// returned effects in spawned tasks.
        ///
        /// # Returns
        ///
        /// An [`EffectHandle`] that can be used to wait for the effects —
        /// and the feedback actions they produce — to settle.
        pub async fn send(&self, action: A) -> EffectHandle {
            metrics::counter!("store.actions.total").increment(1);
            let (handle, tracking) = EffectHandle::new();
            dispatch(self.clone(), action, tracking).await;
            handle
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released
        /// promptly:
        ///
        /// ```ignore
        /// let page = store.state(|s| s.page).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// The injected environment
        pub const fn environment(&self) -> &E {
            &self.environment
        }
    }

    /// Applies one action and starts its effects under `tracking`.
    ///
    /// Boxed because the feedback loop re-enters it from inside spawned
    /// effect tasks.
    fn dispatch<S, A, E, R>(
        store: Store<S, A, E, R>,
        action: A,
        tracking: EffectTracking,
    ) -> BoxFuture<'static, ()>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        S: Send + Sync + 'static,
        A: Send + 'static,
        E: Clone + Send + Sync + 'static,
    {
        Box::pin(async move {
            let effects = {
                let mut state = store.state.write().await;
                store.reducer.reduce(&mut state, action, &store.environment)
            };

            for effect in effects {
                match effect {
                    Effect::None => {
                        tracing::trace!("executing Effect::None (no-op)");
                    }
                    Effect::Future(fut) => {
                        metrics::counter!("store.effects.spawned").increment(1);
                        tracking.increment();

                        let store = store.clone();
                        let tracking = tracking.clone();
                        tokio::spawn(async move {
                            let _guard = DecrementGuard(tracking.clone());
                            if let Some(next) = fut.await {
                                // Feedback: apply the produced action before
                                // the guard marks this effect settled.
                                dispatch(store, next, tracking).await;
                            }
                        });
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taproom_core::effect::Effect;
    use taproom_core::reducer::{Effects, Reducer};
    use taproom_core::smallvec;

    #[derive(Clone, Debug, Default)]
    struct CounterState {
        value: u64,
        echoes: u64,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        IncrementAndEcho,
        Noop,
        Echoed,
    }

    #[derive(Clone)]
    struct CounterEnv;

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = CounterEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Effects<Self::Action> {
            match action {
                CounterAction::Increment => {
                    state.value += 1;
                    Effects::new()
                }
                CounterAction::IncrementAndEcho => {
                    state.value += 1;
                    smallvec![Effect::future(async { Some(CounterAction::Echoed) })]
                }
                CounterAction::Noop => smallvec![Effect::None],
                CounterAction::Echoed => {
                    state.echoes += 1;
                    Effects::new()
                }
            }
        }
    }

    #[tokio::test]
    async fn send_applies_state_synchronously() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        let _handle = store.send(CounterAction::Increment).await;
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn effects_feed_actions_back() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        let mut handle = store.send(CounterAction::IncrementAndEcho).await;
        handle.wait().await;

        assert_eq!(store.state(|s| s.value).await, 1);
        assert_eq!(store.state(|s| s.echoes).await, 1);
    }

    #[tokio::test]
    async fn noop_effects_settle_immediately() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        let mut handle = store.send(CounterAction::Noop).await;
        handle.wait().await;
        assert_eq!(store.state(|s| s.value).await, 0);
    }

    #[tokio::test]
    async fn completed_handle_returns_immediately() {
        let mut handle = EffectHandle::completed();
        handle.wait().await;
    }

    #[tokio::test]
    async fn wait_with_timeout_settles() {
        let store = Store::new(CounterState::default(), CounterReducer, CounterEnv);
        let mut handle = store.send(CounterAction::IncrementAndEcho).await;
        handle
            .wait_with_timeout(std::time::Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(store.state(|s| s.echoes).await, 1);
    }
}
