//! The state owner every consumer is handed.

use std::sync::Arc;

use tokio::sync::watch;

use crate::clock::{Clock, SystemClock, Timestamp};

use super::intent::AppIntent;
use super::mvi::{Intent, Reducer};
use super::reducer::AppReducer;
use super::state::AppState;

/// Single-writer owner of [`AppState`].
///
/// Every [`dispatch`](Self::dispatch) runs the reducer on the current
/// state and publishes the result before the next dispatch is applied, so
/// readers only ever see whole transitions. Cloned handles share the same
/// state.
#[derive(Clone)]
pub struct Store {
    state: Arc<watch::Sender<AppState>>,
    clock: Arc<dyn Clock>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_state(AppState::default(), clock)
    }

    pub fn with_state(state: AppState, clock: Arc<dyn Clock>) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            state: Arc::new(sender),
            clock,
        }
    }

    /// Current time from the store's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Apply one intent.
    pub fn dispatch(&self, intent: AppIntent) {
        let name = intent.name();
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = AppReducer::reduce(current, intent);
        });
        tracing::debug!(intent = name, "Dispatched");
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Read part of the state without copying all of it.
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::container::Container;

    #[test]
    fn dispatch_updates_shared_state() {
        let clock = ManualClock::new(10);
        let store = Store::new(Arc::new(clock.clone()));
        let other = store.clone();

        store.dispatch(AppIntent::EventsLoading { at: store.now() });

        assert_eq!(other.select(|s| s.all_events.clone()), Container::loading(10));
    }

    #[tokio::test]
    async fn subscribers_see_each_dispatch() {
        let store = Store::new(Arc::new(ManualClock::new(1)));
        let mut rx = store.subscribe();

        store.dispatch(AppIntent::EventsLoading { at: 1 });
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().all_events.is_loading());
    }
}
