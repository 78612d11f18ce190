//! Unidirectional data flow primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ readers
//!    ↑                                │
//!    └──── actions (network I/O) ─────┘
//! ```
//!
//! Reducers are the only place state changes. Side effects such as API
//! calls live in actions, which dispatch intents before and after they
//! suspend.

/// Marker trait for store state.
///
/// States are replaced wholesale on every dispatch, so they must be cheap
/// to rebuild from the previous value and comparable for change detection.
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// A state change request: a user edit or the outcome of a network call.
pub trait Intent: Send + 'static {
    /// Name of the intent, for logs.
    fn name(&self) -> &'static str;
}

/// Reducer transforms state based on intents.
pub trait Reducer {
    type State: StoreState;
    type Intent: Intent;

    /// Process an intent and return the new state.
    ///
    /// Must be pure: timestamps and results arrive inside the intent.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
