//! Application state and the single writer that owns it.
//!
//! # Architecture
//!
//! - `mvi.rs` - state/intent/reducer traits
//! - `state.rs` - [`AppState`]: events, maps and markers
//! - `intent.rs` - [`AppIntent`]: what can happen to the state
//! - `reducer.rs` - [`AppReducer`]: pure transitions
//! - `owner.rs` - [`Store`]: applies intents one at a time
//! - `actions/` - async operations against an [`AdminApi`](crate::api::AdminApi)

pub mod actions;
mod error;
mod intent;
pub mod mvi;
mod owner;
mod reducer;
mod state;

pub use error::{ActionError, StoreError};
pub use intent::AppIntent;
pub use owner::Store;
pub use reducer::AppReducer;
pub use state::AppState;
