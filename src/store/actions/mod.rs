//! Actions: the async side of the store.
//!
//! Each action dispatches an intent before it suspends on the network and
//! another once the call resolves. Network failures are converted into
//! store state here and never escape as panics; validation failures return
//! before anything is dispatched.

mod events;
mod maps;
mod markers;

pub use events::{delete_event, load_events, update_event};
pub use maps::{delete_map, load_maps, update_map};
pub use markers::{load_markers, remove_marker, save_markers, stage_marker};
