//! Containers for remotely-fetched data.
//!
//! A [`Container`] replaces the usual `x`, `x_loading`, `x_error` field
//! triplets with a single sum type:
//!
//! ```text
//! Empty ──→ Loading ──→ Synced ⇄ Modified
//!              │           │        │
//!              ↓           └──→ Deleted
//!           Errored
//! ```
//!
//! Transitions are plain constructors. Whoever owns the state decides when
//! to move between them and when to retry a failed load.

mod order;
mod state;

pub use order::{compare_with, sort_containers};
pub use state::{Container, ErrorState, LoadedContainer};
