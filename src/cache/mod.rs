//! Keyed caches built on [`Container`](crate::container::Container).
//!
//! - [`KeyedCache`]: one container around an id → item map. Item lookups
//!   derive a [`CacheItem`] view from the cache state and the map.
//! - [`MutableKeyedCache`]: a keyed cache whose values are themselves
//!   loaded containers, for per-item dirty tracking and save-back.

mod id_map;
mod item;
mod keyed;
mod mutable;

pub use id_map::{index_by, IdMap};
pub use item::CacheItem;
pub use keyed::KeyedCache;
pub use mutable::{MutableKeyedCache, PendingChange};
