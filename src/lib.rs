//! Client-side data cache for a conference admin panel.
//!
//! Remote entities are wrapped in a [`Container`](container::Container)
//! that tracks their sync status. Collections live in keyed caches
//! ([`KeyedCache`](cache::KeyedCache) for read-mostly data,
//! [`MutableKeyedCache`](cache::MutableKeyedCache) for data edited locally
//! and saved back in batches). A [`Store`](store::Store) owns the
//! application state and applies intents through a pure reducer; the
//! async actions in [`store::actions`] talk to an [`AdminApi`](api::AdminApi).

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod container;
pub mod logging;
pub mod model;
pub mod store;
