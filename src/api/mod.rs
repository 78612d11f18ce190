//! The remote admin API the caches are synchronised with.
//!
//! The store only talks to the server through [`AdminApi`]. [`MockApi`] is
//! the in-memory stand-in used by the CLI and the tests.

mod error;
mod mock;

pub use error::ApiError;
pub use mock::{MockApi, Operation, Seed};

use async_trait::async_trait;

use crate::model::{ConferenceMap, Event, MapMarker};

/// Server-side persistence for events, maps and markers.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetch every event.
    async fn get_events(&self) -> Result<Vec<Event>, ApiError>;

    /// Create or update an event.
    async fn update_event(&self, event: &Event) -> Result<(), ApiError>;

    async fn delete_event(&self, id: &str) -> Result<(), ApiError>;

    async fn get_maps(&self) -> Result<Vec<ConferenceMap>, ApiError>;

    /// Create or update a map, optionally replacing its image.
    ///
    /// Returns the map as stored by the server.
    async fn update_map(
        &self,
        map: &ConferenceMap,
        image: Option<String>,
    ) -> Result<ConferenceMap, ApiError>;

    async fn delete_map(&self, id: &str) -> Result<(), ApiError>;

    async fn get_map_markers(&self) -> Result<Vec<MapMarker>, ApiError>;

    /// Save modified markers and delete removed ones in one request.
    async fn update_map_markers(
        &self,
        modified: &[MapMarker],
        deleted: &[String],
    ) -> Result<(), ApiError>;
}
