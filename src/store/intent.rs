//! Intents accepted by [`AppReducer`](super::AppReducer).

use crate::cache::{IdMap, KeyedCache, MutableKeyedCache, PendingChange};
use crate::clock::Timestamp;
use crate::container::{Container, ErrorState, LoadedContainer};
use crate::model::{ConferenceMap, Entity, Event, MapMarker};

use super::error::StoreError;
use super::mvi::Intent;

#[derive(Debug, Clone)]
pub enum AppIntent {
    /// A "load all events" request went out.
    EventsLoading { at: Timestamp },

    /// All events arrived. Each is merged in as Synced.
    EventsLoaded { events: Vec<Event>, at: Timestamp },

    /// Loading all events failed.
    EventsLoadError { error: ErrorState },

    /// Replace one cached event. An Empty container removes it.
    UpdateCachedEvent { id: String, event: Container<Event> },

    /// Swap out the whole map cache.
    UpdateMapCache { cache: KeyedCache<ConferenceMap> },

    /// Set or remove one cached map.
    UpdateCachedMap {
        id: String,
        map: Option<ConferenceMap>,
        at: Timestamp,
    },

    /// Swap out the whole marker cache.
    UpdateMarkerCache { cache: MutableKeyedCache<MapMarker> },

    /// Set or remove markers, last-write-wins per entry.
    UpdateCachedMarkers {
        markers: IdMap<Option<LoadedContainer<MapMarker>>>,
        at: Timestamp,
    },

    /// A marker save finished. `error` is set if it failed.
    MarkersSaved {
        changes: Vec<PendingChange<MapMarker>>,
        error: Option<ErrorState>,
        at: Timestamp,
    },
}

impl Intent for AppIntent {
    fn name(&self) -> &'static str {
        match self {
            AppIntent::EventsLoading { .. } => "events_loading",
            AppIntent::EventsLoaded { .. } => "events_loaded",
            AppIntent::EventsLoadError { .. } => "events_load_error",
            AppIntent::UpdateCachedEvent { .. } => "update_cached_event",
            AppIntent::UpdateMapCache { .. } => "update_map_cache",
            AppIntent::UpdateCachedMap { .. } => "update_cached_map",
            AppIntent::UpdateMarkerCache { .. } => "update_marker_cache",
            AppIntent::UpdateCachedMarkers { .. } => "update_cached_markers",
            AppIntent::MarkersSaved { .. } => "markers_saved",
        }
    }
}

impl AppIntent {
    /// Update or remove a cached event.
    ///
    /// Without an explicit id, the id is taken from the container's data,
    /// which only works for ready containers.
    pub fn update_cached_event(
        event: Container<Event>,
        id: Option<String>,
    ) -> Result<Self, StoreError> {
        let id = id
            .or_else(|| event.data().map(|e| e.id.clone()))
            .ok_or(StoreError::MissingId { kind: Event::KIND })?;

        Ok(AppIntent::UpdateCachedEvent { id, event })
    }

    /// Set (`Some`) or remove (`None`) a cached map.
    pub fn update_cached_map(
        map: Option<ConferenceMap>,
        id: Option<String>,
        at: Timestamp,
    ) -> Result<Self, StoreError> {
        let id = id
            .or_else(|| map.as_ref().map(|m| m.id.clone()))
            .ok_or(StoreError::MissingId {
                kind: ConferenceMap::KIND,
            })?;

        Ok(AppIntent::UpdateCachedMap { id, map, at })
    }
}
