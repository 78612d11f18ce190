use crate::cache::{IdMap, KeyedCache, MutableKeyedCache};
use crate::container::{compare_with, Container};
use crate::model::{ConferenceMap, Event, MapMarker};

use super::mvi::StoreState;

/// Everything the admin panel knows about the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Events, each with its own lifecycle.
    pub events: IdMap<Container<Event>>,
    /// Tracks the "load all events" request only; carries no data.
    pub all_events: Container<()>,
    pub map_cache: KeyedCache<ConferenceMap>,
    pub marker_cache: MutableKeyedCache<MapMarker>,
}

impl StoreState for AppState {}

impl AppState {
    pub fn event(&self, id: &str) -> Option<&Container<Event>> {
        self.events.get(id)
    }

    /// Event containers in display order: earliest start first, unloaded last.
    pub fn sorted_events(&self) -> Vec<&Container<Event>> {
        let compare = compare_with(Event::compare_start_time);
        let mut events: Vec<_> = self.events.values().collect();
        events.sort_by(|a, b| compare(*a, *b));
        events
    }

    /// The marker cache restricted to one map.
    pub fn markers_on_map(&self, map_id: &str) -> MutableKeyedCache<MapMarker> {
        self.marker_cache
            .filter(|marker, _| MapMarker::on_map(map_id)(marker))
    }
}
