//! Reducer for the application state.

use crate::container::Container;

use super::intent::AppIntent;
use super::mvi::Reducer;
use super::state::AppState;

/// Pure state transitions for [`AppState`].
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = AppIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AppIntent::EventsLoading { at } => {
                state.all_events = Container::loading(at);
            }

            AppIntent::EventsLoaded { events, at } => {
                for event in events {
                    state
                        .events
                        .insert(event.id.clone(), Container::synced(event, at));
                }
                state.all_events = Container::synced((), at);
            }

            AppIntent::EventsLoadError { error } => {
                state.all_events = Container::errored(error);
            }

            AppIntent::UpdateCachedEvent { id, event } => {
                if event.is_empty() {
                    state.events.remove(&id);
                } else {
                    state.events.insert(id, event);
                }
            }

            AppIntent::UpdateMapCache { cache } => {
                state.map_cache = cache;
            }

            AppIntent::UpdateCachedMap { id, map, at } => {
                // no-op unless the maps have been loaded
                state.map_cache = state.map_cache.update_item(&id, map, at);
            }

            AppIntent::UpdateMarkerCache { cache } => {
                state.marker_cache = cache;
            }

            AppIntent::UpdateCachedMarkers { markers, at } => {
                state.marker_cache = state.marker_cache.update_items(markers, at);
            }

            AppIntent::MarkersSaved { changes, error, at } => {
                state.marker_cache = state.marker_cache.settle(changes, error, at);
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{IdMap, KeyedCache, MutableKeyedCache};
    use crate::container::{ErrorState, LoadedContainer};
    use crate::model::{ConferenceMap, Event, GridPos, MapMarker};

    fn event(id: &str) -> Event {
        Event {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            location: None,
            start_time: 0,
            end_time: 1,
        }
    }

    fn map(id: &str) -> ConferenceMap {
        ConferenceMap {
            id: id.into(),
            name: id.into(),
            path: String::new(),
        }
    }

    fn marker(id: &str) -> MapMarker {
        let mut marker = MapMarker::create("m", GridPos::default());
        marker.id = id.into();
        marker
    }

    #[test]
    fn events_loading_then_loaded() {
        let state = AppReducer::reduce(AppState::default(), AppIntent::EventsLoading { at: 5 });
        assert_eq!(state.all_events, Container::loading(5));

        let state = AppReducer::reduce(
            state,
            AppIntent::EventsLoaded {
                events: vec![event("1"), event("2")],
                at: 9,
            },
        );
        assert_eq!(state.all_events, Container::synced((), 9));
        assert_eq!(state.event("1"), Some(&Container::synced(event("1"), 9)));
        assert_eq!(state.events.len(), 2);
    }

    #[test]
    fn events_loaded_keeps_unrelated_entries() {
        let mut state = AppState::default();
        state
            .events
            .insert("local".into(), Container::modified(event("local"), 1, None));

        let state = AppReducer::reduce(
            state,
            AppIntent::EventsLoaded {
                events: vec![event("1")],
                at: 2,
            },
        );
        assert!(state.event("local").is_some_and(Container::is_modified));
    }

    #[test]
    fn events_load_error_marks_all_events_errored() {
        let error = ErrorState::new("down", 3);
        let state = AppReducer::reduce(
            AppState::default(),
            AppIntent::EventsLoadError {
                error: error.clone(),
            },
        );
        assert_eq!(state.all_events, Container::errored(error));
    }

    #[test]
    fn empty_container_removes_event() {
        let mut state = AppState::default();
        state.events.insert("1".into(), Container::synced(event("1"), 1));

        let state = AppReducer::reduce(
            state,
            AppIntent::UpdateCachedEvent {
                id: "1".into(),
                event: Container::empty(),
            },
        );
        assert_eq!(state.event("1"), None);
    }

    #[test]
    fn cached_map_update_requires_loaded_cache() {
        let intent = AppIntent::UpdateCachedMap {
            id: "a".into(),
            map: Some(map("a")),
            at: 4,
        };

        let unloaded = AppReducer::reduce(AppState::default(), intent.clone());
        assert!(unloaded.map_cache.is_unloaded());

        let loaded = AppState {
            map_cache: KeyedCache::build(IdMap::new(), 1),
            ..AppState::default()
        };
        let loaded = AppReducer::reduce(loaded, intent);
        assert!(loaded.map_cache.get_item("a").is_present());
        assert!(loaded.map_cache.container().is_modified());
    }

    #[test]
    fn cached_markers_are_last_write_wins() {
        let mut entries = IdMap::new();
        entries.insert("x".to_string(), LoadedContainer::modified(marker("x"), 100, None));
        let state = AppState {
            marker_cache: MutableKeyedCache::build(entries, 100),
            ..AppState::default()
        };

        let mut stale = IdMap::new();
        stale.insert("x".to_string(), Some(LoadedContainer::synced(marker("x"), 50)));
        let state = AppReducer::reduce(
            state,
            AppIntent::UpdateCachedMarkers {
                markers: stale,
                at: 200,
            },
        );

        assert!(state
            .marker_cache
            .get_item("x")
            .present()
            .is_some_and(|entry| entry.is_modified()));
    }

    #[test]
    fn markers_saved_syncs_unchanged_entries() {
        let mut entries = IdMap::new();
        entries.insert("x".to_string(), LoadedContainer::modified(marker("x"), 100, None));
        let state = AppState {
            marker_cache: MutableKeyedCache::build(entries, 100),
            ..AppState::default()
        };
        let changes = state.marker_cache.pending_changes();

        let state = AppReducer::reduce(
            state,
            AppIntent::MarkersSaved {
                changes,
                error: None,
                at: 200,
            },
        );

        assert_eq!(
            state.marker_cache.get_item("x").present(),
            Some(&LoadedContainer::synced(marker("x"), 100))
        );
    }

    #[test]
    fn marker_cache_swap_replaces_everything() {
        let state = AppReducer::reduce(
            AppState::default(),
            AppIntent::UpdateMarkerCache {
                cache: MutableKeyedCache::loading(8),
            },
        );
        assert!(state.marker_cache.is_loading());
    }
}
