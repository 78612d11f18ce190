//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use panelcache::api::{MockApi, Seed};
use panelcache::clock::ManualClock;
use panelcache::model::{ConferenceMap, Event, GridPos, MapMarker};
use panelcache::store::Store;
use tempfile::TempDir;

/// A store driven by a manual clock starting at `start`.
pub fn store_at(start: u64) -> (Store, ManualClock) {
    let clock = ManualClock::new(start);
    let store = Store::new(Arc::new(clock.clone()));
    (store, clock)
}

/// A mock API holding the built-in sample data.
pub fn sample_api() -> MockApi {
    MockApi::new(Seed::sample())
}

pub fn event(id: &str, name: &str, start_time: u64, end_time: u64) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        location: None,
        start_time,
        end_time,
    }
}

pub fn map(id: &str, name: &str) -> ConferenceMap {
    ConferenceMap {
        id: id.to_string(),
        name: name.to_string(),
        path: format!("maps/{id}.png"),
    }
}

pub fn marker(id: &str, map_id: &str, name: &str) -> MapMarker {
    MapMarker {
        id: id.to_string(),
        map_id: map_id.to_string(),
        name: name.to_string(),
        description: String::new(),
        pos: GridPos { x: 1.0, y: 2.0 },
    }
}

/// Write `content` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}
