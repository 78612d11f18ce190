use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// Position on a map image grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: f64,
    pub y: f64,
}

impl GridPos {
    /// As a `(lat, lng)` pair: latitude is the y axis.
    pub fn to_lat_lng(self) -> (f64, f64) {
        (self.y, self.x)
    }

    pub fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self { x: lng, y: lat }
    }
}

/// A named point on a [`ConferenceMap`](super::ConferenceMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub map_id: String,
    pub name: String,
    pub description: String,
    pub pos: GridPos,
}

impl MapMarker {
    pub fn create(map_id: impl Into<String>, pos: GridPos) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            map_id: map_id.into(),
            name: "New Marker".to_string(),
            description: String::new(),
            pos,
        }
    }

    /// Predicate matching markers placed on `map_id`.
    pub fn on_map(map_id: &str) -> impl Fn(&MapMarker) -> bool + '_ {
        move |marker| marker.map_id == map_id
    }

    pub fn compare_by_name(a: &MapMarker, b: &MapMarker) -> Ordering {
        a.name.cmp(&b.name)
    }
}

impl Entity for MapMarker {
    const KIND: &'static str = "marker";

    fn id(&self) -> &str {
        &self.id
    }
}
