//! In-memory implementation of [`AdminApi`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::cache::{index_by, IdMap};
use crate::model::{ConferenceMap, Entity, Event, GridPos, MapMarker};

use super::{AdminApi, ApiError};

/// Initial server contents, also the shape of a JSON seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub maps: Vec<ConferenceMap>,
    #[serde(default)]
    pub markers: Vec<MapMarker>,
}

impl Seed {
    /// Two events, one map and two markers on it.
    pub fn sample() -> Self {
        Self {
            events: vec![
                Event {
                    id: "1".to_string(),
                    name: "First".to_string(),
                    description: "The first event".to_string(),
                    location: None,
                    // 2019-02-01 .. 2019-02-02
                    start_time: 1_548_979_200_000,
                    end_time: 1_549_065_600_000,
                },
                Event {
                    id: "2".to_string(),
                    name: "Second".to_string(),
                    description: "The second event".to_string(),
                    location: Some("LT1".to_string()),
                    // 2019-02-05 .. 2019-02-08
                    start_time: 1_549_324_800_000,
                    end_time: 1_549_584_000_000,
                },
            ],
            maps: vec![ConferenceMap {
                id: "ground".to_string(),
                name: "Ground floor".to_string(),
                path: "maps/ground.png".to_string(),
            }],
            markers: vec![
                MapMarker {
                    id: "lt1".to_string(),
                    map_id: "ground".to_string(),
                    name: "LT1".to_string(),
                    description: "Lecture theatre 1".to_string(),
                    pos: GridPos { x: 120.0, y: 80.0 },
                },
                MapMarker {
                    id: "cafe".to_string(),
                    map_id: "ground".to_string(),
                    name: "Cafe".to_string(),
                    description: String::new(),
                    pos: GridPos { x: 40.0, y: 200.0 },
                },
            ],
        }
    }

    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = fs::read_to_string(path).map_err(|e| ApiError::SeedRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ApiError::SeedParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// API operations, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetEvents,
    UpdateEvent,
    DeleteEvent,
    GetMaps,
    UpdateMap,
    DeleteMap,
    GetMapMarkers,
    UpdateMapMarkers,
}

#[derive(Default)]
struct MockData {
    events: IdMap<Event>,
    maps: IdMap<ConferenceMap>,
    markers: IdMap<MapMarker>,
}

/// Server stand-in holding everything in memory.
///
/// Each call optionally sleeps for a fixed latency first so that callers
/// can observe their Loading states.
pub struct MockApi {
    data: Mutex<MockData>,
    latency: Duration,
    failures: Mutex<Vec<Operation>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(Seed::default())
    }
}

impl MockApi {
    pub fn new(seed: Seed) -> Self {
        let data = MockData {
            events: index_by(seed.events, |e| e.id.clone()),
            maps: index_by(seed.maps, |m| m.id.clone()),
            markers: index_by(seed.markers, |m| m.id.clone()),
        };

        Self {
            data: Mutex::new(data),
            latency: Duration::ZERO,
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next call of `op` fail with [`ApiError::Unavailable`].
    pub fn fail_next(&self, op: Operation) {
        self.failures.lock().push(op);
    }

    pub fn event_count(&self) -> usize {
        self.data.lock().events.len()
    }

    pub fn marker(&self, id: &str) -> Option<MapMarker> {
        self.data.lock().markers.get(id).cloned()
    }

    pub fn event(&self, id: &str) -> Option<Event> {
        self.data.lock().events.get(id).cloned()
    }

    pub fn map(&self, id: &str) -> Option<ConferenceMap> {
        self.data.lock().maps.get(id).cloned()
    }

    async fn begin(&self, op: Operation) -> Result<(), ApiError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut failures = self.failures.lock();
        if let Some(pos) = failures.iter().position(|f| *f == op) {
            failures.remove(pos);
            tracing::debug!(operation = ?op, "Injected API failure");
            return Err(ApiError::Unavailable(format!("injected failure for {:?}", op)));
        }

        tracing::trace!(operation = ?op, "Mock API call");
        Ok(())
    }
}

fn remove<T: Entity>(items: &mut IdMap<T>, id: &str) -> Result<(), ApiError> {
    items
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
}

#[async_trait]
impl AdminApi for MockApi {
    async fn get_events(&self) -> Result<Vec<Event>, ApiError> {
        self.begin(Operation::GetEvents).await?;
        Ok(self.data.lock().events.values().cloned().collect())
    }

    async fn update_event(&self, event: &Event) -> Result<(), ApiError> {
        self.begin(Operation::UpdateEvent).await?;
        self.data
            .lock()
            .events
            .insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        self.begin(Operation::DeleteEvent).await?;
        remove(&mut self.data.lock().events, id)
    }

    async fn get_maps(&self) -> Result<Vec<ConferenceMap>, ApiError> {
        self.begin(Operation::GetMaps).await?;
        Ok(self.data.lock().maps.values().cloned().collect())
    }

    async fn update_map(
        &self,
        map: &ConferenceMap,
        image: Option<String>,
    ) -> Result<ConferenceMap, ApiError> {
        self.begin(Operation::UpdateMap).await?;
        let mut stored = map.clone();
        if let Some(image) = image {
            stored.path = image;
        }
        self.data
            .lock()
            .maps
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_map(&self, id: &str) -> Result<(), ApiError> {
        self.begin(Operation::DeleteMap).await?;
        remove(&mut self.data.lock().maps, id)
    }

    async fn get_map_markers(&self) -> Result<Vec<MapMarker>, ApiError> {
        self.begin(Operation::GetMapMarkers).await?;
        Ok(self.data.lock().markers.values().cloned().collect())
    }

    async fn update_map_markers(
        &self,
        modified: &[MapMarker],
        deleted: &[String],
    ) -> Result<(), ApiError> {
        self.begin(Operation::UpdateMapMarkers).await?;
        let mut data = self.data.lock();
        for marker in modified {
            data.markers.insert(marker.id.clone(), marker.clone());
        }
        for id in deleted {
            data.markers.remove(id);
        }
        Ok(())
    }
}
