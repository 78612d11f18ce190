use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Entity, ValidationError};

/// A floor plan image markers are placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceMap {
    pub id: String,
    pub name: String,
    /// Path to the map image.
    pub path: String,
}

impl ConferenceMap {
    pub fn create() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            path: String::new(),
        }
    }

    pub fn compare_by_name(a: &ConferenceMap, b: &ConferenceMap) -> Ordering {
        a.name.cmp(&b.name)
    }
}

impl Entity for ConferenceMap {
    const KIND: &'static str = "map";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyMapName);
        }
        Ok(())
    }
}
