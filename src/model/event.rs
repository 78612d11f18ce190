use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Timestamp;

use super::{Entity, ValidationError};

/// A scheduled conference event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form location, e.g. "LT1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl Event {
    /// A blank event with a fresh id, starting and ending at `now`.
    pub fn create(now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            description: String::new(),
            location: None,
            start_time: now,
            end_time: now,
        }
    }

    pub fn duration(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Earliest start first, then the longest event, then by name.
    pub fn compare_start_time(a: &Event, b: &Event) -> Ordering {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| b.duration().cmp(&a.duration()))
            .then_with(|| a.name.cmp(&b.name))
    }
}

impl Entity for Event {
    const KIND: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.start_time > self.end_time {
            return Err(ValidationError::StartsAfterEnd);
        }
        Ok(())
    }
}
