//! Entities managed by the admin panel.

mod event;
mod map;
mod marker;

pub use event::Event;
pub use map::ConferenceMap;
pub use marker::{GridPos, MapMarker};

use thiserror::Error;

/// Problems with an entity caught before anything is sent to the server.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name field must not be empty")]
    EmptyName,

    #[error("Event must not start after it ends")]
    StartsAfterEnd,

    #[error("Map's name must not be empty")]
    EmptyMapName,
}

/// An entity that lives in a keyed cache.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Collection name used in logs and errors.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// User-visible validation message, or `None` if the entity is fine.
    fn validation_message(&self) -> Option<String> {
        self.validate().err().map(|e| e.to_string())
    }
}
