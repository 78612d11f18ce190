//! Lifecycle states of a remotely-fetched value.

use serde_json::Value;

use crate::clock::Timestamp;

/// What went wrong while loading a value or pushing it back.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    /// Time the first error occurred.
    pub occurred_at: Timestamp,
    /// Number of attempts made so far.
    pub attempt_count: u32,
    pub message: String,
    /// Debug data about the failure.
    pub debug: Option<Value>,
}

impl ErrorState {
    /// Error from a first attempt.
    pub fn new(message: impl Into<String>, occurred_at: Timestamp) -> Self {
        Self {
            occurred_at,
            attempt_count: 1,
            message: message.into(),
            debug: None,
        }
    }

    pub fn with_debug(mut self, debug: Value) -> Self {
        self.debug = Some(debug);
        self
    }
}

/// Tagged state wrapper tracking the load/sync/error lifecycle of one value.
///
/// `data` only exists in `Synced` and `Modified`. A value normally reaches
/// `Synced` or `Errored` through `Loading`; the exceptions are local edits,
/// which move an `Empty` or `Synced` value straight to `Modified`.
#[derive(Debug, Clone, PartialEq)]
pub enum Container<T> {
    /// Nothing has been requested yet.
    Empty,
    /// A load request is in flight.
    Loading { started_at: Timestamp },
    /// The load failed.
    Errored { error: ErrorState },
    /// Data matches the server.
    Synced { data: T, modified: Timestamp },
    /// Data is ahead of the server. `error` records a failed save-back.
    Modified {
        data: T,
        modified: Timestamp,
        error: Option<ErrorState>,
    },
    /// Data was deleted client-side and the deletion may not be saved yet.
    Deleted {
        modified: Timestamp,
        error: Option<ErrorState>,
    },
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Container::Empty
    }
}

impl<T> Container<T> {
    pub fn empty() -> Self {
        Container::Empty
    }

    pub fn loading(started_at: Timestamp) -> Self {
        Container::Loading { started_at }
    }

    pub fn errored(error: ErrorState) -> Self {
        Container::Errored { error }
    }

    pub fn synced(data: T, modified: Timestamp) -> Self {
        Container::Synced { data, modified }
    }

    pub fn modified(data: T, modified: Timestamp, error: Option<ErrorState>) -> Self {
        Container::Modified {
            data,
            modified,
            error,
        }
    }

    pub fn deleted(modified: Timestamp, error: Option<ErrorState>) -> Self {
        Container::Deleted { modified, error }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// True if loading failed. A failed save-back is not an `Errored` state.
    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced { .. })
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Synced or Modified: the container has usable data.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Synced { .. } | Self::Modified { .. })
    }

    /// Short name of the active state, for logs.
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading { .. } => "loading",
            Self::Errored { .. } => "errored",
            Self::Synced { .. } => "synced",
            Self::Modified { .. } => "modified",
            Self::Deleted { .. } => "deleted",
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Synced { data, .. } | Self::Modified { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Synced { data, .. } | Self::Modified { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Load error, or the save-back error of a Modified/Deleted value.
    pub fn error(&self) -> Option<&ErrorState> {
        match self {
            Self::Errored { error } => Some(error),
            Self::Modified { error, .. } | Self::Deleted { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    /// Last-known time for this container.
    ///
    /// Modification time for Synced/Modified/Deleted, the load start for
    /// Loading, the first failure for Errored and nothing for Empty.
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Empty => None,
            Self::Loading { started_at } => Some(*started_at),
            Self::Errored { error } => Some(error.occurred_at),
            Self::Synced { modified, .. }
            | Self::Modified { modified, .. }
            | Self::Deleted { modified, .. } => Some(*modified),
        }
    }

    /// Transform the payload, keeping the state tag and timestamps.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Container<U> {
        match self {
            Self::Empty => Container::Empty,
            Self::Loading { started_at } => Container::Loading { started_at },
            Self::Errored { error } => Container::Errored { error },
            Self::Synced { data, modified } => Container::Synced {
                data: f(data),
                modified,
            },
            Self::Modified {
                data,
                modified,
                error,
            } => Container::Modified {
                data: f(data),
                modified,
                error,
            },
            Self::Deleted { modified, error } => Container::Deleted { modified, error },
        }
    }

    /// The loaded form of this container, if it has ever been loaded.
    pub fn into_loaded(self) -> Option<LoadedContainer<T>> {
        match self {
            Self::Synced { data, modified } => Some(LoadedContainer::Synced { data, modified }),
            Self::Modified {
                data,
                modified,
                error,
            } => Some(LoadedContainer::Modified {
                data,
                modified,
                error,
            }),
            Self::Deleted { modified, error } => Some(LoadedContainer::Deleted { modified, error }),
            _ => None,
        }
    }
}

/// A container that has been loaded successfully at some point.
///
/// Values of a mutable cache are always in one of these states, so each
/// entry carries its own dirty flag and modification time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedContainer<T> {
    Synced {
        data: T,
        modified: Timestamp,
    },
    Modified {
        data: T,
        modified: Timestamp,
        error: Option<ErrorState>,
    },
    Deleted {
        modified: Timestamp,
        error: Option<ErrorState>,
    },
}

impl<T> LoadedContainer<T> {
    pub fn synced(data: T, modified: Timestamp) -> Self {
        Self::Synced { data, modified }
    }

    pub fn modified(data: T, modified: Timestamp, error: Option<ErrorState>) -> Self {
        Self::Modified {
            data,
            modified,
            error,
        }
    }

    pub fn deleted(modified: Timestamp, error: Option<ErrorState>) -> Self {
        Self::Deleted { modified, error }
    }

    pub fn modified_at(&self) -> Timestamp {
        match self {
            Self::Synced { modified, .. }
            | Self::Modified { modified, .. }
            | Self::Deleted { modified, .. } => *modified,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.is_deleted()
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Synced { data, .. } | Self::Modified { data, .. } => Some(data),
            Self::Deleted { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorState> {
        match self {
            Self::Synced { .. } => None,
            Self::Modified { error, .. } | Self::Deleted { error, .. } => error.as_ref(),
        }
    }
}

impl<T> From<LoadedContainer<T>> for Container<T> {
    fn from(loaded: LoadedContainer<T>) -> Self {
        match loaded {
            LoadedContainer::Synced { data, modified } => Container::Synced { data, modified },
            LoadedContainer::Modified {
                data,
                modified,
                error,
            } => Container::Modified {
                data,
                modified,
                error,
            },
            LoadedContainer::Deleted { modified, error } => Container::Deleted { modified, error },
        }
    }
}
