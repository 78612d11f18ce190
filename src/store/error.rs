use thiserror::Error;

use crate::api::ApiError;
use crate::model::ValidationError;

/// Errors building intents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No {kind} id provided explicitly or from the container")]
    MissingId { kind: &'static str },
}

/// Errors surfaced by store actions to the caller.
///
/// Load failures never show up here: they become `Errored` state instead.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Rejected before any network call or dispatch
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Pushing local changes failed; the pending data stays in the store
    #[error("Failed to save {kind}: {source}")]
    Save {
        kind: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Failed to delete {kind} '{id}': {source}")]
    Delete {
        kind: &'static str,
        id: String,
        #[source]
        source: ApiError,
    },

    /// The cache has to be loaded before it can be edited or saved
    #[error("{kind} cache is not loaded")]
    NotLoaded { kind: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ActionError {
    /// Message to show the user.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Validation(err) => err.to_string(),
            ActionError::Save { source, .. } | ActionError::Delete { source, .. } => {
                source.to_string()
            }
            other => other.to_string(),
        }
    }
}
