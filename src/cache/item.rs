use crate::clock::Timestamp;
use crate::container::ErrorState;

/// Per-item view of a cache lookup.
///
/// The first three variants mirror the cache's own state when it has no
/// data yet. `NotPresent` and `Present` only come out of a loaded cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheItem<T> {
    Unloaded,
    Loading { started_at: Timestamp },
    Errored { error: ErrorState },
    NotPresent,
    Present(T),
}

impl<T> CacheItem<T> {
    pub fn is_unloaded(&self) -> bool {
        matches!(self, Self::Unloaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }

    pub fn is_not_present(&self) -> bool {
        matches!(self, Self::NotPresent)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(item) => Some(item),
            _ => None,
        }
    }
}
