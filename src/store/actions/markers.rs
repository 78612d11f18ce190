use crate::api::AdminApi;
use crate::cache::{index_by, IdMap, MutableKeyedCache};
use crate::clock::Timestamp;
use crate::container::LoadedContainer;
use crate::model::{Entity, MapMarker};
use crate::store::{ActionError, AppIntent, Store};

/// Load every marker, replacing the marker cache.
pub async fn load_markers(store: &Store, api: &dyn AdminApi) {
    store.dispatch(AppIntent::UpdateMarkerCache {
        cache: MutableKeyedCache::loading(store.now()),
    });

    let cache = match api.get_map_markers().await {
        Ok(markers) => {
            tracing::info!(count = markers.len(), "Markers loaded");
            // one timestamp for the cache and all of its entries
            MutableKeyedCache::build_synced(index_by(markers, |m| m.id.clone()), store.now())
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load markers");
            MutableKeyedCache::errored(err.to_error_state(store.now()))
        }
    };

    store.dispatch(AppIntent::UpdateMarkerCache { cache });
}

/// Record a local edit to a marker without contacting the server.
pub fn stage_marker(store: &Store, marker: MapMarker) -> Result<(), ActionError> {
    marker.validate()?;
    let at = store.now();
    let id = marker.id.clone();
    stage(store, id, LoadedContainer::modified(marker, at, None), at)
}

/// Soft-delete a marker locally. The deletion is sent by [`save_markers`].
pub fn remove_marker(store: &Store, id: &str) -> Result<(), ActionError> {
    let at = store.now();
    stage(store, id.to_string(), LoadedContainer::deleted(at, None), at)
}

fn stage(
    store: &Store,
    id: String,
    entry: LoadedContainer<MapMarker>,
    at: Timestamp,
) -> Result<(), ActionError> {
    if !store.select(|s| s.marker_cache.is_loaded()) {
        return Err(ActionError::NotLoaded {
            kind: MapMarker::KIND,
        });
    }

    let mut markers = IdMap::new();
    markers.insert(id, Some(entry));
    store.dispatch(AppIntent::UpdateCachedMarkers { markers, at });
    Ok(())
}

/// Push every Modified and Deleted marker to the server in one batch.
///
/// On success modified entries become Synced and deleted ones are dropped.
/// On failure each entry keeps its pending change with the error attached.
/// Entries edited or re-staged while the request was in flight are left as
/// they are, so the newer local change is never lost.
pub async fn save_markers(store: &Store, api: &dyn AdminApi) -> Result<(), ActionError> {
    let Some(pending) = store.select(|s| {
        s.marker_cache
            .is_loaded()
            .then(|| s.marker_cache.pending_changes())
    }) else {
        return Err(ActionError::NotLoaded {
            kind: MapMarker::KIND,
        });
    };

    if pending.is_empty() {
        tracing::debug!("No marker changes to save");
        return Ok(());
    }

    let modified: Vec<MapMarker> = pending.iter().filter_map(|c| c.data.clone()).collect();
    let deleted: Vec<String> = pending
        .iter()
        .filter(|c| c.data.is_none())
        .map(|c| c.id.clone())
        .collect();

    let result = api.update_map_markers(&modified, &deleted).await;
    let at = store.now();

    let error = match &result {
        Ok(()) => {
            tracing::info!(
                modified = modified.len(),
                deleted = deleted.len(),
                "Markers saved"
            );
            None
        }
        Err(source) => {
            tracing::warn!(error = %source, "Failed to save markers");
            Some(source.to_error_state(at))
        }
    };

    store.dispatch(AppIntent::MarkersSaved {
        changes: pending,
        error,
        at,
    });

    result.map_err(|source| ActionError::Save {
        kind: MapMarker::KIND,
        source,
    })
}
