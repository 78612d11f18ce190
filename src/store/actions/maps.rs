use crate::api::AdminApi;
use crate::cache::{index_by, KeyedCache};
use crate::model::{ConferenceMap, Entity};
use crate::store::{ActionError, AppIntent, Store};

/// Load every map, replacing the map cache.
pub async fn load_maps(store: &Store, api: &dyn AdminApi) {
    store.dispatch(AppIntent::UpdateMapCache {
        cache: KeyedCache::loading(store.now()),
    });

    let cache = match api.get_maps().await {
        Ok(maps) => {
            tracing::info!(count = maps.len(), "Maps loaded");
            KeyedCache::build(index_by(maps, |m| m.id.clone()), store.now())
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load maps");
            KeyedCache::errored(err.to_error_state(store.now()))
        }
    };

    store.dispatch(AppIntent::UpdateMapCache { cache });
}

/// Save a map, optionally with a new image, and cache what the server
/// stored.
pub async fn update_map(
    store: &Store,
    api: &dyn AdminApi,
    map: ConferenceMap,
    image: Option<String>,
) -> Result<ConferenceMap, ActionError> {
    map.validate()?;

    let stored = api
        .update_map(&map, image)
        .await
        .map_err(|source| ActionError::Save {
            kind: ConferenceMap::KIND,
            source,
        })?;

    tracing::info!(id = %stored.id, "Map saved");
    store.dispatch(AppIntent::update_cached_map(
        Some(stored.clone()),
        None,
        store.now(),
    )?);
    Ok(stored)
}

/// Delete a map server-side, then drop it from the cache.
pub async fn delete_map(store: &Store, api: &dyn AdminApi, id: &str) -> Result<(), ActionError> {
    api.delete_map(id)
        .await
        .map_err(|source| ActionError::Delete {
            kind: ConferenceMap::KIND,
            id: id.to_string(),
            source,
        })?;

    tracing::info!(id = %id, "Map deleted");
    store.dispatch(AppIntent::update_cached_map(
        None,
        Some(id.to_string()),
        store.now(),
    )?);
    Ok(())
}
