use crate::api::AdminApi;
use crate::container::Container;
use crate::model::{Entity, Event};
use crate::store::{ActionError, AppIntent, Store};

/// Load every event from the server.
pub async fn load_events(store: &Store, api: &dyn AdminApi) {
    store.dispatch(AppIntent::EventsLoading { at: store.now() });

    match api.get_events().await {
        Ok(events) => {
            tracing::info!(count = events.len(), "Events loaded");
            store.dispatch(AppIntent::EventsLoaded {
                events,
                at: store.now(),
            });
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load events");
            store.dispatch(AppIntent::EventsLoadError {
                error: err.to_error_state(store.now()),
            });
        }
    }
}

/// Stage an edited event locally and push it to the server.
///
/// The event is Modified while the request is in flight and Synced once it
/// succeeds. On failure it stays Modified with the error attached.
pub async fn update_event(
    store: &Store,
    api: &dyn AdminApi,
    event: Event,
) -> Result<(), ActionError> {
    event.validate()?;

    let modified = store.now();
    store.dispatch(AppIntent::update_cached_event(
        Container::modified(event.clone(), modified, None),
        None,
    )?);

    match api.update_event(&event).await {
        Ok(()) => {
            tracing::info!(id = %event.id, "Event saved");
            store.dispatch(AppIntent::update_cached_event(
                Container::synced(event, modified),
                None,
            )?);
            Ok(())
        }
        Err(source) => {
            tracing::warn!(id = %event.id, error = %source, "Failed to save event");
            let error = source.to_error_state(store.now());
            store.dispatch(AppIntent::update_cached_event(
                Container::modified(event, modified, Some(error)),
                None,
            )?);
            Err(ActionError::Save {
                kind: Event::KIND,
                source,
            })
        }
    }
}

/// Delete an event server-side, then drop it from the store.
///
/// The cached copy is left alone if the server refuses.
pub async fn delete_event(store: &Store, api: &dyn AdminApi, id: &str) -> Result<(), ActionError> {
    if let Err(source) = api.delete_event(id).await {
        tracing::warn!(id = %id, error = %source, "Failed to delete event");
        return Err(ActionError::Delete {
            kind: Event::KIND,
            id: id.to_string(),
            source,
        });
    }

    tracing::info!(id = %id, "Event deleted");
    store.dispatch(AppIntent::update_cached_event(
        Container::empty(),
        Some(id.to_string()),
    )?);
    Ok(())
}
