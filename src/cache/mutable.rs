//! A keyed cache whose entries carry their own sync state.

use crate::clock::Timestamp;
use crate::container::{Container, ErrorState, LoadedContainer};

use super::id_map::IdMap;
use super::item::CacheItem;
use super::keyed::KeyedCache;

/// Keyed cache of [`LoadedContainer`] entries.
///
/// Each entry tracks whether it is in sync, locally modified or locally
/// deleted, independently of the load state of the cache itself. Updates
/// are last-write-wins on the entry's modification time, so a stale
/// response cannot clobber a newer local edit.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableKeyedCache<T> {
    cache: KeyedCache<LoadedContainer<T>>,
}

impl<T> Default for MutableKeyedCache<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Container<IdMap<LoadedContainer<T>>>> for MutableKeyedCache<T> {
    fn from(container: Container<IdMap<LoadedContainer<T>>>) -> Self {
        Self {
            cache: container.into(),
        }
    }
}

impl<T> MutableKeyedCache<T> {
    pub fn empty() -> Self {
        Container::empty().into()
    }

    pub fn loading(started_at: Timestamp) -> Self {
        Container::loading(started_at).into()
    }

    pub fn errored(error: ErrorState) -> Self {
        Container::errored(error).into()
    }

    pub fn build(items: IdMap<LoadedContainer<T>>, now: Timestamp) -> Self {
        Container::synced(items, now).into()
    }

    /// A cache freshly loaded from the server: every entry Synced at `now`.
    pub fn build_synced(items: IdMap<T>, now: Timestamp) -> Self {
        let entries = items
            .into_iter()
            .map(|(id, item)| (id, LoadedContainer::synced(item, now)))
            .collect();
        Self::build(entries, now)
    }

    pub fn container(&self) -> &Container<IdMap<LoadedContainer<T>>> {
        self.cache.container()
    }

    pub fn is_unloaded(&self) -> bool {
        self.cache.is_unloaded()
    }

    pub fn is_loading(&self) -> bool {
        self.cache.is_loading()
    }

    pub fn is_errored(&self) -> bool {
        self.cache.is_errored()
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    /// Raw entries including soft-deleted ones.
    pub fn entries(&self) -> Option<&IdMap<LoadedContainer<T>>> {
        self.cache.items()
    }

    /// Look up one entry. Deleted entries read as `NotPresent`, so the
    /// returned container is always Synced or Modified.
    pub fn get_item(&self, id: &str) -> CacheItem<&LoadedContainer<T>> {
        match self.cache.get_item(id) {
            CacheItem::Present(entry) if entry.is_deleted() => CacheItem::NotPresent,
            other => other,
        }
    }
}

impl<T: Clone> MutableKeyedCache<T> {
    /// Set or remove one entry, last-write-wins.
    ///
    /// An incoming entry replaces the existing one only when there is none
    /// or the existing entry's time is `<=` the incoming one. Removal always
    /// applies. No-op unless the cache is loaded.
    pub fn update_item(&self, id: &str, item: Option<LoadedContainer<T>>, now: Timestamp) -> Self {
        let mut items = IdMap::new();
        items.insert(id.to_string(), item);
        self.update_items(items, now)
    }

    /// Batched [`update_item`](Self::update_item).
    pub fn update_items(&self, items: IdMap<Option<LoadedContainer<T>>>, now: Timestamp) -> Self {
        let Some(current) = self.entries() else {
            return self.clone();
        };

        let mut changes = IdMap::new();
        for (id, incoming) in items {
            match incoming {
                Some(incoming) => {
                    let existing = current.get(&id);
                    if accepts(existing, &incoming) {
                        changes.insert(id, Some(incoming));
                    } else {
                        tracing::debug!(
                            id = %id,
                            existing = existing.map(LoadedContainer::modified_at),
                            incoming = incoming.modified_at(),
                            "Dropped stale cache entry"
                        );
                    }
                }
                None => {
                    changes.insert(id, None);
                }
            }
        }

        Self {
            cache: self.cache.update_items(changes, now),
        }
    }

    /// Restrict to entries whose data matches `keep(data, id)`.
    /// Deleted entries never match.
    pub fn filter(&self, keep: impl Fn(&T, &str) -> bool) -> Self {
        Self {
            cache: self
                .cache
                .filter(|entry, id| entry.data().is_some_and(|data| keep(data, id))),
        }
    }

    /// Entries that need pushing back to the server, in id order.
    pub fn pending_changes(&self) -> Vec<PendingChange<T>> {
        self.entries()
            .into_iter()
            .flatten()
            .filter_map(|(id, entry)| {
                let data = match entry {
                    LoadedContainer::Synced { .. } => return None,
                    LoadedContainer::Modified { data, .. } => Some(data.clone()),
                    LoadedContainer::Deleted { .. } => None,
                };
                Some(PendingChange {
                    id: id.clone(),
                    data,
                    modified: entry.modified_at(),
                })
            })
            .collect()
    }
}

impl<T: Clone + PartialEq> MutableKeyedCache<T> {
    /// Record the outcome of pushing `changes` to the server.
    ///
    /// With no `error`, modified entries become Synced and deleted ones are
    /// dropped. With an `error`, each entry keeps its change and carries the
    /// error. Either way an entry only settles if it still holds exactly the
    /// change that was sent: anything staged since then is left untouched,
    /// even within the same millisecond.
    pub fn settle(
        &self,
        changes: Vec<PendingChange<T>>,
        error: Option<ErrorState>,
        now: Timestamp,
    ) -> Self {
        let Some(current) = self.entries() else {
            return self.clone();
        };

        let mut settled = IdMap::new();
        for change in changes {
            if !current.get(&change.id).is_some_and(|entry| change.matches(entry)) {
                tracing::debug!(id = %change.id, "Entry changed during save, left pending");
                continue;
            }

            let entry = match (change.data, &error) {
                (Some(data), None) => Some(LoadedContainer::synced(data, change.modified)),
                (None, None) => None,
                (Some(data), Some(error)) => Some(LoadedContainer::modified(
                    data,
                    change.modified,
                    Some(error.clone()),
                )),
                (None, Some(error)) => {
                    Some(LoadedContainer::deleted(change.modified, Some(error.clone())))
                }
            };
            settled.insert(change.id, entry);
        }

        if settled.is_empty() {
            return self.clone();
        }

        Self {
            cache: self.cache.update_items(settled, now),
        }
    }
}

/// A locally modified (`data: Some`) or deleted (`data: None`) entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange<T> {
    pub id: String,
    pub data: Option<T>,
    /// Modification time of the local change.
    pub modified: Timestamp,
}

impl<T: PartialEq> PendingChange<T> {
    /// Whether `entry` is still this unsaved change.
    fn matches(&self, entry: &LoadedContainer<T>) -> bool {
        let same_state = match (&self.data, entry) {
            (Some(data), LoadedContainer::Modified { data: current, .. }) => data == current,
            (None, LoadedContainer::Deleted { .. }) => true,
            _ => false,
        };
        same_state && entry.modified_at() == self.modified
    }
}

fn accepts<T>(existing: Option<&LoadedContainer<T>>, incoming: &LoadedContainer<T>) -> bool {
    existing.map_or(true, |e| e.modified_at() <= incoming.modified_at())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> MutableKeyedCache<&'static str> {
        let mut entries = IdMap::new();
        entries.insert("a".to_string(), LoadedContainer::synced("alpha", 100));
        entries.insert("b".to_string(), LoadedContainer::modified("beta", 100, None));
        entries.insert("c".to_string(), LoadedContainer::deleted(100, None));
        MutableKeyedCache::build(entries, 100)
    }

    #[test]
    fn older_incoming_is_dropped() {
        let cache = loaded().update_item("a", Some(LoadedContainer::modified("stale", 99, None)), 200);
        assert_eq!(
            cache.get_item("a").present(),
            Some(&LoadedContainer::synced("alpha", 100))
        );
        // the cache itself still became Modified
        assert!(cache.container().is_modified());
    }

    #[test]
    fn equal_time_incoming_wins() {
        let cache = loaded().update_item("a", Some(LoadedContainer::modified("fresh", 100, None)), 200);
        assert_eq!(
            cache.get_item("a").present(),
            Some(&LoadedContainer::modified("fresh", 100, None))
        );
    }

    #[test]
    fn new_key_is_inserted() {
        let cache = loaded().update_item("d", Some(LoadedContainer::synced("delta", 1)), 200);
        assert!(cache.get_item("d").is_present());
    }

    #[test]
    fn removal_always_applies() {
        let cache = loaded().update_item("b", None, 200);
        assert!(cache.get_item("b").is_not_present());
        assert!(!cache.entries().is_some_and(|e| e.contains_key("b")));
    }

    #[test]
    fn deleted_entries_hidden_but_kept_raw() {
        let cache = loaded();
        assert!(cache.get_item("c").is_not_present());
        assert!(cache.entries().is_some_and(|e| e.contains_key("c")));
    }

    #[test]
    fn filter_drops_deleted() {
        let cache = loaded().filter(|_, _| true);
        let entries = cache.entries().expect("loaded");
        assert_eq!(entries.len(), 2);
        assert!(!entries.contains_key("c"));
    }

    #[test]
    fn pending_changes_lists_modified_and_deleted() {
        assert_eq!(
            loaded().pending_changes(),
            vec![
                PendingChange {
                    id: "b".to_string(),
                    data: Some("beta"),
                    modified: 100,
                },
                PendingChange {
                    id: "c".to_string(),
                    data: None,
                    modified: 100,
                },
            ]
        );
    }

    #[test]
    fn settle_success_syncs_and_drops() {
        let cache = loaded();
        let settled = cache.settle(cache.pending_changes(), None, 300);

        assert_eq!(
            settled.get_item("b").present(),
            Some(&LoadedContainer::synced("beta", 100))
        );
        assert!(!settled.entries().is_some_and(|e| e.contains_key("c")));
        assert!(settled.pending_changes().is_empty());
    }

    #[test]
    fn settle_failure_keeps_changes_with_error() {
        let cache = loaded();
        let error = ErrorState::new("down", 300);
        let settled = cache.settle(cache.pending_changes(), Some(error.clone()), 300);

        let entries = settled.entries().expect("loaded");
        assert_eq!(
            entries["b"],
            LoadedContainer::modified("beta", 100, Some(error.clone()))
        );
        assert_eq!(entries["c"], LoadedContainer::deleted(100, Some(error)));
    }

    #[test]
    fn settle_skips_entries_restaged_after_the_save_began() {
        let cache = loaded();
        let sent = cache.pending_changes();
        // same millisecond, different data
        let newer = LoadedContainer::modified("newer", 100, None);
        let cache = cache.update_item("b", Some(newer), 100);
        // a deletion that was undone
        let back = LoadedContainer::modified("back", 110, None);
        let cache = cache.update_item("c", Some(back), 110);

        let settled = cache.settle(sent, None, 300);
        assert_eq!(
            settled.get_item("b").present(),
            Some(&LoadedContainer::modified("newer", 100, None))
        );
        assert_eq!(
            settled.get_item("c").present(),
            Some(&LoadedContainer::modified("back", 110, None))
        );
        assert_eq!(settled, cache);
    }

    #[test]
    fn build_synced_stamps_every_entry() {
        let mut items = IdMap::new();
        items.insert("x".to_string(), 1);
        let cache = MutableKeyedCache::build_synced(items, 42);
        assert_eq!(
            cache.get_item("x").present(),
            Some(&LoadedContainer::synced(1, 42))
        );
    }

    #[test]
    fn update_on_unloaded_is_noop() {
        let cache = MutableKeyedCache::<u8>::loading(1);
        assert_eq!(cache.update_item("x", Some(LoadedContainer::synced(1, 2)), 3), cache);
    }
}
