//! A container whose payload is a map of entities by id.

use crate::clock::Timestamp;
use crate::container::{Container, ErrorState};

use super::id_map::IdMap;
use super::item::CacheItem;

/// Cache of entities fetched as one collection.
///
/// The cache-level container tracks the load of the whole collection.
/// Local edits move a loaded cache to `Modified`, so `Synced` always means
/// "exactly what the server last returned".
///
/// Every operation returns a new cache and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedCache<T> {
    container: Container<IdMap<T>>,
}

impl<T> Default for KeyedCache<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Container<IdMap<T>>> for KeyedCache<T> {
    fn from(container: Container<IdMap<T>>) -> Self {
        Self { container }
    }
}

impl<T> KeyedCache<T> {
    pub fn empty() -> Self {
        Container::empty().into()
    }

    pub fn loading(started_at: Timestamp) -> Self {
        Container::loading(started_at).into()
    }

    pub fn errored(error: ErrorState) -> Self {
        Container::errored(error).into()
    }

    /// A cache just loaded from its source.
    pub fn build(items: IdMap<T>, now: Timestamp) -> Self {
        Container::synced(items, now).into()
    }

    pub fn container(&self) -> &Container<IdMap<T>> {
        &self.container
    }

    pub fn into_container(self) -> Container<IdMap<T>> {
        self.container
    }

    pub fn is_unloaded(&self) -> bool {
        self.container.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.container.is_loading()
    }

    pub fn is_errored(&self) -> bool {
        self.container.is_errored()
    }

    pub fn is_loaded(&self) -> bool {
        self.container.is_ready()
    }

    /// The full mapping, if the cache is loaded.
    pub fn items(&self) -> Option<&IdMap<T>> {
        self.container.data()
    }

    /// Look up one item.
    pub fn get_item(&self, id: &str) -> CacheItem<&T> {
        match &self.container {
            Container::Empty | Container::Deleted { .. } => CacheItem::Unloaded,
            Container::Loading { started_at } => CacheItem::Loading {
                started_at: *started_at,
            },
            Container::Errored { error } => CacheItem::Errored {
                error: error.clone(),
            },
            Container::Synced { data, .. } | Container::Modified { data, .. } => data
                .get(id)
                .map(CacheItem::Present)
                .unwrap_or(CacheItem::NotPresent),
        }
    }
}

impl<T: Clone> KeyedCache<T> {
    /// Set (`Some`) or remove (`None`) one item.
    ///
    /// No-op unless the cache is loaded. The result is `Modified` at `now`.
    pub fn update_item(&self, id: &str, item: Option<T>, now: Timestamp) -> Self {
        self.with_items(now, |data| apply(data, id.to_string(), item))
    }

    /// Batched [`update_item`](Self::update_item) producing one `Modified` cache.
    pub fn update_items(&self, items: IdMap<Option<T>>, now: Timestamp) -> Self {
        self.with_items(now, |data| {
            for (id, item) in items {
                apply(data, id, item);
            }
        })
    }

    /// Restrict the cache to items matching `keep(item, id)`.
    ///
    /// No-op unless loaded. The state tag, timestamp and any save error of
    /// the original are preserved.
    pub fn filter(&self, keep: impl Fn(&T, &str) -> bool) -> Self {
        let retain = |data: &IdMap<T>| -> IdMap<T> {
            data.iter()
                .filter(|(id, item)| keep(item, id))
                .map(|(id, item)| (id.clone(), item.clone()))
                .collect()
        };

        match &self.container {
            Container::Synced { data, modified } => Container::synced(retain(data), *modified).into(),
            Container::Modified {
                data,
                modified,
                error,
            } => Container::modified(retain(data), *modified, error.clone()).into(),
            _ => self.clone(),
        }
    }

    fn with_items(&self, now: Timestamp, edit: impl FnOnce(&mut IdMap<T>)) -> Self {
        match self.container.data() {
            Some(data) => {
                let mut data = data.clone();
                edit(&mut data);
                Container::modified(data, now, None).into()
            }
            None => self.clone(),
        }
    }
}

fn apply<T>(data: &mut IdMap<T>, id: String, item: Option<T>) {
    match item {
        Some(item) => {
            data.insert(id, item);
        }
        None => {
            data.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::index_by;

    fn cache() -> KeyedCache<String> {
        let items = index_by(vec!["one".to_string(), "two".to_string()], |s| {
            s.chars().next().map(String::from).unwrap_or_default()
        });
        KeyedCache::build(items, 10)
    }

    #[test]
    fn build_is_synced() {
        let c = cache();
        assert!(c.container().is_synced());
        assert_eq!(c.container().timestamp(), Some(10));
    }

    #[test]
    fn get_item_reflects_cache_state() {
        assert!(KeyedCache::<u8>::empty().get_item("x").is_unloaded());
        assert_eq!(
            KeyedCache::<u8>::loading(5).get_item("x"),
            CacheItem::Loading { started_at: 5 }
        );
        assert!(KeyedCache::<u8>::errored(ErrorState::new("e", 1))
            .get_item("x")
            .is_errored());
        let deleted: KeyedCache<u8> = Container::deleted(3, None).into();
        assert!(deleted.get_item("x").is_unloaded());
    }

    #[test]
    fn get_item_present_and_missing() {
        let c = cache();
        assert_eq!(c.get_item("o"), CacheItem::Present(&"one".to_string()));
        assert!(c.get_item("z").is_not_present());
    }

    #[test]
    fn update_item_removes_and_marks_modified() {
        let original = cache();
        let updated = original.update_item("o", None, 20);

        assert!(updated.container().is_modified());
        assert_eq!(updated.container().timestamp(), Some(20));
        assert!(updated.get_item("o").is_not_present());
        // the original is untouched
        assert!(original.get_item("o").is_present());
    }

    #[test]
    fn update_item_on_unloaded_is_noop() {
        let c = KeyedCache::<u8>::loading(1);
        assert_eq!(c.update_item("a", Some(1), 2), c);
    }

    #[test]
    fn update_items_batches_into_one_modified() {
        let mut changes = IdMap::new();
        changes.insert("o".to_string(), None);
        changes.insert("n".to_string(), Some("new".to_string()));

        let updated = cache().update_items(changes, 30);
        let items = updated.items().expect("loaded");
        assert_eq!(items.len(), 2);
        assert!(items.contains_key("n"));
        assert!(items.contains_key("t"));
        assert!(updated.container().is_modified());
    }

    #[test]
    fn filter_preserves_tag() {
        let synced = cache().filter(|item, _| item.starts_with('t'));
        assert!(synced.container().is_synced());
        assert_eq!(synced.items().map(|m| m.len()), Some(1));

        let err = ErrorState::new("save failed", 4);
        let modified: KeyedCache<String> =
            Container::modified(cache().items().cloned().unwrap_or_default(), 15, Some(err.clone()))
                .into();
        let filtered = modified.filter(|_, id| id == "o");
        assert_eq!(
            filtered.container(),
            &Container::modified(
                index_by(vec!["one".to_string()], |_| "o".to_string()),
                15,
                Some(err)
            )
        );
    }
}
