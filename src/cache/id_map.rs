use std::collections::BTreeMap;

/// Entities keyed by their string id.
pub type IdMap<T> = BTreeMap<String, T>;

/// Index a list of items by the id `key` extracts. Later duplicates win.
pub fn index_by<T, I, F>(items: I, key: F) -> IdMap<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> String,
{
    items
        .into_iter()
        .map(|item| (key(&item), item))
        .collect()
}
