//! Selector-based field extraction over typed slices.
//!
//! Every function here is total: an empty input gives an empty result and no selector call
//! is made.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Apply `selector` to every item, preserving order.
pub fn pluck<T, U, F>(items: &[T], selector: F) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    items.iter().map(selector).collect()
}

/// Like [`pluck`] over optional items; `None` items yield a clone of `default`.
pub fn pluck_ptr<T, U, F>(items: &[Option<T>], mut selector: F, default: U) -> Vec<U>
where
    U: Clone,
    F: FnMut(&T) -> U,
{
    items
        .iter()
        .map(|item| match item {
            Some(v) => selector(v),
            None => default.clone(),
        })
        .collect()
}

/// Select from the items accepted by `filter` only.
pub fn pluck_filter<T, U, F, P>(items: &[T], mut selector: F, mut filter: P) -> Vec<U>
where
    F: FnMut(&T) -> U,
    P: FnMut(&T) -> bool,
{
    items
        .iter()
        .filter(|item| filter(*item))
        .map(|item| selector(item))
        .collect()
}

/// Selected values with duplicates removed, in first-seen order.
pub fn pluck_unique<T, U, F>(items: &[T], selector: F) -> Vec<U>
where
    U: Eq + Hash + Clone,
    F: FnMut(&T) -> U,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(selector)
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Build a map from per-item keys and values; a repeated key keeps the later value.
pub fn pluck_map<T, K, V, FK, FV>(items: &[T], mut key: FK, mut value: FV) -> HashMap<K, V>
where
    K: Eq + Hash,
    FK: FnMut(&T) -> K,
    FV: FnMut(&T) -> V,
{
    items.iter().map(|item| (key(item), value(item))).collect()
}

/// Group items by key; items keep their input order within a group.
pub fn pluck_group_by<T, K, F>(items: &[T], mut key: F) -> HashMap<K, Vec<T>>
where
    T: Clone,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}
