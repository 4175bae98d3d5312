use std::collections::HashSet;
use std::hash::Hash;

/// Keeps the first item for each key, preserving the order of kept items.
/// Must run before gap filling: repeated timestamps would corrupt gap lengths.
pub fn dedupe_by<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
