// Concurrent per-entity fetches with per-entity failure isolation

use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use tracing::warn;

use crate::error::FetchError;

/// Fetches every entity that has a key, concurrently, and joins on all of them.
///
/// Entities for which `key_of` returns `None` are skipped (incomplete identifiers).
/// A failed fetch is logged and replaced by `T::default()` for that key only.
pub async fn aggregate<E, K, T, F, Fut>(
    entities: Vec<E>,
    key_of: impl Fn(&E) -> Option<K>,
    fetch: F,
) -> BTreeMap<K, T>
where
    K: Ord + Display,
    T: Default,
    F: Fn(E) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let (keys, jobs): (Vec<K>, Vec<Fut>) = entities
        .into_iter()
        .filter_map(|e| key_of(&e).map(|k| (k, e)))
        .map(|(k, e)| (k, fetch(e)))
        .unzip();
    let results = join_all(jobs).await;
    keys.into_iter()
        .zip(results)
        .map(|(key, result)| {
            let payload = result.unwrap_or_else(|e| {
                warn!(entity = %key, error = %e, "upstream fetch failed; using default payload");
                T::default()
            });
            (key, payload)
        })
        .collect()
}

/// Default-value policy for single upstream calls: log and fall back to `T::default()`.
pub fn or_default<T: Default>(result: Result<T, FetchError>, call: &'static str) -> T {
    result.unwrap_or_else(|e| {
        warn!(call, error = %e, "upstream call failed; using default");
        T::default()
    })
}
