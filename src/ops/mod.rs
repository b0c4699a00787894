// ============================================================================
// spark-maps - Functional Map Helpers
// Stateless helpers over plain, unsynchronized HashMaps
// ============================================================================
//
// A missing map is `None`. Read helpers accept `&HashMap` or
// `Option<&HashMap>` and treat `None` as empty. Helpers that return a map
// return `Option<HashMap>` so that `None` propagates and is never allocated.
//
// Nothing here locks. Use `SyncMap` for shared access.
// ============================================================================

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

// =============================================================================
// EXTRACTION
// =============================================================================

/// Returns every key of the map. Order is unspecified.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use spark_maps::ops;
///
/// let m = HashMap::from([("a", 1), ("b", 2)]);
/// let mut keys = ops::keys(&m);
/// keys.sort();
/// assert_eq!(keys, vec!["a", "b"]);
///
/// assert!(ops::keys(None::<&HashMap<&str, i32>>).is_empty());
/// ```
pub fn keys<'a, K, V, S, M>(m: M) -> Vec<K>
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: Clone + 'a,
    V: 'a,
    S: 'a,
{
    match m.into() {
        Some(m) => m.keys().cloned().collect(),
        None => Vec::new(),
    }
}

/// Returns every value of the map. Order is unspecified.
pub fn values<'a, K, V, S, M>(m: M) -> Vec<V>
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: 'a,
    V: Clone + 'a,
    S: 'a,
{
    match m.into() {
        Some(m) => m.values().cloned().collect(),
        None => Vec::new(),
    }
}

/// Shallow clone. A missing map clones to `None`, not to an empty map.
pub fn clone<'a, K, V, S, M>(m: M) -> Option<HashMap<K, V, S>>
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: Clone + 'a,
    V: Clone + 'a,
    S: Clone + 'a,
{
    m.into().cloned()
}

// =============================================================================
// ITERATION
// =============================================================================

/// Calls `f` once per entry. No-op for a missing map.
pub fn each<'a, K, V, S, M, F>(m: M, mut f: F)
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: 'a,
    V: 'a,
    S: 'a,
    F: FnMut(&K, &V),
{
    if let Some(m) = m.into() {
        for (k, v) in m {
            f(k, v);
        }
    }
}

/// Returns a new map holding exactly the entries for which `test` holds.
///
/// The result keeps the source map's hasher. A missing map filters to `None`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use spark_maps::ops;
///
/// let m = HashMap::from([("a", 1), ("b", 2), ("c", 3)]);
/// let odd = ops::filter(&m, |_, v| v % 2 == 1).unwrap();
/// assert_eq!(odd.len(), 2);
/// assert!(!odd.contains_key("b"));
/// ```
pub fn filter<'a, K, V, S, M, F>(m: M, mut test: F) -> Option<HashMap<K, V, S>>
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: Eq + Hash + Clone + 'a,
    V: Clone + 'a,
    S: BuildHasher + Clone + 'a,
    F: FnMut(&K, &V) -> bool,
{
    let m = m.into()?;
    let mut out = HashMap::with_hasher(m.hasher().clone());
    for (k, v) in m {
        if test(k, v) {
            out.insert(k.clone(), v.clone());
        }
    }
    Some(out)
}

/// Returns the first entry for which `test` holds, in iteration order.
///
/// When nothing matches, or the map is missing, returns the default key and
/// value.
pub fn find<'a, K, V, S, M, F>(m: M, mut test: F) -> (K, V)
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: Clone + Default + 'a,
    V: Clone + Default + 'a,
    S: 'a,
    F: FnMut(&K, &V) -> bool,
{
    m.into()
        .and_then(|m| m.iter().find(|(k, v)| test(k, v)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .unwrap_or_default()
}

/// Left fold over every entry. A missing map returns `init` unchanged.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use spark_maps::ops;
///
/// let m = HashMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(ops::reduce(&m, 10, |acc, _, v| acc + v), 13);
/// ```
pub fn reduce<'a, K, V, S, M, A, F>(m: M, init: A, mut f: F) -> A
where
    M: Into<Option<&'a HashMap<K, V, S>>>,
    K: 'a,
    V: 'a,
    S: 'a,
    F: FnMut(A, &K, &V) -> A,
{
    match m.into() {
        Some(m) => m.iter().fold(init, |acc, (k, v)| f(acc, k, v)),
        None => init,
    }
}

// =============================================================================
// MUTATION
// =============================================================================

/// Writes every entry of `src` into `dst`, overwriting existing keys.
///
/// The two maps may use different hashers.
pub fn copy<'a, K, V, S1, S2, M>(dst: &mut HashMap<K, V, S1>, src: M)
where
    M: Into<Option<&'a HashMap<K, V, S2>>>,
    K: Eq + Hash + Clone + 'a,
    V: Clone + 'a,
    S1: BuildHasher,
    S2: 'a,
{
    if let Some(src) = src.into() {
        dst.extend(src.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Removes every entry for which `test` holds, in place.
pub fn delete_func<K, V, S, F>(m: &mut HashMap<K, V, S>, mut test: F)
where
    F: FnMut(&K, &V) -> bool,
{
    m.retain(|k, v| !test(k, v));
}

// =============================================================================
// TESTS
// =============================================================================
