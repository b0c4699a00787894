// ============================================================================
// spark-maps - SyncMap
// A HashMap guarded by a single reader-writer lock
// ============================================================================
//
// Every public operation holds the lock for its whole duration: readers
// share it, writers take it exclusively. `lock` / `rlock` hold it across a
// caller-supplied closure for composite sequences.
//
// The lock is not reentrant. A closure passed to `each`, `filter`, `find`,
// `reduce`, `delete_func`, `lock` or `rlock` must not call back into the
// same map; use the scope handle instead.
// ============================================================================

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::scope::{ReadScope, WriteScope};

// =============================================================================
// SYNC MAP
// =============================================================================

/// A thread-safe HashMap behind a `parking_lot::RwLock`.
///
/// Lookups of absent keys return `V::default()`. Returned `Vec`s and maps are
/// snapshots taken under the lock, unaffected by later writes.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use spark_maps::SyncMap;
///
/// let scores: Arc<SyncMap<String, i32>> = Arc::new(SyncMap::new());
///
/// std::thread::scope(|s| {
///     for id in 0..4 {
///         let scores = scores.clone();
///         s.spawn(move || scores.set(format!("player-{id}"), id * 10));
///     }
/// });
///
/// assert_eq!(scores.len(), 4);
/// assert_eq!(scores.get("player-3"), 30);
/// assert_eq!(scores.get("nobody"), 0);
/// ```
pub struct SyncMap<K, V> {
    data: RwLock<HashMap<K, V>>,
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
{
    /// Create a new empty map.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Create a map with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.data.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.data.write()
    }

    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    /// Snapshot of all keys, unspecified order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.read().keys().cloned().collect()
    }

    /// Snapshot of all values, unspecified order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.read().values().cloned().collect()
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Number of entries.
    ///
    /// Takes the read lock, so the count is never torn by a concurrent
    /// writer. Inside `lock` / `rlock`, use the scope's `len` instead.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Current value for `key`, or `V::default()` if absent.
    ///
    /// Takes the read lock, like `len`.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.read().get(key).cloned().unwrap_or_default()
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains_key(key)
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&self, key: K, value: V) {
        self.write().insert(key, value);
    }

    /// Removes every listed key. Absent keys are skipped.
    pub fn delete<I>(&self, keys: I)
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut data = self.write();
        let before = data.len();
        for key in keys {
            let key: &K = key.borrow();
            data.remove(key);
        }
        log::trace!("sync map delete removed {} entries", before - data.len());
    }

    /// Removes every entry for which `test` holds.
    pub fn delete_func<F>(&self, mut test: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut data = self.write();
        let before = data.len();
        data.retain(|k, v| !test(k, v));
        log::trace!("sync map delete_func removed {} entries", before - data.len());
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Calls `f` once per entry while holding the read lock.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.read().iter() {
            f(k, v);
        }
    }

    /// New plain map holding the entries for which `test` holds.
    pub fn filter<F>(&self, mut test: F) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        self.read()
            .iter()
            .filter(|(k, v)| test(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// First entry for which `test` holds, or default key and value.
    pub fn find<F>(&self, mut test: F) -> (K, V)
    where
        K: Clone + Default,
        V: Clone + Default,
        F: FnMut(&K, &V) -> bool,
    {
        self.read()
            .iter()
            .find(|(k, v)| test(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .unwrap_or_default()
    }

    /// Left fold over every entry while holding the read lock.
    ///
    /// See [`reduce_sync`] for the form that accepts a missing map.
    pub fn reduce<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        self.read()
            .iter()
            .fold(init, |acc, (k, v)| f(acc, k, v))
    }

    // =========================================================================
    // SCOPED LOCKING
    // =========================================================================

    /// Runs `f` while holding the write lock.
    ///
    /// `f` receives a [`WriteScope`] for reads and writes that must happen
    /// atomically. The lock is released when `f` returns or unwinds.
    pub fn lock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut WriteScope<'_, K, V>) -> R,
    {
        let mut data = self.write();
        f(&mut WriteScope::new(&mut data))
    }

    /// Runs `f` while holding the read lock.
    ///
    /// `f` receives a [`ReadScope`] for a consistent multi-step read. The lock
    /// is released when `f` returns or unwinds.
    pub fn rlock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&ReadScope<'_, K, V>) -> R,
    {
        let data = self.read();
        f(&ReadScope::new(&data))
    }

    /// Consumes the map, returning the underlying HashMap.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.data.into_inner()
    }
}

/// Left fold over a possibly missing [`SyncMap`]. `None` returns `init`.
///
/// # Example
///
/// ```
/// use spark_maps::{reduce_sync, SyncMap};
///
/// let map = SyncMap::from_iter([("a", 1), ("b", 2)]);
/// assert_eq!(reduce_sync(&map, 0, |acc, _, v| acc + v), 3);
/// assert_eq!(reduce_sync(None::<&SyncMap<&str, i32>>, 5, |acc, _, v| acc + v), 5);
/// ```
pub fn reduce_sync<'a, K, V, A, M, F>(map: M, init: A, f: F) -> A
where
    M: Into<Option<&'a SyncMap<K, V>>>,
    K: Eq + Hash + 'a,
    V: 'a,
    F: FnMut(A, &K, &V) -> A,
{
    match map.into() {
        Some(map) => map.reduce(init, f),
        None => init,
    }
}

impl<K, V> Default for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for SyncMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Copies every entry under the read lock into a new map with its own lock.
    fn clone(&self) -> Self {
        Self {
            data: RwLock::new(self.read().clone()),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<K, V> From<HashMap<K, V>> for SyncMap<K, V> {
    fn from(data: HashMap<K, V>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

impl<K, V> std::fmt::Debug for SyncMap<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.read();
        f.debug_struct("SyncMap")
            .field("data", &*data)
            .field("size", &data.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
