// ============================================================================
// spark-maps - Lock Scopes
// Restricted handles passed to `lock` / `rlock` callbacks
// ============================================================================
//
// A scope borrows the map's storage for exactly as long as the callback
// runs. Reads inside a scope never touch the lock again, so composite
// read-modify-write sequences cannot deadlock on re-entry.
// ============================================================================

use std::borrow::Borrow;
use std::collections::hash_map::{Iter, Keys, Values};
use std::collections::HashMap;
use std::hash::Hash;

use super::observable::Notifier;

// =============================================================================
// READ SCOPE
// =============================================================================

/// Read-only view of a map while its read lock is held.
///
/// Handed to [`SyncMap::rlock`] and [`ObservableMap::rlock`] callbacks.
///
/// [`SyncMap::rlock`]: crate::collections::SyncMap::rlock
/// [`ObservableMap::rlock`]: crate::collections::ObservableMap::rlock
pub struct ReadScope<'a, K, V> {
    data: &'a HashMap<K, V>,
}

impl<'a, K, V> ReadScope<'a, K, V>
where
    K: Eq + Hash,
{
    pub(crate) fn new(data: &'a HashMap<K, V>) -> Self {
        Self { data }
    }

    /// Returns the value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get(key)
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the keys in unspecified order.
    pub fn keys(&self) -> Keys<'a, K, V> {
        self.data.keys()
    }

    /// Iterates over the values in unspecified order.
    pub fn values(&self) -> Values<'a, K, V> {
        self.data.values()
    }

    /// Iterates over the entries in unspecified order.
    pub fn iter(&self) -> Iter<'a, K, V> {
        self.data.iter()
    }
}

// =============================================================================
// WRITE SCOPE
// =============================================================================

/// Mutation handle for a map while its write lock is held.
///
/// Handed to [`SyncMap::lock`] and [`ObservableMap::lock`] callbacks. On an
/// observable map, [`set`](WriteScope::set) and
/// [`delete`](WriteScope::delete) notify observers exactly as the map's own
/// `set` / `delete` do.
///
/// # Example
///
/// ```
/// use spark_maps::SyncMap;
///
/// let hits: SyncMap<&str, u32> = SyncMap::new();
/// hits.set("home", 1);
///
/// // increment if present, without releasing the lock in between
/// hits.lock(|scope| {
///     if let Some(&n) = scope.get("home") {
///         scope.set("home", n + 1);
///     }
/// });
/// assert_eq!(hits.get("home"), 2);
/// ```
///
/// [`SyncMap::lock`]: crate::collections::SyncMap::lock
/// [`ObservableMap::lock`]: crate::collections::ObservableMap::lock
pub struct WriteScope<'a, K, V> {
    data: &'a mut HashMap<K, V>,
    notifier: Option<Notifier<'a, K, V>>,
}

impl<'a, K, V> WriteScope<'a, K, V>
where
    K: Eq + Hash,
{
    pub(crate) fn new(data: &'a mut HashMap<K, V>) -> Self {
        Self {
            data,
            notifier: None,
        }
    }

    pub(crate) fn observed(data: &'a mut HashMap<K, V>, notifier: Notifier<'a, K, V>) -> Self {
        Self {
            data,
            notifier: Some(notifier),
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get(key)
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stores `value` under `key`, notifying observers first when the map
    /// is observable.
    pub fn set(&mut self, key: K, value: V) {
        match &self.notifier {
            Some(notifier) => notifier.set(self.data, key, value),
            None => {
                self.data.insert(key, value);
            }
        }
    }

    /// Removes `key`, notifying observers first when the map is observable.
    ///
    /// Takes the key the way the map-level `delete` takes its items: owned
    /// or by reference. An absent key can still be reported to observers.
    pub fn delete<Q>(&mut self, key: Q)
    where
        Q: Borrow<K>,
    {
        let key: &K = key.borrow();
        match &self.notifier {
            Some(notifier) => notifier.delete(self.data, key),
            None => {
                self.data.remove(key);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
