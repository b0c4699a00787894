// ============================================================================
// spark-maps - ObservableMap
// A SyncMap that notifies registered observers on every write and delete
// ============================================================================
//
// Notification happens inside the write lock and before the mutation is
// applied: observers see (key, pending new value, prior value), and no other
// lock holder can observe the map between the notification and the store.
//
// Lock order is always map first, observer list second. `observe` only
// takes the observer list lock.
// ============================================================================

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

use super::scope::{ReadScope, WriteScope};
use super::sync::SyncMap;
use crate::core::types::{BoxedObserver, EqualsFn, Observer};

// =============================================================================
// OPTIONS
// =============================================================================

/// Notification options for an [`ObservableMap`].
///
/// The defaults notify on every write and every delete, including deletes of
/// keys that were never present (reported with a default "old" value).
pub struct ObservableOptions<V> {
    /// Notify when `delete` names a key that has no entry.
    pub notify_absent_deletes: bool,
    /// When set, a write to an existing key whose new value `equals` the old
    /// one is stored without notifying.
    pub equals: Option<EqualsFn<V>>,
}

impl<V> Default for ObservableOptions<V> {
    fn default() -> Self {
        Self {
            notify_absent_deletes: true,
            equals: None,
        }
    }
}

impl<V> Clone for ObservableOptions<V> {
    fn clone(&self) -> Self {
        Self {
            notify_absent_deletes: self.notify_absent_deletes,
            equals: self.equals,
        }
    }
}

impl<V> std::fmt::Debug for ObservableOptions<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableOptions")
            .field("notify_absent_deletes", &self.notify_absent_deletes)
            .field("equals", &self.equals.is_some())
            .finish()
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Notify-then-mutate steps, borrowed for the duration of one write lock.
///
/// `zero` stands in for the missing side of a notification: the old value of
/// a new key, or the new value of a removed one.
pub(crate) struct Notifier<'a, K, V> {
    observers: &'a [BoxedObserver<K, V>],
    options: &'a ObservableOptions<V>,
    zero: V,
}

impl<K, V> Notifier<'_, K, V>
where
    K: Eq + Hash,
{
    fn notify(&self, key: &K, new: &V, old: &V) {
        for observer in self.observers {
            observer.observe(key, new, old);
        }
    }

    /// Notifies with the prior value (zero if absent), then stores.
    pub(crate) fn set(&self, data: &mut HashMap<K, V>, key: K, value: V) {
        match data.get(&key) {
            Some(old) => {
                let unchanged = self.options.equals.is_some_and(|eq| eq(old, &value));
                if !unchanged {
                    self.notify(&key, &value, old);
                }
            }
            None => self.notify(&key, &value, &self.zero),
        }
        data.insert(key, value);
    }

    /// Notifies with (zero, prior value), then removes. Absent keys are
    /// reported with a zero prior value unless the options say otherwise.
    pub(crate) fn delete(&self, data: &mut HashMap<K, V>, key: &K) {
        match data.get(key) {
            Some(old) => self.notify(key, &self.zero, old),
            None if self.options.notify_absent_deletes => {
                self.notify(key, &self.zero, &self.zero)
            }
            None => {}
        }
        data.remove(key);
    }

    /// Notifies with (zero, value) for every entry `test` selects, removing
    /// it in the same pass.
    pub(crate) fn retain_unless<F>(&self, data: &mut HashMap<K, V>, mut test: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        data.retain(|k, v| {
            if test(k, v) {
                self.notify(k, &self.zero, v);
                false
            } else {
                true
            }
        });
    }
}

// =============================================================================
// OBSERVABLE MAP
// =============================================================================

/// A [`SyncMap`] that reports every `set` and `delete` to its observers.
///
/// Reads (`keys`, `values`, `len`, `get`, `each`, `filter`, `find`,
/// `reduce`, `rlock`) behave exactly like the wrapped `SyncMap`.
///
/// Observers run synchronously, in registration order, with the write lock
/// held. A slow observer stalls every other user of the map, and an observer
/// must never call back into the map that notified it.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use spark_maps::ObservableMap;
///
/// let map: ObservableMap<&str, i32> = ObservableMap::new();
/// let log = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = log.clone();
/// map.observe(move |k: &&'static str, new: &i32, old: &i32| {
///     sink.lock().unwrap().push((*k, *new, *old));
/// });
///
/// map.set("x", 10);
/// map.set("x", 20);
/// map.delete(["x"]);
///
/// assert_eq!(
///     *log.lock().unwrap(),
///     vec![("x", 10, 0), ("x", 20, 10), ("x", 0, 20)]
/// );
/// ```
pub struct ObservableMap<K, V> {
    sync: SyncMap<K, V>,
    observers: RwLock<Vec<BoxedObserver<K, V>>>,
    options: ObservableOptions<V>,
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash,
{
    /// Create a new empty map with no observers.
    pub fn new() -> Self {
        Self::with_options(ObservableOptions::default())
    }

    /// Create a map with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sync: SyncMap::with_capacity(capacity),
            observers: RwLock::new(Vec::new()),
            options: ObservableOptions::default(),
        }
    }

    /// Create a map with custom notification options.
    pub fn with_options(options: ObservableOptions<V>) -> Self {
        Self {
            sync: SyncMap::new(),
            observers: RwLock::new(Vec::new()),
            options,
        }
    }

    /// The options this map was created with.
    pub fn options(&self) -> &ObservableOptions<V> {
        &self.options
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Registers an observer. It receives every mutation from now on.
    ///
    /// Safe to call while other threads write to the map. Calling it from
    /// inside an observer callback deadlocks.
    pub fn observe<O>(&self, observer: O)
    where
        O: Observer<K, V> + 'static,
    {
        let mut observers = self.observers.write();
        observers.push(Box::new(observer));
        log::debug!("observable map now has {} observers", observers.len());
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    // =========================================================================
    // READS (delegated)
    // =========================================================================

    /// Snapshot of all keys, unspecified order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.sync.keys()
    }

    /// Snapshot of all values, unspecified order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.sync.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.sync.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.sync.is_empty()
    }

    /// Current value for `key`, or `V::default()` if absent.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.sync.get(key)
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.sync.contains_key(key)
    }

    /// Calls `f` once per entry while holding the read lock.
    pub fn each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.sync.each(f)
    }

    /// New plain map holding the entries for which `test` holds.
    pub fn filter<F>(&self, test: F) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        self.sync.filter(test)
    }

    /// First entry for which `test` holds, or default key and value.
    pub fn find<F>(&self, test: F) -> (K, V)
    where
        K: Clone + Default,
        V: Clone + Default,
        F: FnMut(&K, &V) -> bool,
    {
        self.sync.find(test)
    }

    /// Left fold over every entry. Observers are not involved.
    pub fn reduce<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        self.sync.reduce(init, f)
    }

    /// Runs `f` while holding the read lock.
    pub fn rlock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&ReadScope<'_, K, V>) -> R,
    {
        self.sync.rlock(f)
    }

    /// Snapshot of the current entries as a plain SyncMap, without observers.
    pub fn to_sync(&self) -> SyncMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.sync.clone()
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash,
    V: Default,
{
    // =========================================================================
    // WRITES (notifying)
    // =========================================================================

    /// Stores `value` under `key`.
    ///
    /// Every observer is called with `(key, value, old)` before the value is
    /// stored; `old` is `V::default()` for a new key. If an observer panics,
    /// the panic propagates, the lock is released and the old value stays.
    pub fn set(&self, key: K, value: V) {
        let mut data = self.sync.write();
        let observers = self.observers.read();
        self.notifier(&observers).set(&mut data, key, value);
    }

    /// Removes every listed key, in order.
    ///
    /// Each key is reported as `(key, V::default(), old)` just before it is
    /// removed. With default options, a key that has no entry is still
    /// reported, with `old = V::default()`.
    pub fn delete<I>(&self, keys: I)
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut data = self.sync.write();
        let observers = self.observers.read();
        let notifier = self.notifier(&observers);
        let before = data.len();
        for key in keys {
            let key: &K = key.borrow();
            notifier.delete(&mut data, key);
        }
        log::trace!("observable map delete removed {} entries", before - data.len());
    }

    /// Removes every entry for which `test` holds, reporting each as
    /// `(key, V::default(), value)` before removal.
    pub fn delete_func<F>(&self, test: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut data = self.sync.write();
        let observers = self.observers.read();
        let before = data.len();
        self.notifier(&observers).retain_unless(&mut data, test);
        log::trace!(
            "observable map delete_func removed {} entries",
            before - data.len()
        );
    }

    /// Runs `f` while holding the write lock.
    ///
    /// The [`WriteScope`] handed to `f` notifies observers on `set` and
    /// `delete`, so composite updates still raise notifications.
    pub fn lock<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut WriteScope<'_, K, V>) -> R,
    {
        let mut data = self.sync.write();
        let observers = self.observers.read();
        f(&mut WriteScope::observed(
            &mut data,
            self.notifier(&observers),
        ))
    }

    fn notifier<'a>(&'a self, observers: &'a [BoxedObserver<K, V>]) -> Notifier<'a, K, V> {
        Notifier {
            observers,
            options: &self.options,
            zero: V::default(),
        }
    }
}

/// Left fold over a possibly missing [`ObservableMap`]. `None` returns `init`.
pub fn reduce_observable<'a, K, V, A, M, F>(map: M, init: A, f: F) -> A
where
    M: Into<Option<&'a ObservableMap<K, V>>>,
    K: Eq + Hash + 'a,
    V: 'a,
    F: FnMut(A, &K, &V) -> A,
{
    match map.into() {
        Some(map) => map.reduce(init, f),
        None => init,
    }
}

impl<K, V> Default for ObservableMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V>
where
    K: Eq + Hash,
{
    /// Seeds the map without notifying; there are no observers yet.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            sync: SyncMap::from_iter(iter),
            observers: RwLock::new(Vec::new()),
            options: ObservableOptions::default(),
        }
    }
}

impl<K, V> std::fmt::Debug for ObservableMap<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableMap")
            .field("sync", &self.sync)
            .field("observers", &self.observers.read().len())
            .field("options", &self.options)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
