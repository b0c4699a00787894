// ============================================================================
// spark-maps - Core Types
// Observer capability and equality function types shared by the containers
// ============================================================================

use std::fmt;

// =============================================================================
// EQUALITY
// =============================================================================

/// Equality function type for comparing map values.
///
/// See [`crate::core::equality`] for ready-made comparisons.
pub type EqualsFn<T> = fn(&T, &T) -> bool;

// =============================================================================
// OBSERVER
// =============================================================================

/// Receives change notifications from an [`ObservableMap`].
///
/// `observe` is called with the key being written, the value that is about to
/// become current, and the value it replaces. Deletions report the default
/// value as `new`.
///
/// Observers run while the map's write lock is held. They must not call back
/// into the map that notified them.
///
/// Any `Fn(&K, &V, &V) + Send + Sync` closure is an observer:
///
/// ```
/// use spark_maps::ObservableMap;
///
/// let map: ObservableMap<String, i32> = ObservableMap::new();
/// map.observe(|key: &String, new: &i32, old: &i32| {
///     println!("{key}: {old} -> {new}");
/// });
/// map.set("a".to_string(), 1);
/// ```
///
/// [`ObservableMap`]: crate::collections::ObservableMap
pub trait Observer<K, V>: Send + Sync {
    /// Called once per mutation, before the mutation becomes visible.
    fn observe(&self, key: &K, new: &V, old: &V);
}

impl<K, V, F> Observer<K, V> for F
where
    F: Fn(&K, &V, &V) + Send + Sync,
{
    fn observe(&self, key: &K, new: &V, old: &V) {
        self(key, new, old)
    }
}

/// Boxed observer as stored by the observable map.
pub type BoxedObserver<K, V> = Box<dyn Observer<K, V>>;

/// Explicit adapter turning a plain function into an [`Observer`].
///
/// Closures already implement `Observer`; this wrapper exists for call sites
/// that want a named type, e.g. to store observers in a struct field.
#[derive(Clone, Copy)]
pub struct ObserverFn<F>(pub F);

impl<F> ObserverFn<F> {
    /// Wrap a function.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<K, V, F> Observer<K, V> for ObserverFn<F>
where
    F: Fn(&K, &V, &V) + Send + Sync,
{
    fn observe(&self, key: &K, new: &V, old: &V) {
        (self.0)(key, new, old)
    }
}

impl<F> fmt::Debug for ObserverFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverFn").finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
