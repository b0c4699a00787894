// ============================================================================
// spark-maps - Literal Macros
// ============================================================================

/// Build a [`Set`](crate::Set) from a list of members.
///
/// # Usage
///
/// ```rust
/// use spark_maps::set;
///
/// let s = set!["a", "b", "a"];
/// assert_eq!(s.len(), 2);
/// assert!(s.contains("b"));
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Set::new()
    };
    ($($item:expr),+ $(,)?) => {
        <$crate::Set<_> as ::core::iter::FromIterator<_>>::from_iter([$($item),+])
    };
}

/// Build a [`SyncMap`](crate::SyncMap) from `key => value` pairs.
///
/// # Usage
///
/// ```rust
/// use spark_maps::sync_map;
///
/// let m = sync_map! { "a" => 1, "b" => 2 };
/// assert_eq!(m.get("b"), 2);
/// ```
#[macro_export]
macro_rules! sync_map {
    () => {
        $crate::SyncMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::SyncMap<_, _> as ::core::iter::FromIterator<_>>::from_iter([$(($key, $value)),+])
    };
}

/// Build an [`ObservableMap`](crate::ObservableMap) from `key => value`
/// pairs. The seed entries are stored without notifications.
///
/// # Usage
///
/// ```rust
/// use spark_maps::observable_map;
///
/// let m = observable_map! { 1 => "one", 2 => "two" };
/// assert_eq!(m.len(), 2);
/// assert_eq!(m.observer_count(), 0);
/// ```
#[macro_export]
macro_rules! observable_map {
    () => {
        $crate::ObservableMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::ObservableMap<_, _> as ::core::iter::FromIterator<_>>::from_iter([$(($key, $value)),+])
    };
}
