// ============================================================================
// spark-maps - Set
// A HashMap from element to presence marker, no synchronization
// ============================================================================

use std::borrow::Borrow;
use std::collections::hash_map::{IntoKeys, Keys};
use std::collections::HashMap;
use std::hash::Hash;

// =============================================================================
// SET
// =============================================================================

/// A set of `T` built on `HashMap<T, ()>`.
///
/// A value is a member iff its marker entry exists. There is no internal
/// locking; share it across threads behind your own lock, or keep the
/// members as keys of a [`SyncMap`](crate::collections::SyncMap).
///
/// # Example
///
/// ```
/// use spark_maps::Set;
///
/// let mut tags: Set<&str> = Set::new();
/// tags.insert("important");
/// tags.insert("todo");
/// tags.insert("todo");
///
/// assert!(tags.contains("important"));
/// assert_eq!(tags.len(), 2);
///
/// tags.delete(["todo", "never-added"]);
/// assert_eq!(tags.to_vec(), vec!["important"]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Set<T>
where
    T: Eq + Hash,
{
    data: HashMap<T, ()>,
}

impl<T> Set<T>
where
    T: Eq + Hash,
{
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Create a set with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
        }
    }

    // =========================================================================
    // MEMBERSHIP
    // =========================================================================

    /// Returns true if `item` is a member.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(item)
    }

    /// Adds `item`. Returns true if it was not already a member.
    pub fn insert(&mut self, item: T) -> bool {
        self.data.insert(item, ()).is_none()
    }

    /// Removes `item`. Returns true if it was a member.
    pub fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.remove(item).is_some()
    }

    /// Removes every listed item. Items that are not members are skipped.
    pub fn delete<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for item in items {
            let item: &T = item.borrow();
            self.data.remove(item);
        }
    }

    // =========================================================================
    // SIZE
    // =========================================================================

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Iterates over the members in unspecified order.
    pub fn iter(&self) -> Keys<'_, T, ()> {
        self.data.keys()
    }

    /// Calls `f` once per member.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for item in self.data.keys() {
            f(item);
        }
    }

    /// Copies the members into a new Vec, unspecified order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.keys().cloned().collect()
    }

    /// The underlying presence map, for use with [`crate::ops`].
    pub fn as_map(&self) -> &HashMap<T, ()> {
        &self.data
    }
}

impl<T> Default for Set<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Set<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|t| (t, ())).collect(),
        }
    }
}

impl<T> Extend<T> for Set<T>
where
    T: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter.into_iter().map(|t| (t, ())));
    }
}

impl<T> IntoIterator for Set<T>
where
    T: Eq + Hash,
{
    type Item = T;
    type IntoIter = IntoKeys<T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_keys()
    }
}

impl<'a, T> IntoIterator for &'a Set<T>
where
    T: Eq + Hash,
{
    type Item = &'a T;
    type IntoIter = Keys<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.keys()
    }
}

impl<T> std::fmt::Debug for Set<T>
where
    T: Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.data.keys()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
