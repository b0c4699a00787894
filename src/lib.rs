// ============================================================================
// spark-maps - Generic In-Memory Maps for Rust
// ============================================================================
//
// Four building blocks, leaf first:
//
// - ops: stateless helpers over plain HashMaps
// - Set: a HashMap<T, ()> with no locking
// - SyncMap: a HashMap behind one reader-writer lock, with scoped locking
// - ObservableMap: a SyncMap that notifies observers inside the write lock
// ============================================================================

pub mod collections;
pub mod core;
pub mod ops;

mod macros;

// Re-export core items at crate root for ergonomic access
pub use crate::core::equality::{equals, never_equals, safe_equals_f64};
pub use crate::core::types::{BoxedObserver, EqualsFn, Observer, ObserverFn};

// Re-export collections
pub use collections::{
    reduce_observable, reduce_sync, ObservableMap, ObservableOptions, ReadScope, Set, SyncMap,
    WriteScope,
};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[test]
    fn sync_map_scenario() {
        let map: SyncMap<String, i32> = SyncMap::new();
        map.set("a".to_string(), 1);
        map.set("b".to_string(), 2);

        let mut keys = map.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), 1);

        map.delete(["a".to_string()]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), 0);
    }

    #[test]
    fn observable_map_scenario() {
        let map: ObservableMap<String, i32> = ObservableMap::new();
        let triples = Arc::new(Mutex::new(Vec::new()));

        let sink = triples.clone();
        map.observe(move |k: &String, new: &i32, old: &i32| {
            sink.lock().unwrap().push((k.clone(), *new, *old));
        });

        map.set("x".to_string(), 10);
        assert_eq!(triples.lock().unwrap().last(), Some(&("x".to_string(), 10, 0)));

        map.set("x".to_string(), 20);
        assert_eq!(triples.lock().unwrap().last(), Some(&("x".to_string(), 20, 10)));

        map.delete(["x".to_string()]);
        assert_eq!(triples.lock().unwrap().last(), Some(&("x".to_string(), 0, 20)));
    }

    #[test]
    fn layers_compose() {
        // Set members feed a SyncMap, whose snapshot feeds the plain helpers.
        let members = crate::set!["ada", "grace", "linus"];
        let ages: SyncMap<&str, u32> = SyncMap::new();
        members.each(|name| ages.set(name, name.len() as u32));

        let snapshot: HashMap<&str, u32> = ages.filter(|_, _| true);
        assert_eq!(ops::reduce(&snapshot, 0, |acc, _, v| acc + v), 3 + 5 + 5);
        assert_eq!(ops::find(&snapshot, |k, _| *k == "grace"), ("grace", 5));
    }

    #[test]
    fn macros_build_containers() {
        let empty: Set<u8> = crate::set![];
        assert!(empty.is_empty());

        let m = crate::sync_map! { "k" => 1, "j" => 2, };
        assert_eq!(m.len(), 2);

        let o: ObservableMap<u8, &str> = crate::observable_map! {};
        assert!(o.is_empty());
    }
}
