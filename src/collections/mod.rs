// ============================================================================
// spark-maps - Collections
// Set, SyncMap and ObservableMap
// ============================================================================
//
// Three layers, each built on the one before:
//
// 1. Set: a HashMap<T, ()> with no locking
// 2. SyncMap: a HashMap behind one reader-writer lock
// 3. ObservableMap: a SyncMap whose writes and deletes notify observers
//    inside the write lock
// ============================================================================

mod observable;
mod scope;
mod set;
mod sync;

pub use observable::{reduce_observable, ObservableMap, ObservableOptions};
pub use scope::{ReadScope, WriteScope};
pub use set::Set;
pub use sync::{reduce_sync, SyncMap};
