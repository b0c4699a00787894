// ============================================================================
// spark-maps - Core Module
// Observer capability and equality functions
// ============================================================================

pub mod equality;
pub mod types;

// Re-export commonly used items
pub use equality::{equals, never_equals, safe_equals_f64};
pub use types::{BoxedObserver, EqualsFn, Observer, ObserverFn};
