// ============================================================================
// spark-maps - Equality Functions
// Change filters for ObservableMap writes
// ============================================================================

// =============================================================================
// STRICT EQUALITY
// =============================================================================

/// Strict equality using PartialEq.
///
/// Passed as `ObservableOptions::equals`, it suppresses notifications for
/// writes that store a value equal to the current one.
///
/// # Example
/// ```
/// use spark_maps::core::equality::equals;
///
/// assert!(equals(&42, &42));
/// assert!(!equals(&42, &43));
/// ```
pub fn equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Never considers two values equal, so every write notifies.
///
/// Same behavior as leaving `ObservableOptions::equals` unset.
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

// =============================================================================
// FLOATS
// =============================================================================

/// f64 equality where NaN equals NaN.
///
/// Without this, a map of floats holding NaN would notify on every rewrite of
/// the same NaN.
///
/// # Example
/// ```
/// use spark_maps::core::equality::safe_equals_f64;
///
/// assert!(safe_equals_f64(&f64::NAN, &f64::NAN));
/// assert!(!safe_equals_f64(&f64::NAN, &1.0));
/// assert!(safe_equals_f64(&1.5, &1.5));
/// ```
pub fn safe_equals_f64(a: &f64, b: &f64) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b
}

// =============================================================================
// TESTS
// =============================================================================
