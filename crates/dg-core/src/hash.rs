//! Fast hash map and hash set type aliases.
//!
//! The report pipeline indexes cells by period and column key, and
//! deduplicates category strings. Those keys are short strings and small
//! integers under our own control, so the Fx hash from `rustc-hash` is used
//! instead of the DoS-resistant std hasher.
//!
//! # Examples
//!
//! ```
//! use dg_core::{FxHashMap, fx_hash_map, fx_hash_set};
//!
//! let mut columns: FxHashMap<&str, usize> = fx_hash_map();
//! columns.insert("Invoice", 0);
//!
//! let mut seen = fx_hash_set();
//! assert!(seen.insert("Invoice"));
//! assert!(!seen.insert("Invoice"));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}

/// Creates a new [`FxHashMap`] able to hold `capacity` entries without
/// reallocating.
///
/// # Examples
///
/// ```
/// use dg_core::hash::fx_hash_map_with_capacity;
///
/// let map: dg_core::FxHashMap<String, usize> = fx_hash_map_with_capacity(12);
/// assert!(map.capacity() >= 12);
/// ```
#[inline]
#[must_use]
pub fn fx_hash_map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_map_operations() {
        let mut map: FxHashMap<&str, usize> = fx_hash_map();
        map.insert("Invoice", 0);
        map.insert("Payroll", 1);
        assert_eq!(map.get("Invoice"), Some(&0));
        assert_eq!(map.get("Payroll"), Some(&1));
        assert_eq!(map.get("Receipt"), None);
    }

    #[test]
    fn test_fx_hash_set_operations() {
        let mut set: FxHashSet<&str> = fx_hash_set();
        assert!(set.insert("Invoice"));
        assert!(!set.insert("Invoice"));
        assert!(set.contains("Invoice"));
    }

    #[test]
    fn test_fx_hash_map_with_capacity() {
        let map: FxHashMap<u32, usize> = fx_hash_map_with_capacity(100);
        assert!(map.capacity() >= 100);
    }
}
