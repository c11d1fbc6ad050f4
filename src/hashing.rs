//! This module provides deterministic `HashMap` and `HashSet` variants. The
//! hashing data structures in the standard library are not deterministic:
//!
//! > By default, HashMap uses a hashing algorithm selected to provide
//! > resistance against HashDoS attacks. The algorithm is randomly seeded, and a
//! > reasonable best-effort is made to generate this seed from a high quality,
//! > secure source of randomness provided by the host without blocking the program.
//!
//! Containers in this crate hold plain in-memory state, so we trade HashDoS
//! resistance for speed and reproducible iteration between runs.
//!
//! The standard library `HashMap` has a `new` method, but `HashMap<K, V, S>` does
//! not have a `new` method by default. Use `HashMap::default()` instead to create
//! a new hashmap with the default hasher. If you really need to keep the API the
//! same across implementations, we provide the `HashMapExt` trait extension.
//! Similarly, for `HashSet` and `HashSetExt`. The traits need only be in scope.

use std::hash::Hasher;

use rustc_hash::{FxBuildHasher, FxHasher};

pub use rustc_hash::{FxHashMap, FxHashSet};

pub type HashMap<K, V> = FxHashMap<K, V>;
pub type HashSet<T> = FxHashSet<T>;

pub trait HashMapExt {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
}

impl<K, V> HashMapExt for HashMap<K, V> {
    fn new() -> Self {
        HashMap::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

pub trait HashSetExt {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
}

impl<T> HashSetExt for HashSet<T> {
    fn new() -> Self {
        HashSet::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        HashSet::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_str_is_deterministic() {
        assert_eq!(hash_str("hello"), hash_str("hello"));
        assert_ne!(hash_str("hello"), hash_str("world"));
    }

    #[test]
    fn ext_traits_construct() {
        let mut map: HashMap<&str, u32> = HashMap::new();
        map.insert("a", 1);
        assert_eq!(map.get("a"), Some(&1));

        let mut set: HashSet<u32> = HashSet::with_capacity(8);
        set.insert(3);
        assert!(set.contains(&3));
    }
}
