// ECM - ecm-foundation
// Module: StaticMap - Inline-storage sorted map
// SW-REQ-ID: REQ_RESOURCE_001, REQ_MEM_SAFETY_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Name-keyed map with inline storage.
//!
//! `StaticMap<K, V, N>` is a [`StaticVec`] of entries kept sorted by key, so
//! lookups are binary searches and iteration is in key order. The class
//! registry keys it by class and interface name, which makes composition
//! results independent of declaration order.
//!
//! ```
//! use ecm_foundation::collections::StaticMap;
//!
//! let mut classes = StaticMap::<&str, usize, 4>::new();
//! classes.insert("Shape", 0)?;
//! classes.insert("Circle", 1)?;
//!
//! assert_eq!(classes.get(&"Circle"), Some(&1));
//! assert_eq!(classes.keys().copied().collect::<Vec<_>>(), ["Circle", "Shape"]);
//! # Ok::<(), ecm_error::Error>(())
//! ```

use core::fmt;

use ecm_error::Result;

use super::StaticVec;

/// Sorted key-value map with compile-time capacity
pub struct StaticMap<K: Ord, V, const N: usize> {
    // sorted by key, no duplicates
    entries: StaticVec<(K, V), N>,
}

impl<K: Ord, V, const N: usize> StaticMap<K, V, N> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: StaticVec::new() }
    }

    /// Inserts `value` under `key`, returning the previous value if the key
    /// was present.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the key is new and the map is full.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        match self.position(&key) {
            Ok(index) => {
                let slot = &mut self.entries.as_mut_slice()[index].1;
                Ok(Some(core::mem::replace(slot, value)))
            },
            Err(index) => {
                self.entries.insert(index, (key, value))?;
                Ok(None)
            },
        }
    }

    /// Value stored under `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.position(key).ok()?;
        self.entries.get(index).map(|(_, v)| v)
    }

    /// Mutable value stored under `key`.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.position(key).ok()?;
        self.entries.as_mut_slice().get_mut(index).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_ok()
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn position(&self, key: &K) -> core::result::Result<usize, usize> {
        self.entries.as_slice().binary_search_by(|(k, _)| k.cmp(key))
    }
}

impl<K: Ord, V, const N: usize> Default for StaticMap<K, V, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug, const N: usize> fmt::Debug for StaticMap<K, V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_stay_sorted() {
        let mut map = StaticMap::<&str, u8, 8>::new();
        map.insert("Square", 2).unwrap();
        map.insert("Circle", 1).unwrap();
        map.insert("Shape", 0).unwrap();
        let keys: std::vec::Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["Circle", "Shape", "Square"]);
        assert_eq!(map.values().copied().collect::<std::vec::Vec<_>>(), [1, 0, 2]);
    }

    #[test]
    fn test_insert_existing_key_replaces() {
        let mut map = StaticMap::<u32, &str, 2>::new();
        assert_eq!(map.insert(1, "a").unwrap(), None);
        assert_eq!(map.insert(1, "b").unwrap(), Some("a"));
        assert_eq!(map.get(&1), Some(&"b"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_full_map_rejects_new_keys_only() {
        let mut map = StaticMap::<u32, u32, 2>::new();
        map.insert(1, 1).unwrap();
        map.insert(2, 2).unwrap();
        assert!(map.insert(3, 3).unwrap_err().is_capacity_error());
        assert_eq!(map.insert(2, 20).unwrap(), Some(2));
        assert!(!map.contains_key(&3));
    }

    #[test]
    fn test_get_mut() {
        let mut map = StaticMap::<u32, u32, 4>::new();
        map.insert(7, 1).unwrap();
        if let Some(v) = map.get_mut(&7) {
            *v += 1;
        }
        assert_eq!(map.get(&7), Some(&2));
        assert!(map.get_mut(&8).is_none());
    }
}
