// ECM - ecm-foundation
// Module: StaticVec - Inline-storage vector
// SW-REQ-ID: REQ_RESOURCE_001, REQ_MEM_SAFETY_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

// MaybeUninit storage, every access documented below
#![allow(unsafe_code)]

//! Fixed-capacity vector with inline storage.
//!
//! `StaticVec<T, N>` keeps insertion order, which the object model relies on
//! for field lists and event receiver lists.
//!
//! # Characteristics
//!
//! - **Zero allocation**: storage is an inline array
//! - **O(1) push/pop**
//! - **Deterministic failure**: pushing into a full vector returns an error

use core::{fmt, mem::MaybeUninit, slice};

use ecm_error::{Error, Result};

/// A vector with compile-time capacity and inline storage.
///
/// # Invariants
///
/// 1. `len <= N` always holds
/// 2. Elements `[0..len)` are initialized
pub struct StaticVec<T, const N: usize> {
    items: [MaybeUninit<T>; N],
    len:   usize,
}

impl<T, const N: usize> StaticVec<T, N> {
    /// Creates a new empty vector.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { items: [const { MaybeUninit::uninit() }; N], len: 0 }
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the vector is full; the element is dropped.
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len >= N {
            return Err(Error::capacity_exceeded("StaticVec capacity exceeded"));
        }
        self.items[self.len].write(value);
        self.len += 1;
        Ok(())
    }

    /// Inserts an element at `index`, shifting later elements right. An
    /// index past the end appends.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the vector is full.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.push(value)?;
        if let Some(tail) = self.as_mut_slice().get_mut(index..) {
            tail.rotate_right(1);
        }
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: index was < len before the decrement, so it is initialized,
        // and it is now outside [0..len) so it will not be read again.
        Some(unsafe { self.items[self.len].assume_init_read() })
    }

    /// Returns a reference to the element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the initialized elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: elements [0..len) are initialized and MaybeUninit<T> has
        // the same layout as T.
        unsafe { slice::from_raw_parts(self.items.as_ptr().cast::<T>(), self.len) }
    }

    /// Returns the initialized elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`; `&mut self` grants exclusive access.
        unsafe { slice::from_raw_parts_mut(self.items.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Returns an iterator over the elements in insertion order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the current number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the compile-time capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` if the vector is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the vector is full.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Drops all elements.
    pub fn clear(&mut self) {
        let len = self.len;
        // Reset first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        for item in &mut self.items[..len] {
            // SAFETY: items [0..len) were initialized.
            unsafe { item.assume_init_drop() };
        }
    }
}

impl<T: Clone, const N: usize> StaticVec<T, N> {
    /// Builds a vector from a slice.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if `values` is longer than `N`.
    pub fn from_slice(values: &[T]) -> Result<Self> {
        let mut vec = Self::new();
        for value in values {
            vec.push(value.clone())?;
        }
        Ok(vec)
    }
}

impl<T: PartialEq, const N: usize> StaticVec<T, N> {
    /// Returns `true` if the vector contains `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }
}

impl<T, const N: usize> Default for StaticVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for StaticVec<T, N> {
    fn clone(&self) -> Self {
        let mut vec = Self::new();
        for value in self.iter() {
            // Cannot fail: same capacity, at most N elements.
            vec.items[vec.len].write(value.clone());
            vec.len += 1;
        }
        vec
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StaticVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for StaticVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for StaticVec<T, N> {}

impl<'a, T, const N: usize> IntoIterator for &'a StaticVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const N: usize> Drop for StaticVec<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut vec = StaticVec::<u32, 4>::new();
        vec.push(1).unwrap();
        vec.push(2).unwrap();
        vec.push(3).unwrap();
        assert_eq!(vec.as_slice(), &[1, 2, 3]);
        assert_eq!(vec.pop(), Some(3));
        assert_eq!(vec.len(), 2);
    }

    #[test]
    fn test_insert_shifts_right() {
        let mut vec = StaticVec::<u32, 4>::new();
        vec.push(1).unwrap();
        vec.push(3).unwrap();
        vec.insert(1, 2).unwrap();
        vec.insert(0, 0).unwrap();
        assert_eq!(vec.as_slice(), &[0, 1, 2, 3]);
        assert!(vec.insert(2, 9).unwrap_err().is_capacity_error());
        assert_eq!(vec.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut vec = StaticVec::<u8, 2>::new();
        assert!(vec.push(1).is_ok());
        assert!(vec.push(2).is_ok());
        let err = vec.push(3).unwrap_err();
        assert!(err.is_capacity_error());
        assert!(vec.is_full());
    }

    #[test]
    fn test_from_slice_and_clone() {
        let vec = StaticVec::<&str, 3>::from_slice(&["a", "b"]).unwrap();
        let copy = vec.clone();
        assert_eq!(vec, copy);
        assert!(copy.contains(&"b"));
        assert!(StaticVec::<&str, 1>::from_slice(&["a", "b"]).is_err());
    }

    #[test]
    fn test_drops_elements() {
        use std::rc::Rc;
        let marker = Rc::new(());
        {
            let mut vec = StaticVec::<Rc<()>, 3>::new();
            vec.push(Rc::clone(&marker)).unwrap();
            vec.push(Rc::clone(&marker)).unwrap();
            assert_eq!(Rc::strong_count(&marker), 3);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
