// ECM - ecm-sync
// Module: EcmOnce - a one-time initialization primitive
// SW-REQ-ID: REQ_CONCURRENCY_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A cell that can be written at most once.
//!
//! `EcmOnce<T>` backs every late-bound slot of the object model: an
//! association or event slot starts empty inside a `static`, is written once
//! by the composition root, and is read without locking afterwards.

use crate::{
    mutex::EcmMutex,
    prelude::{fmt, AtomicBool, MaybeUninit, Ordering, UnsafeCell},
};

/// A synchronization primitive which can be written to only once.
///
/// Analogous to `std::sync::OnceLock`, usable in `const` contexts and
/// without `std`.
///
/// # Safety
/// The value lives in an `UnsafeCell<MaybeUninit<T>>`. The mutex ensures a
/// single writer; `initialized` is published with `Release` after the write
/// and read with `Acquire`, after which the data is only shared immutably.
pub struct EcmOnce<T> {
    mutex:       EcmMutex<()>,
    data:        UnsafeCell<MaybeUninit<T>>,
    initialized: AtomicBool,
}

/// # Safety
/// `T` may be moved into the cell from another context during
/// initialization, hence `T: Send`.
unsafe impl<T: Send> Send for EcmOnce<T> {}

/// # Safety
/// After initialization `&T` is handed out to every context (`T: Sync`);
/// the writing context may differ from the owning one (`T: Send`).
unsafe impl<T: Send + Sync> Sync for EcmOnce<T> {}

impl<T> EcmOnce<T> {
    /// Creates a new, empty `EcmOnce`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mutex:       EcmMutex::new(()),
            data:        UnsafeCell::new(MaybeUninit::uninit()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Gets the reference to the underlying value, initializing it if
    /// necessary.
    ///
    /// If several contexts race, only one runs `f`; the others spin until it
    /// finishes. Calling `get_or_init` on the same cell from inside `f`
    /// spins forever.
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get() {
            return value;
        }

        let _guard = self.mutex.lock();
        if !self.initialized.load(Ordering::Relaxed) {
            // # Safety
            // The mutex is held and `initialized` is false, so no reader can
            // observe the slot and no other writer exists.
            unsafe {
                (*self.data.get()).write(f());
            }
            self.initialized.store(true, Ordering::Release);
        }

        // # Safety
        // `initialized` is true: either we wrote the value above or another
        // context did before releasing the mutex we now hold.
        unsafe { self.get_unchecked() }
    }

    /// Stores `value` if the cell is empty.
    ///
    /// Returns the value back as `Err` if the cell was already written; the
    /// stored value is never replaced.
    pub fn set(&self, value: T) -> Result<(), T> {
        if self.is_initialized() {
            return Err(value);
        }

        let _guard = self.mutex.lock();
        if self.initialized.load(Ordering::Relaxed) {
            return Err(value);
        }
        // # Safety
        // Same argument as in `get_or_init`: exclusive writer under the mutex,
        // slot not yet published.
        unsafe {
            (*self.data.get()).write(value);
        }
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Gets a reference to the underlying value if it is initialized.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        if self.initialized.load(Ordering::Acquire) {
            // # Safety
            // The Acquire load synchronizes with the Release store made after
            // the value was written.
            Some(unsafe { self.get_unchecked() })
        } else {
            None
        }
    }

    /// Returns `true` once a value has been stored.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// # Safety
    ///
    /// Caller must ensure that the cell has been initialized.
    #[inline]
    unsafe fn get_unchecked(&self) -> &T {
        // # Safety
        // Guaranteed by the caller.
        unsafe { (*self.data.get()).assume_init_ref() }
    }
}

impl<T> Default for EcmOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for EcmOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(v) => f.debug_struct("EcmOnce").field("data", v).finish(),
            None => f.debug_struct("EcmOnce").field("data", &"<uninitialized>").finish(),
        }
    }
}

impl<T> Drop for EcmOnce<T> {
    fn drop(&mut self) {
        if *self.initialized.get_mut() {
            // # Safety
            // `&mut self` gives exclusive access and the flag says the slot
            // holds a value.
            unsafe {
                self.data.get_mut().assume_init_drop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread, vec::Vec};

    use super::*;

    #[test]
    fn test_get_before_init_is_none() {
        let once: EcmOnce<u32> = EcmOnce::new();
        assert!(once.get().is_none());
        assert!(!once.is_initialized());
    }

    #[test]
    fn test_get_or_init_runs_once() {
        let once = EcmOnce::new();
        assert_eq!(*once.get_or_init(|| 7), 7);
        assert_eq!(*once.get_or_init(|| 9), 7);
    }

    #[test]
    fn test_set_never_replaces() {
        let once = EcmOnce::new();
        assert_eq!(once.set(1), Ok(()));
        assert_eq!(once.set(2), Err(2));
        assert_eq!(once.get(), Some(&1));
    }

    #[test]
    fn test_static_cell() {
        static CELL: EcmOnce<&'static str> = EcmOnce::new();
        assert!(CELL.set("bound").is_ok());
        assert_eq!(CELL.get(), Some(&"bound"));
    }

    #[test]
    fn test_concurrent_set_has_single_winner() {
        let once = Arc::new(EcmOnce::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let once = Arc::clone(&once);
                thread::spawn(move || once.set(i).is_ok())
            })
            .collect();
        let winners = handles.into_iter().map(|h| h.join().unwrap()).filter(|won| *won).count();
        assert_eq!(winners, 1);
        assert!(once.get().is_some());
    }
}
