// ECM - ecm-sync
// Module: EcmMutex - spinlock mutex
// SW-REQ-ID: REQ_CONCURRENCY_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A minimal spinlock mutex for `no_std` targets.

use crate::prelude::{fmt, spin_loop, AtomicBool, Deref, DerefMut, Ordering, UnsafeCell};

/// A simple, non-reentrant spinlock mutex suitable for `no_std` environments.
///
/// `lock` spins until the lock is free. `try_lock` never waits and is what
/// single-writer state uses: in the object model, contention on an object's
/// variable part means callers broke the serialization contract.
pub struct EcmMutex<T: ?Sized> {
    locked: AtomicBool,
    data:   UnsafeCell<T>,
}

/// A guard that provides mutable access to the data protected by an
/// `EcmMutex`.
///
/// When the guard is dropped, the mutex is unlocked.
#[clippy::has_significant_drop]
pub struct EcmMutexGuard<'a, T: ?Sized + 'a> {
    mutex: &'a EcmMutex<T>,
}

/// # Safety
/// Access to the `UnsafeCell` data is protected by the atomic `locked` flag,
/// so only one context can reach the data at a time (if `T` is `Send`).
unsafe impl<T: ?Sized + Send> Send for EcmMutex<T> {}
/// # Safety
/// All accesses to the data go through a guard obtained by winning the
/// `locked` flag, which serializes them.
unsafe impl<T: ?Sized + Send> Sync for EcmMutex<T> {}

impl<T> EcmMutex<T> {
    /// Creates a new `EcmMutex` protecting the given data.
    #[inline]
    pub const fn new(data: T) -> Self {
        EcmMutex { locked: AtomicBool::new(false), data: UnsafeCell::new(data) }
    }

    /// Consumes the mutex and returns the protected data.
    #[inline]
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> EcmMutex<T> {
    /// Acquires the lock, spinning until it is available.
    #[inline]
    pub fn lock(&self) -> EcmMutexGuard<'_, T> {
        // Acquire on success orders later data reads after the lock.
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            spin_loop();
        }
        EcmMutexGuard { mutex: self }
    }

    /// Attempts to acquire the lock without waiting.
    ///
    /// Returns `None` if the lock is currently held.
    #[inline]
    pub fn try_lock(&self) -> Option<EcmMutexGuard<'_, T>> {
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(EcmMutexGuard { mutex: self })
        } else {
            None
        }
    }

    /// Returns `true` if the lock is currently held.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// Mutable access without locking; `&mut self` proves exclusivity.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for EcmMutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_lock() {
            Some(guard) => f.debug_struct("EcmMutex").field("data", &&*guard).finish(),
            None => f.debug_struct("EcmMutex").field("data", &"<locked>").finish(),
        }
    }
}

impl<T: ?Sized> Deref for EcmMutexGuard<'_, T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &Self::Target {
        // # Safety
        // A guard only exists while the associated mutex is locked, which
        // grants exclusive access to the data.
        unsafe { &*self.mutex.data.get() }
    }
}

impl<T: ?Sized> DerefMut for EcmMutexGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        // # Safety
        // A guard only exists while the associated mutex is locked, which
        // grants exclusive access to the data.
        unsafe { &mut *self.mutex.data.get() }
    }
}

impl<T: ?Sized> Drop for EcmMutexGuard<'_, T> {
    /// Releases the lock when the guard goes out of scope.
    #[inline]
    fn drop(&mut self) {
        // Release makes writes made under the guard visible to the next owner.
        self.mutex.locked.store(false, Ordering::Release);
    }
}
