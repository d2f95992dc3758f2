//! Prelude module for ecm-sync
//!
//! Core imports shared by the primitives in this crate.

pub use core::{
    cell::UnsafeCell,
    fmt,
    fmt::Debug,
    hint::spin_loop,
    mem::MaybeUninit,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicBool, Ordering},
};

pub use crate::{EcmMutex as Mutex, EcmOnce as Once};
