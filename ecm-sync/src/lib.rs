#![no_std]
#![doc = "no_std synchronization primitives (spin mutex, set-once cell) for the ECM project."]
#![warn(clippy::missing_panics_doc)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod mutex;
pub mod once;
pub mod prelude;

pub use mutex::*;
pub use once::*;
