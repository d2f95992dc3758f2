//! Foundation types for the Embedded Class Model (ECM).
//!
//! Fixed-capacity inline collections, platform limits and tracing helpers
//! shared by the object model. Everything works without `alloc`:
//! - `std`: standard library support for host tests
//! - Default: pure `no_std` without allocation
//!
//! # Feature Flags
//!
//! - `tracing`: structured spans and events through the `tracing` crate
//! - `embedded-small` / `embedded-medium`: platform profiles for [`limits`]

// ECM - ecm-foundation
// SW-REQ-ID: REQ_MEM_SAFETY_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub use ecm_error::{codes, Error, ErrorCategory, Result};

/// Inline-storage collections
pub mod collections {
    mod static_map;
    mod static_vec;

    pub use static_map::StaticMap;
    pub use static_vec::StaticVec;
}

/// Compile-time capacity limits per platform profile
pub mod limits;

/// Structured tracing helpers
#[cfg(feature = "tracing")]
pub mod tracing;

/// Emit a tracing event; no-op without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_event {
    ($($arg:tt)*) => {{}};
}

/// Enter a span for the rest of the scope; no-op without the `tracing`
/// feature.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! enter_span {
    ($($arg:tt)*) => {};
}

pub use collections::{StaticMap, StaticVec};
