// ECM - ecm-error
// Module: ECM Error Handling
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! ECM Error handling library
//!
//! Error types for the Embedded Class Model. Every error is detected while
//! classes are defined or while the composition root validates the static
//! object graph; none of them can occur once the graph is serving calls.
//!
//! # Error Categories
//!
//! ## Layout Errors (1000-1999)
//! - Inheritance prefix mismatch
//! - Field order violation
//!
//! ## Composition Errors (2000-2999)
//! - Inheritance cycles
//! - Unknown or duplicate classes and interfaces
//!
//! ## Association Errors (3000-3999)
//! - Unbound mandatory associations, event slots, forwarders
//!
//! ## Dispatch Errors (4000-4999)
//! - Unbound vtable slots
//! - Unrealized interface operations
//!
//! ## Event Errors (5000-5999)
//! - Signature mismatches and empty receiver lists
//!
//! # Usage
//!
//! ```
//! use ecm_error::{kinds::UnboundDispatchError, Error};
//!
//! let error: Error = UnboundDispatchError { class: "Circle", operation: "area" }.into();
//! assert!(error.is_unbound_dispatch());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(any(feature = "std", test))]
extern crate std;

/// Error codes for ecm
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Error kind definitions
pub mod kinds;

pub mod prelude;

// Re-export key types
pub use errors::{Error, ErrorCategory};
pub use kinds::{
    CompositionCycleError, LayoutError, LayoutViolation, SlotKind, UnboundAssociationError,
    UnboundDispatchError,
};

/// A specialized `Result` type for ECM operations.
pub type Result<T> = core::result::Result<T, Error>;
