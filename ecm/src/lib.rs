// ECM - ecm
// Module: Facade
// SW-REQ-ID: REQ_COMPOSE_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Embedded Class Model (ECM)
//!
//! Class-like structures for resource-constrained systems, built entirely
//! from statically allocated data: single inheritance by embedding, `const`
//! operation tables, interface realizations, set-once associations and
//! ordered event fan-out. A startup routine wires the statics once through a
//! [`CompositionRoot`] and hands it to [`install`], which validates the
//! whole graph. No call may be served before `install` succeeds: bindings
//! made while building a root stay in place even if validation fails.
//!
//! ECM works in `no_std` environments without `alloc`. Capacities come from
//! the platform profile selected by the `embedded-small` and
//! `embedded-medium` features; see [`limits`].
//!
//! ## Crates
//!
//! - [`error`]: error categories, codes and kinds
//! - [`sync`]: spin mutex and set-once cell
//! - [`foundation`]: inline collections, limits and tracing helpers
//! - [`model`]: the object model and composition root
//!
//! ## Example
//!
//! ```rust
//! use ecm::prelude::*;
//!
//! pub struct Pressed;
//!
//! pub struct Counter(core::sync::atomic::AtomicU32);
//! impl Receive<Pressed> for Counter {
//!     fn receive(&self, _event: &Pressed) {
//!         self.0.fetch_add(1, core::sync::atomic::Ordering::SeqCst);
//!     }
//! }
//!
//! static COUNTER: Counter = Counter(core::sync::atomic::AtomicU32::new(0));
//! static PRESSED: Forwarder<Pressed> = Forwarder::new("Button.fan_out");
//! static BUTTON: EventSlot<Pressed> = EventSlot::new("Button.Pressed");
//!
//! let mut root = CompositionRoot::new();
//! root.wire(&PRESSED, &[&COUNTER])?.connect(&BUTTON, &PRESSED)?;
//! install(root)?;
//!
//! BUTTON.send(&Pressed);
//! assert_eq!(COUNTER.0.load(core::sync::atomic::Ordering::SeqCst), 1);
//! # Ok::<(), ecm::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

pub mod prelude;

pub use ecm_error as error;
pub use ecm_error::{Error, ErrorCategory, Result};
pub use ecm_foundation as foundation;
pub use ecm_foundation::limits;
pub use ecm_model as model;
pub use ecm_model::{
    field, inherits, install, installed, AbstractClass, Association, AssociationDecl, Class,
    ClassDecl, ClassDescriptor, CompositionRoot, Declared, Dispatch, Emit, EventDecl, EventSlot,
    FieldDecl, Forwarder, Image, Inherits, InterfaceDecl, Mandatory, Object, OpId, Optional,
    Part, Realization, Receive, Slot, VTable, VarCell, View, Virtual,
};
pub use ecm_sync as sync;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
