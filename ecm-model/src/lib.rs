// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)] // Rule 2

//! Static, heap-free object model for the Embedded Class Model (ECM).
//!
//! Classes, single inheritance, virtual dispatch, interface realization,
//! associations and event callbacks, all built from statically allocated
//! data that a startup routine wires once and a composition root validates
//! once.
//!
//! ## Features
//!
//! - Layout descriptors with size-descending fields and prefix inheritance
//! - Typed inheritance by embedding, with base-typed views of an object
//! - `const` operation tables and a [`Dispatch`] trait for abstract code
//! - Set-once associations and ordered, synchronous event fan-out
//! - One-shot validation of the whole object graph
//!
//! ## Usage
//!
//! ```rust
//! use ecm_model::prelude::*;
//!
//! pub trait Gpio: Sync {
//!     fn write(&self, pin: u8, high: bool);
//! }
//!
//! pub struct Port;
//! impl Gpio for Port {
//!     fn write(&self, _pin: u8, _high: bool) {}
//! }
//!
//! pub struct Led {
//!     pin:  u8,
//!     port: Association<dyn Gpio>,
//! }
//!
//! static PORT: Port = Port;
//! static LED: Led = Led { pin: 3, port: Association::mandatory("Led.port") };
//!
//! let mut root = CompositionRoot::new();
//! root.bind(&LED.port, &PORT)?;
//! let image = root.compose()?;
//! assert_eq!(image.slot_count(), 1);
//!
//! LED.port.get().write(LED.pin, true);
//! # Ok::<(), ecm_error::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::missing_panics_doc)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod association;
pub mod decl;
pub mod event;
pub mod inherit;
pub mod interface;
pub mod layout;
pub mod object;
pub mod prelude;
pub mod registry;
pub mod root;
pub mod vtable;

pub use association::{Association, Mandatory, Optional, Slot};
pub use decl::{AssociationDecl, ClassDecl, Declared, EventDecl, InterfaceDecl};
pub use event::{Emit, EventSlot, Forwarder, Receive};
pub use inherit::{Class, Inherits};
pub use interface::Realization;
pub use layout::{field, ClassDescriptor, FieldDecl, Part};
pub use object::{Object, VarCell, View};
pub use root::{install, installed, CompositionRoot, Image};
pub use vtable::{AbstractClass, Dispatch, OpId, VTable, Virtual};
