// ECM - ecm-model
// Module: Interfaces
// SW-REQ-ID: REQ_WIRING_002
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Interfaces and their realizations.
//!
//! An interface is a Rust trait with no state of its own. A class realizes
//! it with an `impl`, and each realizing object publishes one
//! [`Realization`]: a `static` table bound to that object, built once at
//! static initialization and never rebound. Associations to the interface
//! point at [`Realization::table`], so any realizing class can be swapped in
//! at composition without the depending class changing.
//!
//! ```
//! use ecm_model::interface::Realization;
//!
//! pub trait Switch: Sync {
//!     fn set(&self, on: bool) -> bool;
//! }
//!
//! pub struct Relay;
//! impl Switch for Relay {
//!     fn set(&self, on: bool) -> bool { on }
//! }
//!
//! static RELAY: Relay = Relay;
//! static RELAY_AS_SWITCH: Realization<dyn Switch> = Realization::new("Switch", "Relay", &RELAY);
//!
//! assert!(RELAY_AS_SWITCH.set(true));
//! ```

use core::{fmt, ops::Deref};

/// One object's published table for one interface
pub struct Realization<I: ?Sized + Sync + 'static> {
    interface: &'static str,
    class:     &'static str,
    table:     &'static I,
}

impl<I: ?Sized + Sync + 'static> Realization<I> {
    /// Publishes `object` as a realization of `interface`.
    #[must_use]
    pub const fn new(interface: &'static str, class: &'static str, object: &'static I) -> Self {
        Self { interface, class, table: object }
    }

    /// Interface name.
    #[must_use]
    pub const fn interface(&self) -> &'static str {
        self.interface
    }

    /// Name of the realizing class.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    /// The table, bound to the realizing object.
    #[must_use]
    pub const fn table(&self) -> &'static I {
        self.table
    }
}

impl<I: ?Sized + Sync + 'static> Deref for Realization<I> {
    type Target = I;

    fn deref(&self) -> &I {
        self.table
    }
}

impl<I: ?Sized + Sync + 'static> fmt::Debug for Realization<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Realization")
            .field("interface", &self.interface)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Type-erased view of a realization, checked by the composition root
/// against the realizing class's declaration.
pub trait RealizationInfo: Sync {
    /// Interface name.
    fn interface(&self) -> &'static str;

    /// Name of the realizing class.
    fn class(&self) -> &'static str;
}

impl<I: ?Sized + Sync + 'static> RealizationInfo for Realization<I> {
    fn interface(&self) -> &'static str {
        self.interface
    }

    fn class(&self) -> &'static str {
        self.class
    }
}
