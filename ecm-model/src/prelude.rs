// ECM - ecm-model
// Module: Prelude
// SW-REQ-ID: REQ_DECL_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for ecm-model
//!
//! Everything a startup routine and its classes usually need, behind one
//! glob import.

pub use ecm_error::{Error, ErrorCategory, Result};

pub use crate::{
    association::{Association, Mandatory, Optional, Slot},
    decl::{AssociationDecl, ClassDecl, Declared, EventDecl, InterfaceDecl},
    event::{Emit, EventSlot, Forwarder, Receive},
    inherit::{Class, Derived, Inherits},
    inherits,
    interface::{Realization, RealizationInfo},
    layout::{field, ClassDescriptor, FieldDecl, Part},
    object::{Object, VarCell, View},
    root::{install, installed, CompositionRoot, Image},
    vtable::{AbstractClass, Dispatch, DispatchTable, OpId, VTable, Virtual},
};
