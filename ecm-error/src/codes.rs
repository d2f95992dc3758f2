// ECM - ecm-error
// Module: ECM Error Codes
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for ECM

// Layout error codes (1000-1999)
/// Derived part does not begin with an exact copy of its parent's part
pub const PREFIX_MISMATCH: u16 = 1000;
/// Fields within a part are not ordered descending by storage size
pub const FIELD_ORDER_VIOLATION: u16 = 1001;
/// Field name not present in a class layout
pub const FIELD_NOT_FOUND: u16 = 1002;
/// Field declared twice within one class
pub const DUPLICATE_FIELD: u16 = 1003;
/// Field declared with an alignment that is zero or not a power of two
pub const INVALID_ALIGNMENT: u16 = 1004;
/// Declared layout size differs from the Rust type's size
pub const DECLARED_SIZE_MISMATCH: u16 = 1005;

// Composition error codes (2000-2999)
/// Inheritance graph contains a cycle
pub const COMPOSITION_CYCLE: u16 = 2000;
/// Class declared twice
pub const DUPLICATE_CLASS: u16 = 2001;
/// Parent class not declared
pub const UNKNOWN_PARENT: u16 = 2002;
/// Association or realization targets an undeclared class or interface
pub const UNKNOWN_TARGET: u16 = 2003;
/// Composition root already produced an image
pub const ALREADY_COMPOSED: u16 = 2004;
/// Interface declared twice
pub const DUPLICATE_INTERFACE: u16 = 2005;

// Association error codes (3000-3999)
/// Mandatory association left unbound at composition
pub const UNBOUND_ASSOCIATION: u16 = 3000;
/// Association bound more than once
pub const ASSOCIATION_ALREADY_BOUND: u16 = 3001;
/// Event slot not wired to a forwarder at composition
pub const UNBOUND_EVENT_SLOT: u16 = 3002;
/// Forwarder has no receiver list at composition
pub const UNWIRED_FORWARDER: u16 = 3003;

// Dispatch error codes (4000-4999)
/// Concrete class leaves an abstract operation without implementation
pub const UNBOUND_DISPATCH: u16 = 4000;
/// Operation name not part of the dispatch contract
pub const UNKNOWN_OPERATION: u16 = 4001;
/// Realized interface operation not implemented
pub const UNREALIZED_INTERFACE_OPERATION: u16 = 4002;

// Event error codes (5000-5999)
/// Received event signature differs from the sent signature
pub const EVENT_SIGNATURE_MISMATCH: u16 = 5000;
/// Forwarder wired with an empty receiver list
pub const EMPTY_RECEIVER_LIST: u16 = 5001;

// Capacity error codes (6000-6999)
/// Bounded collection capacity exceeded
pub const CAPACITY_EXCEEDED: u16 = 6000;
