// ECM - ecm-error
// Module: ECM Error Prelude
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for ecm-error
//!
//! Re-exports the error types and kind constructors so dependent crates can
//! pull them in with a single glob import.

pub use crate::{
    codes,
    kinds::{
        association_already_bound_error, duplicate_class_error, duplicate_interface_error,
        empty_receiver_list_error, event_signature_mismatch_error, unknown_operation_error,
        unknown_parent_error, unknown_target_error, unrealized_operation_error,
        CompositionCycleError, LayoutError, LayoutViolation, SlotKind, UnboundAssociationError,
        UnboundDispatchError,
    },
    Error, ErrorCategory, Result,
};
