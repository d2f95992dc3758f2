// ECM - ecm-error
// Module: ECM Error Kinds
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error kinds raised while defining classes and composing the object graph.
//!
//! Each kind is a small value naming the item at fault. Kinds convert into
//! [`Error`] with `?`, keeping the names as subject and detail.

use core::fmt::{self, Display};

use crate::{codes, Error, ErrorCategory};

/// Which layout rule a class violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutViolation {
    /// A part does not begin with an exact copy of the parent's part
    PrefixMismatch,
    /// Fields are not ordered descending by storage size
    FieldOrder,
    /// Same field name declared twice in one class
    DuplicateField,
    /// Alignment is zero or not a power of two
    InvalidAlignment,
    /// Declared fields do not add up to the Rust type's size or alignment
    SizeMismatch,
}

impl LayoutViolation {
    const fn code(self) -> u16 {
        match self {
            Self::PrefixMismatch => codes::PREFIX_MISMATCH,
            Self::FieldOrder => codes::FIELD_ORDER_VIOLATION,
            Self::DuplicateField => codes::DUPLICATE_FIELD,
            Self::InvalidAlignment => codes::INVALID_ALIGNMENT,
            Self::SizeMismatch => codes::DECLARED_SIZE_MISMATCH,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::PrefixMismatch => "Derived part does not begin with its parent's part",
            Self::FieldOrder => "Fields not ordered descending by size",
            Self::DuplicateField => "Field declared twice",
            Self::InvalidAlignment => "Field alignment is not a power of two",
            Self::SizeMismatch => "Declared layout differs from the Rust type",
        }
    }
}

/// A derived class's layout breaks a layout rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutError {
    /// Class being defined
    pub class:     &'static str,
    /// Field at which the violation was detected
    pub field:     &'static str,
    /// Rule that was violated
    pub violation: LayoutViolation,
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in class {} at field {}", self.violation.message(), self.class, self.field)
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::new(ErrorCategory::Layout, e.violation.code(), e.violation.message())
            .with_subject(e.class)
            .with_detail(e.field)
    }
}

/// The inheritance graph contains a cycle through `class`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionCycleError {
    /// A class on the cycle
    pub class: &'static str,
}

impl Display for CompositionCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inheritance cycle through class {}", self.class)
    }
}

impl From<CompositionCycleError> for Error {
    fn from(e: CompositionCycleError) -> Self {
        Error::composition_error(codes::COMPOSITION_CYCLE, "Inheritance graph contains a cycle")
            .with_subject(e.class)
    }
}

/// Kind of late-bound slot found unbound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Mandatory association
    Association,
    /// Sender's event callback slot
    EventSlot,
    /// Per-object event forwarder
    Forwarder,
}

impl SlotKind {
    /// Short lowercase name, used in log output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Association => "association",
            Self::EventSlot => "event-slot",
            Self::Forwarder => "forwarder",
        }
    }
}

/// A mandatory association, event slot or forwarder was left unbound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnboundAssociationError {
    /// Qualified slot name, e.g. `"Led.driver"`
    pub slot: &'static str,
    /// Slot kind
    pub kind: SlotKind,
}

impl Display for UnboundAssociationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unbound {} {}", self.kind.as_str(), self.slot)
    }
}

impl From<UnboundAssociationError> for Error {
    fn from(e: UnboundAssociationError) -> Self {
        unbound_slot_base(e.kind).with_subject(e.slot)
    }
}

const fn unbound_slot_base(kind: SlotKind) -> Error {
    let (code, message) = match kind {
        SlotKind::Association => (codes::UNBOUND_ASSOCIATION, "Mandatory association left unbound"),
        SlotKind::EventSlot => (codes::UNBOUND_EVENT_SLOT, "Event slot not wired"),
        SlotKind::Forwarder => (codes::UNWIRED_FORWARDER, "Forwarder has no receivers"),
    };
    Error::new(ErrorCategory::Association, code, message)
}

/// A concrete class's table leaves an operation without implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnboundDispatchError {
    /// Concrete class owning the table
    pub class:     &'static str,
    /// Operation whose slot is empty
    pub operation: &'static str,
}

impl Display for UnboundDispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class {} leaves operation {} unbound", self.class, self.operation)
    }
}

impl From<UnboundDispatchError> for Error {
    fn from(e: UnboundDispatchError) -> Self {
        Error::new(
            ErrorCategory::Dispatch,
            codes::UNBOUND_DISPATCH,
            "Operation slot left unbound",
        )
        .with_subject(e.class)
        .with_detail(e.operation)
    }
}

/// Create an error for a class declared twice
#[must_use]
pub const fn duplicate_class_error(class: &'static str) -> Error {
    Error::composition_error(codes::DUPLICATE_CLASS, "Class declared twice").with_subject(class)
}

/// Create an error for an interface declared twice
#[must_use]
pub const fn duplicate_interface_error(interface: &'static str) -> Error {
    Error::composition_error(codes::DUPLICATE_INTERFACE, "Interface declared twice")
        .with_subject(interface)
}

/// Create an error for a parent name that does not resolve
#[must_use]
pub const fn unknown_parent_error(class: &'static str, parent: &'static str) -> Error {
    Error::composition_error(codes::UNKNOWN_PARENT, "Parent class not declared")
        .with_subject(class)
        .with_detail(parent)
}

/// Create an error for an association or realization target that does not
/// resolve
#[must_use]
pub const fn unknown_target_error(class: &'static str, target: &'static str) -> Error {
    Error::composition_error(codes::UNKNOWN_TARGET, "Target class or interface not declared")
        .with_subject(class)
        .with_detail(target)
}

/// Create an error for a declared association or sent event that no bound
/// slot of `class` carries
#[must_use]
pub const fn undeclared_slot_error(
    class: &'static str,
    member: &'static str,
    kind: SlotKind,
) -> Error {
    unbound_slot_base(kind).with_subject(class).with_detail(member)
}

/// Create an error for an association bound a second time
#[must_use]
pub const fn association_already_bound_error(slot: &'static str) -> Error {
    Error::new(
        ErrorCategory::Association,
        codes::ASSOCIATION_ALREADY_BOUND,
        "Association already bound",
    )
    .with_subject(slot)
}

/// Create an error for a realized interface operation without implementation
#[must_use]
pub const fn unrealized_operation_error(class: &'static str, operation: &'static str) -> Error {
    Error::new(
        ErrorCategory::Dispatch,
        codes::UNREALIZED_INTERFACE_OPERATION,
        "Realized interface operation not implemented",
    )
    .with_subject(class)
    .with_detail(operation)
}

/// Create an error for an operation name outside a dispatch contract
#[must_use]
pub const fn unknown_operation_error(contract: &'static str, operation: &'static str) -> Error {
    Error::new(
        ErrorCategory::Dispatch,
        codes::UNKNOWN_OPERATION,
        "Operation not part of the contract",
    )
    .with_subject(contract)
    .with_detail(operation)
}

/// Create an error for a received event whose parameters differ from the
/// sender's
#[must_use]
pub const fn event_signature_mismatch_error(class: &'static str, event: &'static str) -> Error {
    Error::new(
        ErrorCategory::Event,
        codes::EVENT_SIGNATURE_MISMATCH,
        "Event parameters differ between sender and receiver",
    )
    .with_subject(class)
    .with_detail(event)
}

/// Create an error for a forwarder wired with no receivers
#[must_use]
pub const fn empty_receiver_list_error(forwarder: &'static str) -> Error {
    Error::new(
        ErrorCategory::Event,
        codes::EMPTY_RECEIVER_LIST,
        "Forwarder wired with no receivers",
    )
    .with_subject(forwarder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_conversion() {
        let err: Error = LayoutError {
            class:     "Derived",
            field:     "a",
            violation: LayoutViolation::PrefixMismatch,
        }
        .into();
        assert_eq!(err.code, codes::PREFIX_MISMATCH);
        assert_eq!(err.subject, "Derived");
        assert_eq!(err.detail, "a");
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_unbound_kinds_map_to_distinct_codes() {
        let assoc: Error =
            UnboundAssociationError { slot: "a.b", kind: SlotKind::Association }.into();
        let slot: Error = UnboundAssociationError { slot: "a.c", kind: SlotKind::EventSlot }.into();
        let fwd: Error = UnboundAssociationError { slot: "a.d", kind: SlotKind::Forwarder }.into();
        assert_eq!(assoc.code, codes::UNBOUND_ASSOCIATION);
        assert_eq!(slot.code, codes::UNBOUND_EVENT_SLOT);
        assert_eq!(fwd.code, codes::UNWIRED_FORWARDER);
        assert!(assoc.is_unbound_association());
        assert!(slot.is_unbound_association());
        assert!(fwd.is_unbound_association());
    }

    #[test]
    fn test_undeclared_slot_names_class_and_member() {
        let err = undeclared_slot_error("Lamp", "switch", SlotKind::Association);
        assert_eq!(err.code, codes::UNBOUND_ASSOCIATION);
        assert_eq!(err.subject, "Lamp");
        assert_eq!(err.detail, "switch");
        let sent = undeclared_slot_error("Button", "Pressed", SlotKind::EventSlot);
        assert_eq!(sent.code, codes::UNBOUND_EVENT_SLOT);
        assert!(sent.is_unbound_association());
    }

    #[test]
    fn test_unbound_dispatch_keeps_operation() {
        let err: Error = UnboundDispatchError { class: "Square", operation: "area" }.into();
        assert!(err.is_unbound_dispatch());
        assert_eq!(err.subject, "Square");
        assert_eq!(err.detail, "area");
    }
}
