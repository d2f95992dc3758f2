// ECM - ecm-model
// Module: Class declarations
// SW-REQ-ID: REQ_DECL_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Declarative class and interface descriptions.
//!
//! A [`ClassDecl`] is what a generator or a hand-written module states about
//! a class: its fields, parent, operations, realized interfaces,
//! associations and events. All of it is `const`, so declarations sit next
//! to the types they describe:
//!
//! ```
//! use ecm_model::{decl::{AssociationDecl, ClassDecl}, layout::field};
//!
//! const LED: ClassDecl = ClassDecl::new("Led")
//!     .const_fields(&[field::<u32>("pin")])
//!     .var_fields(&[field::<bool>("lit")])
//!     .implements(&["set"])
//!     .realizes(&["Switch"])
//!     .associations(&[AssociationDecl::mandatory("driver", "Gpio")]);
//!
//! assert_eq!(LED.parent, None);
//! assert!(!LED.is_abstract);
//! ```

use crate::{inherit::Class, layout::FieldDecl};

/// Association from a class to a class or interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociationDecl {
    /// Field holding the reference
    pub field:     &'static str,
    /// Target class or interface name
    pub target:    &'static str,
    /// Whether composition requires it to be bound
    pub mandatory: bool,
}

impl AssociationDecl {
    /// A mandatory association.
    #[must_use]
    pub const fn mandatory(field: &'static str, target: &'static str) -> Self {
        Self { field, target, mandatory: true }
    }

    /// An optional association.
    #[must_use]
    pub const fn optional(field: &'static str, target: &'static str) -> Self {
        Self { field, target, mandatory: false }
    }
}

/// Event name and ordered parameter type names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDecl {
    /// Event name
    pub name:   &'static str,
    /// Parameter types, in order
    pub params: &'static [&'static str],
}

impl EventDecl {
    /// Declares an event signature.
    #[must_use]
    pub const fn new(name: &'static str, params: &'static [&'static str]) -> Self {
        Self { name, params }
    }
}

/// Stateless named set of operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceDecl {
    /// Interface name
    pub name:       &'static str,
    /// Operation names, in order
    pub operations: &'static [&'static str],
}

impl InterfaceDecl {
    /// Declares an interface.
    #[must_use]
    pub const fn new(name: &'static str, operations: &'static [&'static str]) -> Self {
        Self { name, operations }
    }
}

/// Declaration of one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDecl {
    /// Class name
    pub name:         &'static str,
    /// Parent class name
    pub parent:       Option<&'static str>,
    /// Abstract classes need not implement their operations
    pub is_abstract:  bool,
    /// Const part fields, inherited fields first
    pub const_fields: &'static [FieldDecl],
    /// Var part fields, inherited fields first
    pub var_fields:   &'static [FieldDecl],
    /// Abstract operations this class introduces
    pub operations:   &'static [&'static str],
    /// Operations this class implements or overrides
    pub implements:   &'static [&'static str],
    /// Names of realized interfaces
    pub interfaces:   &'static [&'static str],
    /// Associations held by the class
    pub associations: &'static [AssociationDecl],
    /// Events the class sends
    pub sends:        &'static [EventDecl],
    /// Events the class receives
    pub receives:     &'static [EventDecl],
}

impl ClassDecl {
    /// A root class with nothing declared yet.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            is_abstract: false,
            const_fields: &[],
            var_fields: &[],
            operations: &[],
            implements: &[],
            interfaces: &[],
            associations: &[],
            sends: &[],
            receives: &[],
        }
    }

    /// Sets the parent class.
    #[must_use]
    pub const fn parent(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Marks the class abstract.
    #[must_use]
    pub const fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Sets the const part fields.
    #[must_use]
    pub const fn const_fields(mut self, fields: &'static [FieldDecl]) -> Self {
        self.const_fields = fields;
        self
    }

    /// Sets the var part fields.
    #[must_use]
    pub const fn var_fields(mut self, fields: &'static [FieldDecl]) -> Self {
        self.var_fields = fields;
        self
    }

    /// Sets the abstract operations this class introduces.
    #[must_use]
    pub const fn operations(mut self, operations: &'static [&'static str]) -> Self {
        self.operations = operations;
        self
    }

    /// Sets the operations this class implements.
    #[must_use]
    pub const fn implements(mut self, operations: &'static [&'static str]) -> Self {
        self.implements = operations;
        self
    }

    /// Sets the realized interfaces.
    #[must_use]
    pub const fn realizes(mut self, interfaces: &'static [&'static str]) -> Self {
        self.interfaces = interfaces;
        self
    }

    /// Sets the associations.
    #[must_use]
    pub const fn associations(mut self, associations: &'static [AssociationDecl]) -> Self {
        self.associations = associations;
        self
    }

    /// Sets the sent events.
    #[must_use]
    pub const fn sends(mut self, events: &'static [EventDecl]) -> Self {
        self.sends = events;
        self
    }

    /// Sets the received events.
    #[must_use]
    pub const fn receives(mut self, events: &'static [EventDecl]) -> Self {
        self.receives = events;
        self
    }
}

/// A typed [`Class`] with its declaration.
///
/// The composition root checks the declared parts against the sizes and
/// alignments of `Const` and `Var`.
pub trait Declared: Class {
    /// Declaration of the class
    const DECL: ClassDecl;
}
