// ECM - ecm-error
// Module: ECM Error Types
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error type for the embedded class model.
//!
//! Every error the model can raise is detected while classes are defined or
//! while the composition root validates the object graph. An `Error` is a
//! small `Copy` value so it can be returned from `const` contexts and stored
//! without allocation.

use core::fmt;

use crate::codes;

/// `Error` categories for ECM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Field ordering and inheritance prefix errors
    Layout      = 1,
    /// Class graph errors (cycles, unknown or duplicate names)
    Composition = 2,
    /// Association and event slot binding errors
    Association = 3,
    /// Virtual dispatch and interface realization errors
    Dispatch    = 4,
    /// Event signature and wiring errors
    Event       = 5,
    /// Bounded collection capacity errors
    Capacity    = 6,
}

impl ErrorCategory {
    /// Short lowercase name, used in log output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Composition => "composition",
            Self::Association => "association",
            Self::Dispatch => "dispatch",
            Self::Event => "event",
            Self::Capacity => "capacity",
        }
    }
}

/// ECM `Error` type
///
/// Carries a category, a numeric code from [`codes`], a static message and
/// an optional subject naming the class, field, operation or slot at fault.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
    /// Name of the offending item, empty if none
    pub subject:  &'static str,
    /// Secondary name (field, operation, slot), empty if none
    pub detail:   &'static str,
}

impl Error {
    /// Composition root already produced an image
    pub const ALREADY_COMPOSED: Self = Self::new(
        ErrorCategory::Composition,
        codes::ALREADY_COMPOSED,
        "Composition root already installed an image",
    );
    /// Bounded collection full
    pub const CAPACITY_EXCEEDED: Self = Self::new(
        ErrorCategory::Capacity,
        codes::CAPACITY_EXCEEDED,
        "Bounded capacity exceeded",
    );

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
            subject: "",
            detail: "",
        }
    }

    /// Attach the name of the offending item.
    #[must_use]
    pub const fn with_subject(mut self, subject: &'static str) -> Self {
        self.subject = subject;
        self
    }

    /// Attach a secondary name such as the field or operation at fault.
    #[must_use]
    pub const fn with_detail(mut self, detail: &'static str) -> Self {
        self.detail = detail;
        self
    }

    /// Create a layout error
    #[must_use]
    pub const fn layout_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Layout, code, message)
    }

    /// Create a composition error
    #[must_use]
    pub const fn composition_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Composition, code, message)
    }

    /// Create a capacity error
    #[must_use]
    pub const fn capacity_exceeded(message: &'static str) -> Self {
        Self::new(ErrorCategory::Capacity, codes::CAPACITY_EXCEEDED, message)
    }

    /// Check if this is a layout error (prefix or field order)
    #[must_use]
    pub fn is_layout_error(&self) -> bool {
        self.category == ErrorCategory::Layout
    }

    /// Check if this is an inheritance cycle
    #[must_use]
    pub fn is_cycle_error(&self) -> bool {
        self.code == codes::COMPOSITION_CYCLE
    }

    /// Check if this is an unbound association, event slot or forwarder
    #[must_use]
    pub fn is_unbound_association(&self) -> bool {
        matches!(
            self.code,
            codes::UNBOUND_ASSOCIATION | codes::UNBOUND_EVENT_SLOT | codes::UNWIRED_FORWARDER
        )
    }

    /// Check if this is an unbound dispatch slot
    #[must_use]
    pub fn is_unbound_dispatch(&self) -> bool {
        matches!(
            self.code,
            codes::UNBOUND_DISPATCH | codes::UNREALIZED_INTERFACE_OPERATION
        )
    }

    /// Check if this is a capacity error
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        self.category == ErrorCategory::Capacity
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04}] {}", self.category, self.code, self.message)?;
        if !self.subject.is_empty() {
            write!(f, ": {}", self.subject)?;
        }
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_without_subject() {
        let err = Error::new(ErrorCategory::Layout, codes::PREFIX_MISMATCH, "Prefix mismatch");
        assert_eq!(std::format!("{err}"), "[Layout][E1000] Prefix mismatch");
    }

    #[test]
    fn test_error_display_with_subject() {
        let err = Error::new(
            ErrorCategory::Association,
            codes::UNBOUND_ASSOCIATION,
            "Mandatory association unbound",
        )
        .with_subject("led.driver");
        assert_eq!(
            std::format!("{err}"),
            "[Association][E3000] Mandatory association unbound: led.driver"
        );
    }

    #[test]
    fn test_error_display_with_detail() {
        let err = Error::new(ErrorCategory::Dispatch, codes::UNBOUND_DISPATCH, "Unbound operation")
            .with_subject("Circle")
            .with_detail("area");
        assert_eq!(std::format!("{err}"), "[Dispatch][E4000] Unbound operation: Circle (area)");
    }

    #[test]
    fn test_error_predicates() {
        let err = Error::composition_error(codes::COMPOSITION_CYCLE, "cycle");
        assert!(err.is_cycle_error());
        assert!(!err.is_layout_error());
        assert!(Error::CAPACITY_EXCEEDED.is_capacity_error());
    }
}
