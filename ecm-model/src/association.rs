// ECM - ecm-model
// Module: Associations
// SW-REQ-ID: REQ_WIRING_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Associations: typed read-only references bound once at composition.
//!
//! An association points either at a concrete object (`Association<Led>`)
//! or at a realized interface (`Association<dyn Switch>`). It starts empty
//! inside a `static`, the startup routine binds it exactly once, and it is
//! never retargeted. Multiplicity is part of the type: a [`Mandatory`]
//! association hands out `&'static T`, an [`Optional`] one
//! `Option<&'static T>`.
//!
//! Slot names follow `"<Class>.<member>"`, with the declared class of the
//! owning object and the field (or sent event) name. That is how the
//! composition root matches a declared association to the runtime slot
//! that implements it.

use core::{fmt, marker::PhantomData};

use ecm_error::{kinds::association_already_bound_error, Result, SlotKind};
use ecm_sync::EcmOnce;

/// A late-bound slot the composition root can inspect.
///
/// Implemented by [`Association`], [`EventSlot`](crate::event::EventSlot)
/// and [`Forwarder`](crate::event::Forwarder).
pub trait Slot: Sync {
    /// Qualified slot name, e.g. `"Led.driver"`
    fn name(&self) -> &'static str;

    /// Owning class and member, split from a `"<Class>.<member>"` name
    fn owner(&self) -> Option<(&'static str, &'static str)> {
        self.name().split_once('.')
    }

    /// Kind of slot, reported when left unbound
    fn kind(&self) -> SlotKind;

    /// Returns `true` once bound
    fn is_bound(&self) -> bool;

    /// Returns `true` if composition must fail while unbound
    fn is_mandatory(&self) -> bool {
        true
    }

    /// Name of an unwired forwarder this slot delivers through, if any
    fn unwired_target(&self) -> Option<&'static str> {
        None
    }
}

/// Multiplicity marker for [`Association`]
pub trait Multiplicity: Sync + Send + 'static {
    /// Whether composition requires the association to be bound
    const MANDATORY: bool;
}

/// Exactly one target, required at composition
#[derive(Debug, Clone, Copy)]
pub struct Mandatory;

/// Zero or one target
#[derive(Debug, Clone, Copy)]
pub struct Optional;

impl Multiplicity for Mandatory {
    const MANDATORY: bool = true;
}

impl Multiplicity for Optional {
    const MANDATORY: bool = false;
}

/// Typed reference from one object to another object or interface
pub struct Association<T: ?Sized + Sync + 'static, M: Multiplicity = Mandatory> {
    name:   &'static str,
    target: EcmOnce<&'static T>,
    _m:     PhantomData<M>,
}

impl<T: ?Sized + Sync + 'static> Association<T, Mandatory> {
    /// Creates an empty mandatory association.
    #[must_use]
    pub const fn mandatory(name: &'static str) -> Self {
        Self { name, target: EcmOnce::new(), _m: PhantomData }
    }

    /// The bound target.
    ///
    /// # Panics
    ///
    /// Panics if the association was never bound. A successful composition
    /// rules that out for every registered association and for every
    /// mandatory association a declared class lists.
    #[inline]
    #[allow(clippy::panic)]
    pub fn get(&self) -> &'static T {
        match self.target.get() {
            Some(target) => target,
            None => panic!("unbound association: {}", self.name),
        }
    }
}

impl<T: ?Sized + Sync + 'static> Association<T, Optional> {
    /// Creates an empty optional association.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self { name, target: EcmOnce::new(), _m: PhantomData }
    }

    /// The bound target, or `None` if the association was left empty.
    #[inline]
    pub fn get(&self) -> Option<&'static T> {
        self.target.get().copied()
    }
}

impl<T: ?Sized + Sync + 'static, M: Multiplicity> Association<T, M> {
    /// Binds the association to `target`.
    ///
    /// # Errors
    ///
    /// Returns `ASSOCIATION_ALREADY_BOUND` on a second bind; the first
    /// target stays in place.
    pub fn bind(&self, target: &'static T) -> Result<()> {
        self.target.set(target).map_err(|_| association_already_bound_error(self.name))?;
        ecm_foundation::trace_event!(TRACE, slot = self.name, "association bound");
        Ok(())
    }

    /// Slot name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` once bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target.is_initialized()
    }
}

impl<T: ?Sized + Sync + 'static, M: Multiplicity> Slot for Association<T, M> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> SlotKind {
        SlotKind::Association
    }

    fn is_bound(&self) -> bool {
        self.target.is_initialized()
    }

    fn is_mandatory(&self) -> bool {
        M::MANDATORY
    }
}

impl<T: ?Sized + Sync + 'static, M: Multiplicity> fmt::Debug for Association<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Association")
            .field("name", &self.name)
            .field("mandatory", &M::MANDATORY)
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ecm_error::codes;

    use super::*;

    trait Switch: Sync {
        fn on(&self) -> bool;
    }

    struct Relay;
    impl Switch for Relay {
        fn on(&self) -> bool {
            true
        }
    }

    struct Triac;
    impl Switch for Triac {
        fn on(&self) -> bool {
            false
        }
    }

    static RELAY: Relay = Relay;
    static TRIAC: Triac = Triac;

    #[test]
    fn test_mandatory_binds_once() {
        let assoc: Association<dyn Switch> = Association::mandatory("Lamp.switch");
        assert!(!Slot::is_bound(&assoc));
        assoc.bind(&RELAY).unwrap();
        assert!(assoc.get().on());

        let err = assoc.bind(&TRIAC).unwrap_err();
        assert_eq!(err.code, codes::ASSOCIATION_ALREADY_BOUND);
        assert_eq!(err.subject, "Lamp.switch");
        // Never retargeted
        assert!(assoc.get().on());
    }

    #[test]
    fn test_optional_reports_absence() {
        let assoc: Association<dyn Switch, Optional> = Association::optional("Lamp.dimmer");
        assert!(assoc.get().is_none());
        assert!(!Slot::is_mandatory(&assoc));
        assoc.bind(&TRIAC).unwrap();
        assert_eq!(assoc.get().map(|s| s.on()), Some(false));
    }

    #[test]
    #[should_panic(expected = "unbound association: Lamp.switch")]
    fn test_unbound_mandatory_get_panics() {
        let assoc: Association<Relay> = Association::mandatory("Lamp.switch");
        let _ = assoc.get();
    }

    #[test]
    fn test_slot_reports_kind() {
        let assoc: Association<Relay> = Association::mandatory("Lamp.switch");
        let slot: &dyn Slot = &assoc;
        assert_eq!(slot.kind(), SlotKind::Association);
        assert!(slot.is_mandatory());
        assert_eq!(slot.name(), "Lamp.switch");
        assert_eq!(slot.owner(), Some(("Lamp", "switch")));
        assert_eq!(slot.unwired_target(), None);

        let loose: Association<Relay> = Association::mandatory("switch");
        assert_eq!(Slot::owner(&loose), None);
    }
}
