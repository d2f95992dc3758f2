// ECM - ecm-model
// Module: Event channel
// SW-REQ-ID: REQ_EVENT_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Synchronous, ordered event fan-out.
//!
//! An event is an argument struct `E`. A sending object holds one
//! [`EventSlot<E>`], wired during startup to a per-object [`Forwarder`].
//! The forwarder calls each receiver's [`Receive::receive`] in the order
//! they were wired, directly and on the sender's stack. Nothing is queued.
//!
//! There is no isolation between receivers. If one panics, the panic
//! unwinds (or aborts) through the forwarder and the remaining receivers do
//! not run for that event.

use core::fmt;

use ecm_error::{
    kinds::{association_already_bound_error, empty_receiver_list_error},
    Result, SlotKind,
};
use ecm_foundation::{limits::MAX_RECEIVERS, StaticVec};
use ecm_sync::EcmOnce;

use crate::association::Slot;

/// Entry operation of a receiving object
pub trait Receive<E>: Sync {
    /// Handles one event; runs to completion before the sender continues.
    fn receive(&self, event: &E);
}

/// Anything an event slot can be wired to
pub trait Emit<E>: Sync {
    /// Delivers `event` to every wired receiver.
    fn emit(&self, event: &E);

    /// Name of the target while it still has no receivers.
    fn unwired(&self) -> Option<&'static str> {
        None
    }
}

/// Per-object ordered list of receivers
pub struct Forwarder<E: 'static, const N: usize = MAX_RECEIVERS> {
    name:      &'static str,
    receivers: EcmOnce<StaticVec<&'static dyn Receive<E>, N>>,
}

impl<E: 'static, const N: usize> Forwarder<E, N> {
    /// Creates an unwired forwarder.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, receivers: EcmOnce::new() }
    }

    /// Wires the receivers, in delivery order.
    ///
    /// # Errors
    ///
    /// - `EMPTY_RECEIVER_LIST` for an empty list
    /// - a capacity error for more than `N` receivers
    /// - `ASSOCIATION_ALREADY_BOUND` if the forwarder is already wired
    pub fn wire(&self, receivers: &[&'static dyn Receive<E>]) -> Result<()> {
        if receivers.is_empty() {
            return Err(empty_receiver_list_error(self.name));
        }
        let list = StaticVec::from_slice(receivers)?;
        self.receivers.set(list).map_err(|_| association_already_bound_error(self.name))?;
        ecm_foundation::trace_event!(
            DEBUG,
            forwarder = self.name,
            receivers = receivers.len(),
            "forwarder wired"
        );
        Ok(())
    }

    /// Invokes every receiver with `event`, in wiring order.
    ///
    /// # Panics
    ///
    /// Panics if the forwarder was never wired. Composition rejects an
    /// unwired forwarder that is registered or sits behind a connected slot.
    #[allow(clippy::panic)]
    pub fn forward(&self, event: &E) {
        let Some(receivers) = self.receivers.get() else {
            panic!("unwired forwarder: {}", self.name);
        };
        #[cfg(feature = "tracing")]
        let _span =
            ecm_foundation::tracing::EventTrace::forward(self.name, receivers.len()).entered();
        for receiver in receivers {
            receiver.receive(event);
        }
    }

    /// Forwarder name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of wired receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.receivers.get().map_or(0, StaticVec::len)
    }

    /// Returns `true` once wired.
    #[must_use]
    pub fn is_wired(&self) -> bool {
        self.receivers.is_initialized()
    }
}

impl<E: 'static, const N: usize> Emit<E> for Forwarder<E, N> {
    fn emit(&self, event: &E) {
        self.forward(event);
    }

    fn unwired(&self) -> Option<&'static str> {
        (!self.is_wired()).then_some(self.name)
    }
}

impl<E: 'static, const N: usize> Slot for Forwarder<E, N> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> SlotKind {
        SlotKind::Forwarder
    }

    fn is_bound(&self) -> bool {
        self.is_wired()
    }
}

impl<E: 'static, const N: usize> fmt::Debug for Forwarder<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forwarder")
            .field("name", &self.name)
            .field("receivers", &self.receiver_count())
            .field("capacity", &N)
            .finish()
    }
}

/// Sender-side callback slot for event `E`
pub struct EventSlot<E: 'static> {
    name:   &'static str,
    target: EcmOnce<&'static dyn Emit<E>>,
}

impl<E: 'static> EventSlot<E> {
    /// Creates an unwired slot.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, target: EcmOnce::new() }
    }

    /// Wires the slot to a forwarder or any other [`Emit`] target.
    ///
    /// # Errors
    ///
    /// Returns `ASSOCIATION_ALREADY_BOUND` if the slot is already wired.
    pub fn connect(&self, target: &'static dyn Emit<E>) -> Result<()> {
        self.target.set(target).map_err(|_| association_already_bound_error(self.name))?;
        ecm_foundation::trace_event!(TRACE, slot = self.name, "event slot connected");
        Ok(())
    }

    /// Sends `event`; returns after every receiver has run.
    ///
    /// # Panics
    ///
    /// Panics if the slot was never wired, which a successful composition
    /// rules out for every registered slot.
    #[allow(clippy::panic)]
    pub fn send(&self, event: &E) {
        match self.target.get() {
            Some(target) => target.emit(event),
            None => panic!("unwired event slot: {}", self.name),
        }
    }

    /// Slot name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` once wired.
    #[must_use]
    pub fn is_wired(&self) -> bool {
        self.target.is_initialized()
    }
}

impl<E: 'static> Slot for EventSlot<E> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> SlotKind {
        SlotKind::EventSlot
    }

    fn is_bound(&self) -> bool {
        self.is_wired()
    }

    fn unwired_target(&self) -> Option<&'static str> {
        self.target.get().and_then(|target| target.unwired())
    }
}

impl<E: 'static> fmt::Debug for EventSlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSlot")
            .field("name", &self.name)
            .field("wired", &self.is_wired())
            .finish()
    }
}
