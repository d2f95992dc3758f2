// ECM - ecm-model
// Module: Virtual dispatch
// SW-REQ-ID: REQ_DISPATCH_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Virtual dispatch through per-class operation tables.
//!
//! An [`AbstractClass`] is a dispatch contract: an ordered list of operation
//! names addressed by [`OpId`]. A concrete class builds one [`VTable`] for
//! the contract in a `const`, binding each slot to a function that takes the
//! concrete object as receiver. No signature coercion happens anywhere; the
//! compiler checks every bound function against the table's type.
//!
//! [`Virtual`] pairs an object with its table and implements [`Dispatch`],
//! the only thing abstract code sees:
//!
//! ```
//! use ecm_model::vtable::{AbstractClass, Dispatch, OpId, VTable, Virtual};
//!
//! static SHAPE: AbstractClass<1> = AbstractClass::new("Shape", ["area"]);
//! const AREA: OpId = SHAPE.op(0);
//!
//! pub struct Square { side: u32 }
//! static SQUARE_TABLE: VTable<Square, (), u32, 1> =
//!     VTable::new(&SHAPE, "Square").bind(AREA, |s: &Square, ()| s.side * s.side);
//! static SQUARE: Virtual<Square, (), u32, 1> = Virtual::new(&SQUARE_TABLE, Square { side: 3 });
//!
//! let shape: &dyn Dispatch<(), u32> = &SQUARE;
//! assert_eq!(shape.dispatch(AREA, ()), 9);
//! ```
//!
//! A slot left unbound panics when called, naming class and operation.
//! The composition root runs [`VTable::check`] on every registered table, so
//! a validated program never reaches that panic.

use core::fmt;

use ecm_error::{kinds::unknown_operation_error, Result, UnboundDispatchError};
use ecm_foundation::limits::MAX_OPERATIONS;

/// Index of an operation inside its dispatch contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpId(usize);

impl OpId {
    /// Slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Dispatch contract: a named, ordered set of operations
#[derive(Debug)]
pub struct AbstractClass<const N: usize> {
    name:       &'static str,
    operations: [&'static str; N],
}

impl<const N: usize> AbstractClass<N> {
    /// Creates a contract from its operation names, in slot order.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in a `static`) if `N` exceeds
    /// `MAX_OPERATIONS`.
    #[must_use]
    pub const fn new(name: &'static str, operations: [&'static str; N]) -> Self {
        assert!(N <= MAX_OPERATIONS, "too many operations in dispatch contract");
        Self { name, operations }
    }

    /// Contract name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of operations.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` for a contract without operations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Operation at `index`; fails to compile in a `const` when out of
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub const fn op(&self, index: usize) -> OpId {
        assert!(index < N, "operation index out of range");
        OpId(index)
    }

    /// Looks an operation up by name.
    ///
    /// # Errors
    ///
    /// Returns `UNKNOWN_OPERATION` when the contract has no such operation.
    pub fn find(&self, name: &'static str) -> Result<OpId> {
        self.operations
            .iter()
            .position(|op| *op == name)
            .map(OpId)
            .ok_or(unknown_operation_error(self.name, name))
    }

    /// Name of an operation.
    #[must_use]
    pub fn operation_name(&self, op: OpId) -> &'static str {
        self.operations.get(op.0).copied().unwrap_or("<unknown>")
    }

    /// All operation names in slot order.
    #[must_use]
    pub const fn operations(&self) -> &[&'static str; N] {
        &self.operations
    }
}

/// Operation table of one concrete class for one contract.
///
/// `O` is the concrete object type, `A` the argument type and `R` the
/// result type shared by the contract's operations.
pub struct VTable<O: 'static, A: 'static, R: 'static, const N: usize> {
    contract: &'static AbstractClass<N>,
    class:    &'static str,
    slots:    [Option<fn(&O, A) -> R>; N],
}

impl<O, A, R, const N: usize> VTable<O, A, R, N> {
    /// Creates a table with every slot unbound.
    #[must_use]
    pub const fn new(contract: &'static AbstractClass<N>, class: &'static str) -> Self {
        Self { contract, class, slots: [None; N] }
    }

    /// Binds `op` to `f`. Binding a slot again replaces it, which is how a
    /// derived table overrides an entry copied from its parent's.
    #[must_use]
    pub const fn bind(mut self, op: OpId, f: fn(&O, A) -> R) -> Self {
        self.slots[op.0] = Some(f);
        self
    }

    /// Copies every bound slot of `parent` into a table for `class`.
    ///
    /// Used when the derived object type is the parent's object type, so
    /// inherited entries apply unchanged.
    #[must_use]
    pub const fn inherit(parent: &VTable<O, A, R, N>, class: &'static str) -> Self {
        Self { contract: parent.contract, class, slots: parent.slots }
    }

    /// Class owning this table.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    /// Contract this table implements.
    #[must_use]
    pub const fn contract(&self) -> &'static AbstractClass<N> {
        self.contract
    }

    /// Returns `true` if `op` has an implementation.
    #[must_use]
    pub fn is_bound(&self, op: OpId) -> bool {
        matches!(self.slots.get(op.0), Some(Some(_)))
    }

    /// The function bound to `op`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is unbound. Continuing without the operation's
    /// behavior is never an option.
    #[inline]
    #[allow(clippy::panic)]
    pub fn resolve(&self, op: OpId) -> fn(&O, A) -> R {
        match self.slots.get(op.0) {
            Some(Some(f)) => *f,
            _ => panic!(
                "unbound dispatch: {}::{} has no implementation",
                self.class,
                self.contract.operation_name(op)
            ),
        }
    }

    /// Checks that every slot is bound.
    ///
    /// # Errors
    ///
    /// Returns [`UnboundDispatchError`] for the first empty slot.
    pub fn check(&self) -> Result<()> {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => Err(UnboundDispatchError {
                class:     self.class,
                operation: self.contract.operation_name(OpId(index)),
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl<O, A, R, const N: usize> fmt::Debug for VTable<O, A, R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("VTable")
            .field("class", &self.class)
            .field("contract", &self.contract.name)
            .field("bound", &bound)
            .field("slots", &N)
            .finish()
    }
}

/// A table the composition root can verify without knowing its types.
pub trait DispatchTable: Sync {
    /// Class owning the table.
    fn class(&self) -> &'static str;

    /// Contract name.
    fn contract(&self) -> &'static str;

    /// Verifies every slot is bound.
    ///
    /// # Errors
    ///
    /// Returns [`UnboundDispatchError`] for the first empty slot.
    fn check(&self) -> Result<()>;
}

impl<O, A, R, const N: usize> DispatchTable for VTable<O, A, R, N> {
    fn class(&self) -> &'static str {
        self.class
    }

    fn contract(&self) -> &'static str {
        self.contract.name
    }

    fn check(&self) -> Result<()> {
        VTable::check(self)
    }
}

/// Abstract-class view of an object: calls go through its own table.
pub trait Dispatch<A, R>: Sync {
    /// Name of the concrete class.
    fn class_name(&self) -> &'static str;

    /// Invokes `op` on the object with `args`.
    fn dispatch(&self, op: OpId, args: A) -> R;
}

/// An object paired with its class's table
pub struct Virtual<O: 'static, A: 'static, R: 'static, const N: usize> {
    vtable: &'static VTable<O, A, R, N>,
    object: O,
}

impl<O, A, R, const N: usize> Virtual<O, A, R, N> {
    /// Pairs `object` with `vtable`.
    #[must_use]
    pub const fn new(vtable: &'static VTable<O, A, R, N>, object: O) -> Self {
        Self { vtable, object }
    }

    /// The concrete object.
    #[must_use]
    pub const fn object(&self) -> &O {
        &self.object
    }

    /// The object's table.
    #[must_use]
    pub const fn vtable(&self) -> &'static VTable<O, A, R, N> {
        self.vtable
    }
}

impl<O: Sync, A, R, const N: usize> Dispatch<A, R> for Virtual<O, A, R, N> {
    fn class_name(&self) -> &'static str {
        self.vtable.class
    }

    #[inline]
    fn dispatch(&self, op: OpId, args: A) -> R {
        #[cfg(feature = "tracing")]
        let _span = ecm_foundation::tracing::DispatchTrace::call(
            self.vtable.class,
            self.vtable.contract.operation_name(op),
        )
        .entered();
        (self.vtable.resolve(op))(&self.object, args)
    }
}

#[cfg(test)]
mod tests {
    use ecm_error::codes;

    use super::*;

    static SHAPE: AbstractClass<2> = AbstractClass::new("Shape", ["area", "sides"]);
    const AREA: OpId = SHAPE.op(0);
    const SIDES: OpId = SHAPE.op(1);

    struct Rect {
        w: u32,
        h: u32,
    }

    struct Tri {
        base:   u32,
        height: u32,
    }

    static RECT_TABLE: VTable<Rect, (), u32, 2> =
        VTable::<Rect, (), u32, 2>::new(&SHAPE, "Rect")
            .bind(AREA, |r, ()| r.w * r.h)
            .bind(SIDES, |_, ()| 4);
    static TRI_TABLE: VTable<Tri, (), u32, 2> =
        VTable::<Tri, (), u32, 2>::new(&SHAPE, "Tri")
            .bind(AREA, |t, ()| t.base * t.height / 2)
            .bind(SIDES, |_, ()| 3);
    static HALF_TABLE: VTable<Tri, (), u32, 2> =
        VTable::new(&SHAPE, "Half").bind(AREA, |t: &Tri, ()| t.base);

    static RECT: Virtual<Rect, (), u32, 2> = Virtual::new(&RECT_TABLE, Rect { w: 2, h: 5 });
    static TRI: Virtual<Tri, (), u32, 2> = Virtual::new(&TRI_TABLE, Tri { base: 4, height: 3 });

    #[test]
    fn test_dispatch_uses_own_table() {
        let shapes: [&dyn Dispatch<(), u32>; 2] = [&RECT, &TRI];
        let areas: std::vec::Vec<u32> = shapes.iter().map(|s| s.dispatch(AREA, ())).collect();
        assert_eq!(areas, [10, 6]);
        assert_eq!(shapes[0].dispatch(SIDES, ()), 4);
        assert_eq!(shapes[1].dispatch(SIDES, ()), 3);
        assert_eq!(shapes[1].class_name(), "Tri");
    }

    #[test]
    fn test_check_reports_first_unbound_slot() {
        assert!(RECT_TABLE.check().is_ok());
        let err = HALF_TABLE.check().unwrap_err();
        assert!(err.is_unbound_dispatch());
        assert_eq!(err.subject, "Half");
        assert_eq!(err.detail, "sides");
        assert!(HALF_TABLE.is_bound(AREA));
        assert!(!HALF_TABLE.is_bound(SIDES));
    }

    #[test]
    #[should_panic(expected = "unbound dispatch: Half::sides")]
    fn test_unbound_slot_panics() {
        let half = Virtual::new(&HALF_TABLE, Tri { base: 1, height: 1 });
        let _ = half.dispatch(SIDES, ());
    }

    #[test]
    fn test_inherited_table_can_override() {
        static SQUARE_TABLE: VTable<Rect, (), u32, 2> =
            VTable::inherit(&RECT_TABLE, "Square").bind(AREA, |r: &Rect, ()| r.w * r.w);
        let square = Virtual::new(&SQUARE_TABLE, Rect { w: 3, h: 100 });
        assert_eq!(square.dispatch(AREA, ()), 9);
        assert_eq!(square.dispatch(SIDES, ()), 4);
        assert_eq!(SQUARE_TABLE.class(), "Square");
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(SHAPE.find("sides").unwrap(), SIDES);
        assert_eq!(SHAPE.find("volume").unwrap_err().code, codes::UNKNOWN_OPERATION);
        assert_eq!(SHAPE.operation_name(AREA), "area");
        assert_eq!(SHAPE.len(), 2);
    }
}
