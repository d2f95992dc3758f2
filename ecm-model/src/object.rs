// ECM - ecm-model
// Module: Objects
// SW-REQ-ID: REQ_LAYOUT_003, REQ_CONCURRENCY_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Objects: one const part plus one single-writer var part.
//!
//! Objects are built with a `const fn` so they can live in `static`s, where
//! they stay for the life of the program at a fixed address. The var part
//! sits in a [`VarCell`], which never waits: overlapping access to the same
//! object is a broken serialization contract and stops the program.

use core::fmt;

use ecm_sync::EcmMutex;

use crate::inherit::{Class, Inherits};

/// Single-writer cell for an object's var part.
///
/// Built on [`EcmMutex::try_lock`]. Re-entrant or concurrent access panics
/// instead of spinning, since neither can succeed under the model's
/// single-writer rule.
pub struct VarCell<V> {
    inner: EcmMutex<V>,
}

impl<V> VarCell<V> {
    /// Creates a cell holding `value`.
    #[must_use]
    pub const fn new(value: V) -> Self {
        Self { inner: EcmMutex::new(value) }
    }

    /// Runs `f` with exclusive access to the value.
    ///
    /// # Panics
    ///
    /// Panics if the value is already being accessed.
    #[allow(clippy::panic)]
    pub fn with<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        match self.inner.try_lock() {
            Some(mut guard) => f(&mut guard),
            None => panic!("single-writer violation: var part already in use"),
        }
    }

    /// Runs `f` with shared access to the value.
    ///
    /// # Panics
    ///
    /// Panics if the value is already being accessed.
    pub fn read<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        self.with(|v| f(v))
    }

    /// Returns a copy of the value.
    ///
    /// # Panics
    ///
    /// Panics if the value is already being accessed.
    pub fn get(&self) -> V
    where
        V: Copy,
    {
        self.with(|v| *v)
    }

    /// Returns `true` while an access is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.is_locked()
    }
}

impl<V: fmt::Debug> fmt::Debug for VarCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(guard) => f.debug_tuple("VarCell").field(&&*guard).finish(),
            None => f.debug_tuple("VarCell").field(&"<busy>").finish(),
        }
    }
}

/// One static instance of class `K`
pub struct Object<K: Class> {
    konst: K::Const,
    var:   VarCell<K::Var>,
}

impl<K: Class> Object<K> {
    /// Creates an object from its const and var parts.
    ///
    /// ```
    /// use ecm_model::{Class, Object};
    ///
    /// pub struct Counter;
    /// impl Class for Counter {
    ///     const NAME: &'static str = "Counter";
    ///     type Const = u8;
    ///     type Var = u32;
    /// }
    ///
    /// static COUNTER: Object<Counter> = Object::new(1, 0);
    ///
    /// COUNTER.with_var(|count| *count += u32::from(*COUNTER.konst()));
    /// assert_eq!(COUNTER.var(), 1);
    /// ```
    #[must_use]
    pub const fn new(konst: K::Const, var: K::Var) -> Self {
        Self { konst, var: VarCell::new(var) }
    }

    /// Class name.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        K::NAME
    }

    /// The const part.
    #[must_use]
    pub const fn konst(&self) -> &K::Const {
        &self.konst
    }

    /// The var cell.
    #[must_use]
    pub const fn var_cell(&self) -> &VarCell<K::Var> {
        &self.var
    }

    /// Runs `f` with exclusive access to the var part.
    ///
    /// # Panics
    ///
    /// Panics on overlapping access to this object.
    pub fn with_var<R>(&self, f: impl FnOnce(&mut K::Var) -> R) -> R {
        self.var.with(f)
    }

    /// Copies the var part out.
    ///
    /// # Panics
    ///
    /// Panics on overlapping access to this object.
    pub fn var(&self) -> K::Var
    where
        K::Var: Copy,
    {
        self.var.get()
    }

    /// A view of this object typed as ancestor `A`.
    ///
    /// The view borrows this object's own storage; writes through it are
    /// visible through the derived handle and vice versa.
    #[must_use]
    pub fn view<A: Class>(&self) -> View<'_, A>
    where
        K: Inherits<A>,
    {
        View { konst: K::project_const(&self.konst), var: self }
    }
}

impl<K: Class> fmt::Debug for Object<K>
where
    K::Const: fmt::Debug,
    K::Var: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME).field("const", &self.konst).field("var", &self.var).finish()
    }
}

/// Access to an ancestor's var part inside a descendant's object.
///
/// Implemented by [`Object<K>`] for every ancestor `A` of `K`; [`View`] holds
/// it as a trait object so base-typed code does not name `K`.
pub trait VarAccess<A: Class> {
    /// Calls `f` exactly once with the ancestor's var part.
    fn with_ancestor_var(&self, f: &mut dyn FnMut(&mut A::Var));
}

impl<K, A> VarAccess<A> for Object<K>
where
    K: Inherits<A>,
    A: Class,
{
    fn with_ancestor_var(&self, f: &mut dyn FnMut(&mut A::Var)) {
        self.var.with(|var| f(K::project_var(var)));
    }
}

/// Base-typed view of an object.
pub struct View<'a, A: Class> {
    konst: &'a A::Const,
    var:   &'a dyn VarAccess<A>,
}

impl<A: Class> Clone for View<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Class> Copy for View<'_, A> {}

impl<'a, A: Class> View<'a, A> {
    /// The ancestor's const part.
    #[must_use]
    pub fn konst(&self) -> &'a A::Const {
        self.konst
    }

    /// Runs `f` with exclusive access to the ancestor's var part.
    ///
    /// # Panics
    ///
    /// Panics on overlapping access to the underlying object.
    pub fn with_var<R>(&self, f: impl FnOnce(&mut A::Var) -> R) -> R {
        let mut f = Some(f);
        let mut out = None;
        self.var.with_ancestor_var(&mut |var| {
            if let Some(f) = f.take() {
                out = Some(f(var));
            }
        });
        out.unwrap_or_else(|| access_not_called())
    }

    /// Copies the ancestor's var part out.
    ///
    /// # Panics
    ///
    /// Panics on overlapping access to the underlying object.
    pub fn var(&self) -> A::Var
    where
        A::Var: Copy,
    {
        self.with_var(|v| *v)
    }
}

#[cold]
#[allow(clippy::panic)]
fn access_not_called() -> ! {
    panic!("VarAccess implementation did not call its closure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inherits;

    #[derive(Debug, Clone, Copy)]
    #[repr(C)]
    struct BaseVar {
        a: u32,
        b: u8,
    }

    #[derive(Debug, Clone, Copy)]
    #[repr(C)]
    struct DerivedVar {
        super_: BaseVar,
        c:      u16,
    }

    #[repr(C)]
    struct DerivedConst {
        super_: (),
    }

    struct Base;
    impl Class for Base {
        const NAME: &'static str = "Base";
        type Const = ();
        type Var = BaseVar;
    }

    struct Derived;
    impl Class for Derived {
        const NAME: &'static str = "Derived";
        type Const = DerivedConst;
        type Var = DerivedVar;
    }
    inherits!(Derived: Base);

    static OBJ: Object<Derived> = Object::new(
        DerivedConst { super_: () },
        DerivedVar { super_: BaseVar { a: 0, b: 0 }, c: 0 },
    );

    #[test]
    fn test_write_derived_read_base() {
        OBJ.with_var(|v| {
            v.super_.a = 0xDEAD_BEEF;
            v.super_.b = 0x7F;
            v.c = 11;
        });
        let base = OBJ.view::<Base>();
        let seen = base.var();
        assert_eq!(seen.a, 0xDEAD_BEEF);
        assert_eq!(seen.b, 0x7F);
        assert_eq!(OBJ.var().c, 11);
        assert_eq!(OBJ.class_name(), "Derived");
    }

    #[test]
    fn test_write_base_visible_through_derived() {
        let obj: Object<Derived> = Object::new(
            DerivedConst { super_: () },
            DerivedVar { super_: BaseVar { a: 1, b: 2 }, c: 3 },
        );
        obj.view::<Base>().with_var(|v| v.a += 41);
        assert_eq!(obj.var().super_.a, 42);
        assert_eq!(obj.var().c, 3);
    }

    #[test]
    #[should_panic(expected = "single-writer violation")]
    fn test_reentrant_access_panics() {
        let obj: Object<Base> = Object::new((), BaseVar { a: 0, b: 0 });
        obj.with_var(|_| obj.with_var(|v| v.a = 1));
    }

    #[test]
    fn test_cell_not_busy_after_access() {
        let cell = VarCell::new(5u8);
        assert_eq!(cell.read(|v| *v + 1), 6);
        assert!(!cell.is_busy());
        assert_eq!(std::format!("{cell:?}"), "VarCell(5)");
    }
}
