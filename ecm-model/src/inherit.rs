// ECM - ecm-model
// Module: Typed inheritance
// SW-REQ-ID: REQ_LAYOUT_002
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Typed classes and single inheritance by embedding.
//!
//! A class names its const and var structs through [`Class`]. A derived
//! class embeds its parent's structs by value as the first `#[repr(C)]`
//! field of each part, conventionally named `super_`. [`Inherits`] projects
//! a derived part onto an ancestor's part by plain field access, so a base
//! view of an object is always a borrow of that object's own storage.
//!
//! ```
//! use ecm_model::{inherits, Class, Inherits};
//!
//! #[repr(C)]
//! pub struct BaseVar { pub a: u32, pub b: u8 }
//! #[repr(C)]
//! pub struct DerivedVar { pub super_: BaseVar, pub c: u16 }
//!
//! pub struct Base;
//! impl Class for Base {
//!     const NAME: &'static str = "Base";
//!     type Const = ();
//!     type Var = BaseVar;
//! }
//!
//! #[repr(C)]
//! pub struct DerivedConst { pub super_: () }
//!
//! pub struct Derived;
//! impl Class for Derived {
//!     const NAME: &'static str = "Derived";
//!     type Const = DerivedConst;
//!     type Var = DerivedVar;
//! }
//!
//! inherits!(Derived: Base);
//!
//! let mut var = DerivedVar { super_: BaseVar { a: 1, b: 2 }, c: 3 };
//! <Derived as Inherits<Base>>::project_var(&mut var).a = 7;
//! assert_eq!(var.super_.a, 7);
//! ```

/// A class: a name plus the types of its const and var parts.
pub trait Class: 'static {
    /// Class name as used in declarations and diagnostics
    const NAME: &'static str;
    /// Immutable part
    type Const: 'static;
    /// Mutable part, written only by the object's own operations
    type Var: 'static;
}

/// A class with a direct parent.
pub trait Derived: Class {
    /// The class embedded as `super_`
    type Parent: Class;
}

/// `Self` is `A` or a descendant of `A`.
///
/// Every class inherits from itself. Direct parents are declared with
/// [`inherits!`](crate::inherits); grandparents with its transitive form.
pub trait Inherits<A: Class>: Class {
    /// Borrows the ancestor's const part.
    fn project_const(konst: &Self::Const) -> &A::Const;

    /// Borrows the ancestor's var part.
    fn project_var_ref(var: &Self::Var) -> &A::Var;

    /// Mutably borrows the ancestor's var part.
    fn project_var(var: &mut Self::Var) -> &mut A::Var;
}

impl<K: Class> Inherits<K> for K {
    #[inline]
    fn project_const(konst: &Self::Const) -> &K::Const {
        konst
    }

    #[inline]
    fn project_var_ref(var: &Self::Var) -> &K::Var {
        var
    }

    #[inline]
    fn project_var(var: &mut Self::Var) -> &mut K::Var {
        var
    }
}

/// Declares that a class embeds its parent as the first field of both parts.
///
/// `inherits!(Child: Parent)` uses the field `super_`; a different name can
/// be given with `inherits!(Child: Parent, base)`. The macro fails to
/// compile unless that field sits at offset 0 of both the const and the var
/// struct, which is the prefix rule for derived layouts.
///
/// `inherits!(Child: Parent: Grandparent)` adds the transitive projection
/// through an already declared parent.
#[macro_export]
macro_rules! inherits {
    ($child:ty : $parent:ty) => {
        $crate::inherits!($child : $parent, super_);
    };
    ($child:ty : $parent:ty, $field:ident) => {
        const _: () = {
            type ChildConst = <$child as $crate::Class>::Const;
            type ChildVar = <$child as $crate::Class>::Var;
            assert!(
                ::core::mem::offset_of!(ChildConst, $field) == 0,
                "parent const part must be the first field"
            );
            assert!(
                ::core::mem::offset_of!(ChildVar, $field) == 0,
                "parent var part must be the first field"
            );
        };

        impl $crate::inherit::Derived for $child {
            type Parent = $parent;
        }

        impl $crate::Inherits<$parent> for $child {
            #[inline]
            fn project_const(
                konst: &<$child as $crate::Class>::Const,
            ) -> &<$parent as $crate::Class>::Const {
                &konst.$field
            }

            #[inline]
            fn project_var_ref(
                var: &<$child as $crate::Class>::Var,
            ) -> &<$parent as $crate::Class>::Var {
                &var.$field
            }

            #[inline]
            fn project_var(
                var: &mut <$child as $crate::Class>::Var,
            ) -> &mut <$parent as $crate::Class>::Var {
                &mut var.$field
            }
        }
    };
    ($child:ty : $parent:ty : $ancestor:ty) => {
        impl $crate::Inherits<$ancestor> for $child {
            #[inline]
            fn project_const(
                konst: &<$child as $crate::Class>::Const,
            ) -> &<$ancestor as $crate::Class>::Const {
                <$parent as $crate::Inherits<$ancestor>>::project_const(
                    <$child as $crate::Inherits<$parent>>::project_const(konst),
                )
            }

            #[inline]
            fn project_var_ref(
                var: &<$child as $crate::Class>::Var,
            ) -> &<$ancestor as $crate::Class>::Var {
                <$parent as $crate::Inherits<$ancestor>>::project_var_ref(
                    <$child as $crate::Inherits<$parent>>::project_var_ref(var),
                )
            }

            #[inline]
            fn project_var(
                var: &mut <$child as $crate::Class>::Var,
            ) -> &mut <$ancestor as $crate::Class>::Var {
                <$parent as $crate::Inherits<$ancestor>>::project_var(
                    <$child as $crate::Inherits<$parent>>::project_var(var),
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inherits;

    #[repr(C)]
    struct ShapeConst {
        id: u16,
    }

    #[repr(C)]
    struct ShapeVar {
        x: i32,
        y: i32,
    }

    struct Shape;
    impl Class for Shape {
        const NAME: &'static str = "Shape";
        type Const = ShapeConst;
        type Var = ShapeVar;
    }

    #[repr(C)]
    struct CircleConst {
        super_: ShapeConst,
        radius: u16,
    }

    #[repr(C)]
    struct CircleVar {
        super_: ShapeVar,
    }

    struct Circle;
    impl Class for Circle {
        const NAME: &'static str = "Circle";
        type Const = CircleConst;
        type Var = CircleVar;
    }
    inherits!(Circle: Shape);

    #[repr(C)]
    struct RingConst {
        base:  CircleConst,
        inner: u16,
    }

    struct Ring;
    impl Class for Ring {
        const NAME: &'static str = "Ring";
        type Const = RingConst;
        type Var = CircleVar;
    }
    // Ring adds no var state; its var part is the parent's var part itself.
    impl Derived for Ring {
        type Parent = Circle;
    }
    impl Inherits<Circle> for Ring {
        fn project_const(konst: &RingConst) -> &CircleConst {
            &konst.base
        }
        fn project_var_ref(var: &CircleVar) -> &CircleVar {
            var
        }
        fn project_var(var: &mut CircleVar) -> &mut CircleVar {
            var
        }
    }
    inherits!(Ring: Circle: Shape);

    fn shape_id<K: Inherits<Shape>>(konst: &K::Const) -> u16 {
        K::project_const(konst).id
    }

    #[test]
    fn test_projection_borrows_own_storage() {
        let konst = CircleConst { super_: ShapeConst { id: 9 }, radius: 3 };
        let mut var = CircleVar { super_: ShapeVar { x: 0, y: 0 } };

        <Circle as Inherits<Shape>>::project_var(&mut var).x = 5;
        assert_eq!(var.super_.x, 5);
        assert_eq!(shape_id::<Circle>(&konst), 9);
        assert_eq!(shape_id::<Shape>(&konst.super_), 9);
        assert_eq!(konst.radius, 3);
    }

    #[test]
    fn test_transitive_projection() {
        let konst = RingConst {
            base:  CircleConst { super_: ShapeConst { id: 4 }, radius: 8 },
            inner: 2,
        };
        assert_eq!(shape_id::<Ring>(&konst), 4);
        assert_eq!(<Ring as Inherits<Circle>>::project_const(&konst).radius, 8);
        assert_eq!(konst.inner, 2);
        assert_eq!(<<Ring as Derived>::Parent as Class>::NAME, "Circle");
    }
}
