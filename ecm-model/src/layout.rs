// ECM - ecm-model
// Module: Class layout
// SW-REQ-ID: REQ_LAYOUT_001, REQ_MEM_SAFETY_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Class layouts.
//!
//! A class stores its state in two parts: a const part that never changes
//! after construction and a var part that only the object's own operations
//! mutate. Each part is a `#[repr(C)]` struct. [`ClassDescriptor`] describes
//! both parts field by field and enforces the layout rules:
//!
//! - fields a class adds are ordered descending by storage size, so no
//!   padding hides between them;
//! - a derived part begins with an exact copy of the parent's part (same
//!   names, sizes, alignments and offsets), which is what embedding the
//!   parent struct as the first field produces.
//!
//! Offsets follow `repr(C)`: the inherited prefix occupies the parent's full
//! size, including its tail padding, and the class's own fields follow.

use core::mem::{align_of, size_of};

use ecm_error::{codes, Error, LayoutError, LayoutViolation, Result};
use ecm_foundation::{limits::MAX_FIELDS_PER_PART, StaticVec};

/// One declared field: name, storage size and alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name, unique within its class hierarchy
    pub name:  &'static str,
    /// Storage size in bytes
    pub size:  usize,
    /// Alignment in bytes, a power of two
    pub align: usize,
}

impl FieldDecl {
    /// Declares a field with explicit size and alignment.
    #[must_use]
    pub const fn new(name: &'static str, size: usize, align: usize) -> Self {
        Self { name, size, align }
    }
}

/// Declares a field with the size and alignment of `T`.
///
/// ```
/// use ecm_model::layout::field;
///
/// let f = field::<u32>("count");
/// assert_eq!((f.size, f.align), (4, 4));
/// ```
#[must_use]
pub const fn field<T>(name: &'static str) -> FieldDecl {
    FieldDecl::new(name, size_of::<T>(), align_of::<T>())
}

/// A field placed at its `repr(C)` offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Field name
    pub name:   &'static str,
    /// Storage size in bytes
    pub size:   usize,
    /// Alignment in bytes
    pub align:  usize,
    /// Byte offset from the start of the part
    pub offset: usize,
}

/// Selects the const or the var part of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Immutable part
    Const,
    /// Single-writer mutable part
    Var,
}

/// Computed layout of one part, inherited fields first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartLayout {
    fields:    StaticVec<FieldLayout, MAX_FIELDS_PER_PART>,
    inherited: usize,
    size:      usize,
    align:     usize,
    padding:   usize,
}

const fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

impl PartLayout {
    const fn empty() -> Self {
        Self { fields: StaticVec::new(), inherited: 0, size: 0, align: 1, padding: 0 }
    }

    fn build(
        class: &'static str,
        decls: &[FieldDecl],
        parent: Option<&PartLayout>,
    ) -> Result<Self> {
        let mut part = Self::empty();

        if let Some(parent) = parent {
            for (index, expected) in parent.fields.iter().enumerate() {
                match decls.get(index) {
                    Some(decl)
                        if decl.name == expected.name
                            && decl.size == expected.size
                            && decl.align == expected.align => {},
                    Some(decl) => {
                        return Err(layout_error(class, decl.name, LayoutViolation::PrefixMismatch))
                    },
                    None => {
                        return Err(layout_error(
                            class,
                            expected.name,
                            LayoutViolation::PrefixMismatch,
                        ))
                    },
                }
                part.fields.push(*expected)?;
            }
            part.inherited = parent.fields.len();
            part.size = parent.size;
            part.align = parent.align;
            part.padding = parent.padding;
        }

        let own = decls.get(part.inherited..).unwrap_or(&[]);
        let mut cursor = part.size;
        let mut previous = usize::MAX;
        for decl in own {
            if !decl.align.is_power_of_two() {
                return Err(layout_error(class, decl.name, LayoutViolation::InvalidAlignment));
            }
            if decl.size > previous {
                return Err(layout_error(class, decl.name, LayoutViolation::FieldOrder));
            }
            if part.find(decl.name).is_some() {
                return Err(layout_error(class, decl.name, LayoutViolation::DuplicateField));
            }

            let offset = align_up(cursor, decl.align);
            part.padding += offset - cursor;
            part.fields.push(FieldLayout {
                name: decl.name,
                size: decl.size,
                align: decl.align,
                offset,
            })?;
            part.align = part.align.max(decl.align);
            cursor = offset + decl.size;
            previous = decl.size;
        }

        part.size = align_up(cursor, part.align);
        part.padding += part.size - cursor;
        Ok(part)
    }

    fn find(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All fields in storage order, inherited fields first.
    #[must_use]
    pub fn fields(&self) -> &[FieldLayout] {
        self.fields.as_slice()
    }

    /// Fields inherited from the parent part.
    #[must_use]
    pub fn inherited_fields(&self) -> &[FieldLayout] {
        self.fields.as_slice().get(..self.inherited).unwrap_or(&[])
    }

    /// Fields this class adds on top of its parent.
    #[must_use]
    pub fn own_fields(&self) -> &[FieldLayout] {
        self.fields.as_slice().get(self.inherited..).unwrap_or(&[])
    }

    /// Looks up a field by name.
    ///
    /// # Errors
    ///
    /// Returns `FIELD_NOT_FOUND` when no field has that name.
    pub fn field(&self, name: &'static str) -> Result<&FieldLayout> {
        self.find(name).ok_or_else(|| {
            Error::layout_error(codes::FIELD_NOT_FOUND, "Field not declared").with_subject(name)
        })
    }

    /// Byte offset of a field, if declared.
    #[must_use]
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.find(name).map(|f| f.offset)
    }

    /// Total size in bytes, tail padding included.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Alignment of the part.
    #[must_use]
    pub const fn align(&self) -> usize {
        self.align
    }

    /// Bytes lost to padding, inherited padding included.
    #[must_use]
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Returns `true` if `other` begins with an exact copy of this part.
    #[must_use]
    pub fn is_prefix_of(&self, other: &PartLayout) -> bool {
        other.size >= self.size
            && other.align >= self.align
            && other.fields.as_slice().get(..self.fields.len()) == Some(self.fields.as_slice())
    }
}

fn layout_error(class: &'static str, field: &'static str, violation: LayoutViolation) -> Error {
    LayoutError { class, field, violation }.into()
}

/// Immutable description of a class's two parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    name:       &'static str,
    parent:     Option<&'static str>,
    depth:      usize,
    const_part: PartLayout,
    var_part:   PartLayout,
}

impl ClassDescriptor {
    /// Defines a class from its const and var field lists.
    ///
    /// With a parent, each list must begin with the parent's fields of the
    /// same part, in order. Fields the class adds must be ordered descending
    /// by size.
    ///
    /// # Errors
    ///
    /// - [`LayoutError`] with `PREFIX_MISMATCH` when a part does not begin
    ///   with the parent's part
    /// - [`LayoutError`] with `FIELD_ORDER_VIOLATION`, `DUPLICATE_FIELD` or
    ///   `INVALID_ALIGNMENT` for the class's own fields
    /// - a capacity error past `MAX_FIELDS_PER_PART` fields
    ///
    /// ```
    /// use ecm_model::layout::{field, ClassDescriptor, Part};
    ///
    /// let base = ClassDescriptor::define(
    ///     "Base",
    ///     &[],
    ///     &[field::<u32>("a"), field::<u8>("b")],
    ///     None,
    /// )?;
    /// let derived = ClassDescriptor::define(
    ///     "Derived",
    ///     &[],
    ///     &[field::<u32>("a"), field::<u8>("b"), field::<u16>("c")],
    ///     Some(&base),
    /// )?;
    /// assert!(base.is_prefix_of(&derived));
    /// assert_eq!(derived.offset_of(Part::Var, "c"), Some(8));
    /// # Ok::<(), ecm_error::Error>(())
    /// ```
    pub fn define(
        name: &'static str,
        const_fields: &[FieldDecl],
        var_fields: &[FieldDecl],
        parent: Option<&ClassDescriptor>,
    ) -> Result<Self> {
        let const_part = PartLayout::build(name, const_fields, parent.map(|p| &p.const_part))?;
        let var_part = PartLayout::build(name, var_fields, parent.map(|p| &p.var_part))?;
        Ok(Self {
            name,
            parent: parent.map(|p| p.name),
            depth: parent.map_or(0, |p| p.depth + 1),
            const_part,
            var_part,
        })
    }

    /// Class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parent class name.
    #[must_use]
    pub const fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    /// Number of ancestors; zero for a root class.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Layout of the const part.
    #[must_use]
    pub const fn const_part(&self) -> &PartLayout {
        &self.const_part
    }

    /// Layout of the var part.
    #[must_use]
    pub const fn var_part(&self) -> &PartLayout {
        &self.var_part
    }

    /// Layout of the selected part.
    #[must_use]
    pub const fn part(&self, part: Part) -> &PartLayout {
        match part {
            Part::Const => &self.const_part,
            Part::Var => &self.var_part,
        }
    }

    /// Byte offset of a field in the selected part.
    #[must_use]
    pub fn offset_of(&self, part: Part, name: &str) -> Option<usize> {
        self.part(part).offset_of(name)
    }

    /// Returns `true` if both parts of `child` begin with this class's parts.
    #[must_use]
    pub fn is_prefix_of(&self, child: &ClassDescriptor) -> bool {
        self.const_part.is_prefix_of(&child.const_part)
            && self.var_part.is_prefix_of(&child.var_part)
    }

    /// Checks the declared parts against the Rust types that store them.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] with `DECLARED_SIZE_MISMATCH` when the size or
    /// alignment of `C` or `V` differs from the declared part.
    pub fn check_types<C, V>(&self) -> Result<()> {
        self.check_storage(size_of::<C>(), align_of::<C>(), size_of::<V>(), align_of::<V>())
    }

    /// Checks the declared parts against raw storage sizes and alignments.
    ///
    /// # Errors
    ///
    /// See [`ClassDescriptor::check_types`].
    pub fn check_storage(
        &self,
        const_size: usize,
        const_align: usize,
        var_size: usize,
        var_align: usize,
    ) -> Result<()> {
        if self.const_part.size != const_size || self.const_part.align != const_align {
            return Err(layout_error(self.name, "const", LayoutViolation::SizeMismatch));
        }
        if self.var_part.size != var_size || self.var_part.align != var_align {
            return Err(layout_error(self.name, "var", LayoutViolation::SizeMismatch));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::mem::offset_of;

    use super::*;

    #[repr(C)]
    struct BaseVar {
        a: u32,
        b: u8,
    }

    #[repr(C)]
    struct DerivedVar {
        super_: BaseVar,
        c:      u16,
    }

    const BASE_VAR: &[FieldDecl] = &[field::<u32>("a"), field::<u8>("b")];
    const DERIVED_VAR: &[FieldDecl] = &[field::<u32>("a"), field::<u8>("b"), field::<u16>("c")];

    fn base() -> ClassDescriptor {
        ClassDescriptor::define("Base", &[], BASE_VAR, None).unwrap()
    }

    #[test]
    fn test_offsets_follow_repr_c() {
        let base = base();
        let derived = ClassDescriptor::define("Derived", &[], DERIVED_VAR, Some(&base)).unwrap();

        assert_eq!(base.offset_of(Part::Var, "a"), Some(offset_of!(BaseVar, a)));
        assert_eq!(base.offset_of(Part::Var, "b"), Some(offset_of!(BaseVar, b)));
        assert_eq!(base.var_part().size(), size_of::<BaseVar>());
        assert_eq!(derived.offset_of(Part::Var, "c"), Some(offset_of!(DerivedVar, c)));
        assert_eq!(derived.var_part().size(), size_of::<DerivedVar>());
        derived.check_types::<(), DerivedVar>().unwrap();
    }

    #[test]
    fn test_derived_begins_with_parent() {
        let base = base();
        let derived = ClassDescriptor::define("Derived", &[], DERIVED_VAR, Some(&base)).unwrap();

        assert!(base.is_prefix_of(&derived));
        assert!(!derived.is_prefix_of(&base));
        assert_eq!(derived.var_part().inherited_fields(), base.var_part().fields());
        assert_eq!(derived.var_part().own_fields().len(), 1);
        assert_eq!(derived.parent(), Some("Base"));
        assert_eq!(derived.depth(), 1);
    }

    #[test]
    fn test_prefix_mismatch_rejected() {
        let base = base();
        let wrong = [field::<u32>("a"), field::<u16>("b"), field::<u16>("c")];
        let err = ClassDescriptor::define("Derived", &[], &wrong, Some(&base)).unwrap_err();
        assert_eq!(err.code, codes::PREFIX_MISMATCH);
        assert_eq!(err.subject, "Derived");
        assert_eq!(err.detail, "b");

        let missing = [field::<u32>("a")];
        let err = ClassDescriptor::define("Derived", &[], &missing, Some(&base)).unwrap_err();
        assert_eq!(err.code, codes::PREFIX_MISMATCH);
        assert_eq!(err.detail, "b");
    }

    #[test]
    fn test_const_part_checked_independently() {
        let parent =
            ClassDescriptor::define("Sensor", &[field::<u16>("id")], &[], None).unwrap();
        let err = ClassDescriptor::define("Probe", &[], &[], Some(&parent)).unwrap_err();
        assert_eq!(err.code, codes::PREFIX_MISMATCH);
        assert_eq!(err.detail, "id");
    }

    #[test]
    fn test_ascending_fields_rejected() {
        let err = ClassDescriptor::define(
            "Bad",
            &[field::<u8>("small"), field::<u64>("large")],
            &[],
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, codes::FIELD_ORDER_VIOLATION);
        assert_eq!(err.detail, "large");
    }

    #[test]
    fn test_order_applies_to_own_fields_only() {
        // Inherited u8 followed by an own u16 is fine.
        let base = base();
        assert!(ClassDescriptor::define("Derived", &[], DERIVED_VAR, Some(&base)).is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let base = base();
        let dup = [field::<u32>("a"), field::<u8>("b"), field::<u8>("a")];
        let err = ClassDescriptor::define("Derived", &[], &dup, Some(&base)).unwrap_err();
        assert_eq!(err.code, codes::DUPLICATE_FIELD);
    }

    #[test]
    fn test_invalid_alignment_rejected() {
        let err =
            ClassDescriptor::define("Odd", &[FieldDecl::new("x", 3, 3)], &[], None).unwrap_err();
        assert_eq!(err.code, codes::INVALID_ALIGNMENT);
    }

    #[test]
    fn test_padding_accounted() {
        let desc = ClassDescriptor::define("Base", &[], BASE_VAR, None).unwrap();
        // 4 + 1 bytes of data, size rounded up to 8
        assert_eq!(desc.var_part().size(), 8);
        assert_eq!(desc.var_part().padding(), 3);
        assert_eq!(desc.const_part().size(), 0);
        assert_eq!(desc.const_part().align(), 1);
    }

    #[test]
    fn test_size_mismatch_detected() {
        let desc = base();
        let err = desc.check_types::<(), u32>().unwrap_err();
        assert_eq!(err.code, codes::DECLARED_SIZE_MISMATCH);
        assert_eq!(err.detail, "var");
    }

    #[test]
    fn test_field_lookup() {
        let desc = base();
        assert_eq!(desc.var_part().field("b").unwrap().offset, 4);
        assert_eq!(desc.var_part().field("zz").unwrap_err().code, codes::FIELD_NOT_FOUND);
    }

    #[test]
    fn test_too_many_fields() {
        const NAMES: [&str; 33] = [
            "f00", "f01", "f02", "f03", "f04", "f05", "f06", "f07", "f08", "f09", "f10", "f11",
            "f12", "f13", "f14", "f15", "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23",
            "f24", "f25", "f26", "f27", "f28", "f29", "f30", "f31", "f32",
        ];
        let mut many = [field::<u8>("f"); MAX_FIELDS_PER_PART + 1];
        for (decl, name) in many.iter_mut().zip(NAMES) {
            decl.name = name;
        }
        let err = ClassDescriptor::define("Wide", &many, &[], None).unwrap_err();
        assert!(err.is_capacity_error());
        assert!(ClassDescriptor::define("Full", &many[..MAX_FIELDS_PER_PART], &[], None).is_ok());
    }
}
