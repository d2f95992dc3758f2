// ECM - ecm-model
// Module: Composition root
// SW-REQ-ID: REQ_COMPOSE_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The composition root: one-time assembly and validation at startup.
//!
//! The startup routine registers class declarations, binds associations,
//! wires events and lists the operation tables in use, all through one
//! [`CompositionRoot`]. [`CompositionRoot::compose`] then validates the
//! whole graph and produces an [`Image`]:
//!
//! 1. the inheritance graph resolves and is acyclic;
//! 2. every declared layout begins with its parent's, and typed classes
//!    match their declarations;
//! 3. every registered mandatory association, event slot, forwarder and
//!    table slot is bound, and declared classes implement what they must;
//! 4. every mandatory association and sent event a concrete class declares
//!    is carried by a registered, bound slot named `"<Class>.<member>"`,
//!    where `<Class>` is the class or one of its subclasses.
//!
//! `compose` consumes the root, so validation runs once per root; on any
//! error no image exists. Bindings made while building the root stay in
//! place even when composition fails, so startup code must not serve calls
//! until [`install`] has returned the process-wide image.

use core::{
    fmt,
    mem::{align_of, size_of},
};

use ecm_error::{
    kinds::{undeclared_slot_error, unknown_target_error},
    Error, Result, SlotKind, UnboundAssociationError,
};
use ecm_foundation::{
    limits::{MAX_CLASSES, MAX_SLOTS, MAX_VTABLES},
    StaticVec,
};
use ecm_sync::EcmOnce;

use crate::{
    association::{Association, Multiplicity, Slot},
    decl::{ClassDecl, Declared, InterfaceDecl},
    event::{Emit, EventSlot, Forwarder, Receive},
    interface::RealizationInfo,
    layout::ClassDescriptor,
    registry::{ClassRegistry, DescriptorMap},
    vtable::DispatchTable,
};

/// Storage of a typed class, checked against its declaration
#[derive(Debug, Clone, Copy)]
struct TypedStorage {
    class:       &'static str,
    const_size:  usize,
    const_align: usize,
    var_size:    usize,
    var_align:   usize,
}

/// Collects everything the startup routine wires, then validates it once
pub struct CompositionRoot {
    registry:     ClassRegistry,
    typed:        StaticVec<TypedStorage, MAX_CLASSES>,
    slots:        StaticVec<&'static dyn Slot, MAX_SLOTS>,
    vtables:      StaticVec<&'static dyn DispatchTable, MAX_VTABLES>,
    realizations: StaticVec<&'static dyn RealizationInfo, MAX_SLOTS>,
}

impl fmt::Debug for CompositionRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionRoot")
            .field("registry", &self.registry)
            .field("typed", &self.typed)
            .field("slots", &self.slots.len())
            .field("vtables", &self.vtables.len())
            .field("realizations", &self.realizations.len())
            .finish()
    }
}

impl Default for CompositionRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionRoot {
    /// Creates an empty root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry:     ClassRegistry::new(),
            typed:        StaticVec::new(),
            slots:        StaticVec::new(),
            vtables:      StaticVec::new(),
            realizations: StaticVec::new(),
        }
    }

    /// Declares a class.
    ///
    /// # Errors
    ///
    /// See [`ClassRegistry::declare_class`].
    pub fn class(&mut self, decl: ClassDecl) -> Result<&mut Self> {
        self.registry.declare_class(decl)?;
        Ok(self)
    }

    /// Declares a typed class; composition also checks that its `Const` and
    /// `Var` types match the declared layout.
    ///
    /// # Errors
    ///
    /// See [`ClassRegistry::declare_class`].
    pub fn declare<K: Declared>(&mut self) -> Result<&mut Self> {
        self.registry.declare_class(K::DECL)?;
        self.typed.push(TypedStorage {
            class:       K::DECL.name,
            const_size:  size_of::<K::Const>(),
            const_align: align_of::<K::Const>(),
            var_size:    size_of::<K::Var>(),
            var_align:   align_of::<K::Var>(),
        })?;
        Ok(self)
    }

    /// Declares an interface.
    ///
    /// # Errors
    ///
    /// See [`ClassRegistry::declare_interface`].
    pub fn interface(&mut self, decl: InterfaceDecl) -> Result<&mut Self> {
        self.registry.declare_interface(decl)?;
        Ok(self)
    }

    /// Registers a slot for the binding check, without binding it.
    ///
    /// # Errors
    ///
    /// Returns a capacity error past `MAX_SLOTS`.
    pub fn slot(&mut self, slot: &'static dyn Slot) -> Result<&mut Self> {
        self.slots.push(slot)?;
        Ok(self)
    }

    /// Binds an association and registers it.
    ///
    /// # Errors
    ///
    /// Returns `ASSOCIATION_ALREADY_BOUND` on a second bind, or a capacity
    /// error past `MAX_SLOTS`.
    pub fn bind<T, M>(
        &mut self,
        association: &'static Association<T, M>,
        target: &'static T,
    ) -> Result<&mut Self>
    where
        T: ?Sized + Sync + 'static,
        M: Multiplicity,
    {
        association.bind(target)?;
        self.slot(association)
    }

    /// Wires a forwarder's receivers and registers it.
    ///
    /// # Errors
    ///
    /// See [`Forwarder::wire`]; also a capacity error past `MAX_SLOTS`.
    pub fn wire<E: 'static, const N: usize>(
        &mut self,
        forwarder: &'static Forwarder<E, N>,
        receivers: &[&'static dyn Receive<E>],
    ) -> Result<&mut Self> {
        forwarder.wire(receivers)?;
        self.slot(forwarder)
    }

    /// Connects a sender's event slot and registers it.
    ///
    /// # Errors
    ///
    /// See [`EventSlot::connect`]; also a capacity error past `MAX_SLOTS`.
    pub fn connect<E: 'static>(
        &mut self,
        slot: &'static EventSlot<E>,
        target: &'static dyn Emit<E>,
    ) -> Result<&mut Self> {
        slot.connect(target)?;
        self.slot(slot)
    }

    /// Registers an operation table for the completeness check.
    ///
    /// # Errors
    ///
    /// Returns a capacity error past `MAX_VTABLES`.
    pub fn vtable(&mut self, table: &'static dyn DispatchTable) -> Result<&mut Self> {
        self.vtables.push(table)?;
        Ok(self)
    }

    /// Registers a published interface realization.
    ///
    /// # Errors
    ///
    /// Returns a capacity error past `MAX_SLOTS`.
    pub fn realization(&mut self, realization: &'static dyn RealizationInfo) -> Result<&mut Self> {
        self.realizations.push(realization)?;
        Ok(self)
    }

    /// Validates the graph and produces the image.
    ///
    /// Bindings made through the root are already live; a failed
    /// composition does not undo them. Startup code serves calls only after
    /// [`install`] has kept the image.
    ///
    /// # Errors
    ///
    /// Returns the first violation found; see the module documentation for
    /// the order of checks.
    pub fn compose(self) -> Result<Image> {
        ecm_foundation::enter_span!(ecm_foundation::tracing::CompositionTrace::composing(
            self.registry.class_count(),
            self.slots.len(),
            self.vtables.len()
        ));

        let result = self.validate();

        #[cfg(feature = "tracing")]
        match &result {
            Ok(image) => ecm_foundation::trace_event!(
                INFO,
                classes = image.class_count(),
                slots = image.slot_count(),
                vtables = image.vtable_count(),
                "composition complete"
            ),
            Err(error) => ecm_foundation::trace_event!(
                WARN,
                code = error.code,
                subject = error.subject,
                detail = error.detail,
                "composition rejected: {}",
                error.message
            ),
        }

        result
    }

    fn validate(&self) -> Result<Image> {
        {
            ecm_foundation::enter_span!(ecm_foundation::tracing::CompositionTrace::phase("graph"));
            self.registry.check_parents()?;
            self.registry.check_acyclic()?;
        }

        let descriptors = {
            ecm_foundation::enter_span!(ecm_foundation::tracing::CompositionTrace::phase("layout"));
            let descriptors = self.registry.define_all()?;
            self.check_typed(&descriptors)?;
            descriptors
        };

        {
            ecm_foundation::enter_span!(ecm_foundation::tracing::CompositionTrace::phase(
                "bindings"
            ));
            self.check_slots()?;
            for table in &self.vtables {
                table.check()?;
            }
            self.registry.check_dispatch()?;
            self.registry.check_realizations()?;
            self.registry.check_associations()?;
            self.registry.check_events()?;
            self.check_declared_slots()?;
            self.check_realizations()?;
        }

        Ok(Image {
            descriptors,
            interfaces: self.registry.interface_count(),
            slots: self.slots.len(),
            vtables: self.vtables.len(),
            realizations: self.realizations.len(),
        })
    }

    fn check_typed(&self, descriptors: &DescriptorMap) -> Result<()> {
        for typed in &self.typed {
            let descriptor = descriptors
                .get(&typed.class)
                .ok_or(unknown_target_error(typed.class, typed.class))?;
            descriptor.check_storage(
                typed.const_size,
                typed.const_align,
                typed.var_size,
                typed.var_align,
            )?;
        }
        Ok(())
    }

    fn check_slots(&self) -> Result<()> {
        for slot in &self.slots {
            if slot.is_mandatory() && !slot.is_bound() {
                return Err(UnboundAssociationError { slot: slot.name(), kind: slot.kind() }.into());
            }
            if let Some(forwarder) = slot.unwired_target() {
                return Err(
                    UnboundAssociationError { slot: forwarder, kind: SlotKind::Forwarder }.into()
                );
            }
        }
        Ok(())
    }

    fn check_declared_slots(&self) -> Result<()> {
        for decl in self.registry.classes().filter(|c| !c.is_abstract) {
            for class in &self.registry.ancestry(decl.name)? {
                for assoc in class.associations.iter().filter(|a| a.mandatory) {
                    self.require_slot(decl.name, assoc.field, SlotKind::Association)?;
                }
                for event in class.sends {
                    self.require_slot(decl.name, event.name, SlotKind::EventSlot)?;
                }
            }
        }
        Ok(())
    }

    // A slot of `class` or a subclass, bound and of the right kind.
    fn require_slot(
        &self,
        class: &'static str,
        member: &'static str,
        kind: SlotKind,
    ) -> Result<()> {
        let carried = self.slots.iter().any(|slot| {
            slot.kind() == kind
                && slot.is_bound()
                && slot
                    .owner()
                    .is_some_and(|(owner, name)| name == member && self.registry.is_a(owner, class))
        });
        if carried {
            Ok(())
        } else {
            Err(undeclared_slot_error(class, member, kind))
        }
    }

    // A realization by a declared class must be declared by that class.
    fn check_realizations(&self) -> Result<()> {
        for realization in &self.realizations {
            let class = realization.class();
            if self.registry.class(class).is_some()
                && !self.registry.realizes(class, realization.interface())
            {
                return Err(unknown_target_error(class, realization.interface()));
            }
        }
        Ok(())
    }
}

/// A validated object graph
#[derive(Debug)]
pub struct Image {
    descriptors:  DescriptorMap,
    interfaces:   usize,
    slots:        usize,
    vtables:      usize,
    realizations: usize,
}

impl Image {
    /// Layout of a declared class.
    #[must_use]
    pub fn descriptor(&self, class: &'static str) -> Option<&ClassDescriptor> {
        self.descriptors.get(&class)
    }

    /// All class layouts in name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.descriptors.values()
    }

    /// Number of declared classes.
    #[must_use]
    pub const fn class_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Number of declared interfaces.
    #[must_use]
    pub const fn interface_count(&self) -> usize {
        self.interfaces
    }

    /// Number of registered slots.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        self.slots
    }

    /// Number of registered operation tables.
    #[must_use]
    pub const fn vtable_count(&self) -> usize {
        self.vtables
    }

    /// Number of registered realizations.
    #[must_use]
    pub const fn realization_count(&self) -> usize {
        self.realizations
    }
}

static INSTALLED: EcmOnce<Image> = EcmOnce::new();

/// Composes `root` and keeps the image for the rest of the program.
///
/// # Errors
///
/// Returns `ALREADY_COMPOSED` if an image is already installed, otherwise
/// any error from [`CompositionRoot::compose`].
pub fn install(root: CompositionRoot) -> Result<&'static Image> {
    if INSTALLED.is_initialized() {
        return Err(Error::ALREADY_COMPOSED);
    }
    let image = root.compose()?;
    INSTALLED.set(image).map_err(|_| Error::ALREADY_COMPOSED)?;
    INSTALLED.get().ok_or(Error::ALREADY_COMPOSED)
}

/// The installed image, once [`install`] has succeeded.
#[must_use]
pub fn installed() -> Option<&'static Image> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    use ecm_error::{codes, SlotKind};

    use super::*;
    use crate::{
        decl::AssociationDecl,
        layout::field,
        vtable::{AbstractClass, OpId, VTable},
    };

    const SHAPE: ClassDecl = ClassDecl::new("Shape")
        .abstract_class()
        .var_fields(&[field::<i32>("x"), field::<i32>("y")])
        .operations(&["area"]);

    const CIRCLE: ClassDecl = ClassDecl::new("Circle")
        .parent("Shape")
        .var_fields(&[field::<i32>("x"), field::<i32>("y"), field::<u16>("r")])
        .implements(&["area"])
        .associations(&[AssociationDecl::mandatory("canvas", "Canvas")]);

    const CANVAS: ClassDecl = ClassDecl::new("Canvas");

    struct Canvas;

    #[test]
    fn test_compose_valid_graph() {
        static CANVAS_OBJ: Canvas = Canvas;
        static LINK: Association<Canvas> = Association::mandatory("Circle.canvas");

        let mut root = CompositionRoot::new();
        root.class(SHAPE).unwrap().class(CIRCLE).unwrap().class(CANVAS).unwrap();
        root.bind(&LINK, &CANVAS_OBJ).unwrap();

        let image = root.compose().unwrap();
        assert_eq!(image.class_count(), 3);
        assert_eq!(image.slot_count(), 1);
        let shape = image.descriptor("Shape").unwrap();
        assert!(shape.is_prefix_of(image.descriptor("Circle").unwrap()));
    }

    #[test]
    fn test_unbound_mandatory_association_yields_no_image() {
        static LINK: Association<Canvas> = Association::mandatory("Circle.canvas");

        let mut root = CompositionRoot::new();
        root.class(CANVAS).unwrap().slot(&LINK).unwrap();
        let err = root.compose().unwrap_err();
        let expected =
            Error::from(UnboundAssociationError { slot: "Circle.canvas", kind: SlotKind::Association });
        assert_eq!(err, expected);
        assert!(err.is_unbound_association());
    }

    #[test]
    fn test_unbound_optional_association_composes() {
        static LINK: Association<Canvas, crate::association::Optional> =
            Association::optional("Circle.backdrop");

        let mut root = CompositionRoot::new();
        root.slot(&LINK).unwrap();
        assert!(root.compose().is_ok());
        assert!(LINK.get().is_none());
    }

    #[test]
    fn test_declared_association_without_slot_rejected() {
        const LAMP: ClassDecl = ClassDecl::new("Lamp")
            .associations(&[AssociationDecl::mandatory("switch", "Relay")]);
        const RELAY: ClassDecl = ClassDecl::new("Relay");

        let mut root = CompositionRoot::new();
        root.class(LAMP).unwrap().class(RELAY).unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.code, codes::UNBOUND_ASSOCIATION);
        assert_eq!(err.subject, "Lamp");
        assert_eq!(err.detail, "switch");
    }

    #[test]
    fn test_declared_association_needs_a_bound_slot() {
        const KNOB: ClassDecl =
            ClassDecl::new("Knob").associations(&[AssociationDecl::mandatory("canvas", "Canvas")]);
        static LINK: Association<Canvas, crate::association::Optional> =
            Association::optional("Knob.canvas");

        // registered under the right name, but optional and left empty
        let mut root = CompositionRoot::new();
        root.class(KNOB).unwrap().class(CANVAS).unwrap().slot(&LINK).unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.code, codes::UNBOUND_ASSOCIATION);
        assert_eq!(err.subject, "Knob");
    }

    #[test]
    fn test_subclass_slot_carries_inherited_association() {
        const WIDGET: ClassDecl = ClassDecl::new("Widget")
            .associations(&[AssociationDecl::mandatory("canvas", "Canvas")]);
        const BUTTON: ClassDecl = ClassDecl::new("Button").parent("Widget");
        static CANVAS_OBJ: Canvas = Canvas;
        static BUTTON_LINK: Association<Canvas> = Association::mandatory("Button.canvas");
        static WIDGET_LINK: Association<Canvas> = Association::mandatory("Widget.canvas");

        let mut root = CompositionRoot::new();
        root.class(WIDGET).unwrap().class(BUTTON).unwrap().class(CANVAS).unwrap();
        root.bind(&BUTTON_LINK, &CANVAS_OBJ).unwrap();
        assert!(root.compose().is_ok());

        // a parent's slot does not cover the subclass
        let mut root = CompositionRoot::new();
        root.class(WIDGET).unwrap().class(BUTTON).unwrap().class(CANVAS).unwrap();
        root.bind(&WIDGET_LINK, &CANVAS_OBJ).unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.subject, "Button");
        assert_eq!(err.detail, "canvas");
    }

    #[test]
    fn test_optional_declared_association_needs_no_slot() {
        const LOGGER: ClassDecl =
            ClassDecl::new("Logger").associations(&[AssociationDecl::optional("backup", "Canvas")]);

        let mut root = CompositionRoot::new();
        root.class(LOGGER).unwrap().class(CANVAS).unwrap();
        assert!(root.compose().is_ok());
    }

    #[test]
    fn test_sent_event_without_slot_rejected() {
        const BUTTON: ClassDecl =
            ClassDecl::new("Button").sends(&[crate::decl::EventDecl::new("Pressed", &["u8"])]);
        struct Pressed;
        struct Sink;
        impl Receive<Pressed> for Sink {
            fn receive(&self, _event: &Pressed) {}
        }
        static SINK: Sink = Sink;
        static FWD: Forwarder<Pressed, 1> = Forwarder::new("Button.fan_out");
        static SLOT: EventSlot<Pressed> = EventSlot::new("Button.Pressed");

        let mut root = CompositionRoot::new();
        root.class(BUTTON).unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.code, codes::UNBOUND_EVENT_SLOT);
        assert_eq!(err.subject, "Button");
        assert_eq!(err.detail, "Pressed");

        let mut root = CompositionRoot::new();
        root.class(BUTTON).unwrap().wire(&FWD, &[&SINK]).unwrap().connect(&SLOT, &FWD).unwrap();
        assert!(root.compose().is_ok());
    }

    #[test]
    fn test_slot_behind_unwired_forwarder_rejected() {
        struct Tick;
        static FWD: Forwarder<Tick, 2> = Forwarder::new("Timer.fan_out");
        static SLOT: EventSlot<Tick> = EventSlot::new("Timer.Tick");

        let mut root = CompositionRoot::new();
        root.connect(&SLOT, &FWD).unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.code, codes::UNWIRED_FORWARDER);
        assert_eq!(err.subject, "Timer.fan_out");
        assert!(err.is_unbound_association());
    }

    #[test]
    fn test_unbound_vtable_slot_rejected() {
        static CONTRACT: AbstractClass<2> = AbstractClass::new("Shape", ["area", "draw"]);
        const AREA: OpId = CONTRACT.op(0);
        static TABLE: VTable<u32, (), u32, 2> =
            VTable::new(&CONTRACT, "Square").bind(AREA, |s: &u32, ()| s * s);

        let mut root = CompositionRoot::new();
        root.vtable(&TABLE).unwrap();
        let err = root.compose().unwrap_err();
        assert!(err.is_unbound_dispatch());
        assert_eq!(err.detail, "draw");
    }

    #[test]
    fn test_layout_error_rejects_composition() {
        const BAD: ClassDecl = ClassDecl::new("Bad")
            .parent("Shape")
            .var_fields(&[field::<i32>("y"), field::<i32>("x")]);

        let mut root = CompositionRoot::new();
        root.class(SHAPE).unwrap().class(BAD).unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.code, codes::PREFIX_MISMATCH);
        assert_eq!(err.subject, "Bad");
    }

    #[test]
    fn test_typed_class_must_match_declaration() {
        struct Counter;
        impl crate::inherit::Class for Counter {
            const NAME: &'static str = "Counter";
            type Const = ();
            type Var = u64;
        }
        impl Declared for Counter {
            const DECL: ClassDecl = ClassDecl::new("Counter").var_fields(&[field::<u32>("n")]);
        }

        let mut root = CompositionRoot::new();
        root.declare::<Counter>().unwrap();
        let err = root.compose().unwrap_err();
        assert_eq!(err.code, codes::DECLARED_SIZE_MISMATCH);
        assert_eq!(err.subject, "Counter");
    }
}
