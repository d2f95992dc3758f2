// ECM - ecm-model
// Module: Class registry
// SW-REQ-ID: REQ_DECL_002
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Registry of declared classes and interfaces.
//!
//! The registry resolves names, walks parent chains and runs the
//! declaration-level checks the composition root needs: parents exist, the
//! inheritance graph is a tree, layouts define cleanly against their
//! parents, concrete classes implement every inherited abstract operation
//! and every operation of the interfaces they realize, association targets
//! exist, and event signatures agree between senders and receivers.

use ecm_error::{
    kinds::{
        duplicate_class_error, duplicate_interface_error, event_signature_mismatch_error,
        unknown_parent_error, unknown_target_error, unrealized_operation_error,
    },
    CompositionCycleError, Error, Result, UnboundDispatchError,
};
use ecm_foundation::{
    limits::{MAX_CLASSES, MAX_INTERFACES, MAX_OPERATIONS},
    StaticMap, StaticVec,
};

use crate::{
    decl::{ClassDecl, InterfaceDecl},
    layout::ClassDescriptor,
};

/// Parent chain of a class, the class itself first
pub type Ancestry<'a> = StaticVec<&'a ClassDecl, MAX_CLASSES>;

/// Defined layouts by class name
pub type DescriptorMap = StaticMap<&'static str, ClassDescriptor, MAX_CLASSES>;

/// Declared classes and interfaces, keyed by name
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes:    StaticMap<&'static str, ClassDecl, MAX_CLASSES>,
    interfaces: StaticMap<&'static str, InterfaceDecl, MAX_INTERFACES>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { classes: StaticMap::new(), interfaces: StaticMap::new() }
    }

    /// Declares a class.
    ///
    /// Walks the parent chain through the classes declared so far; a chain
    /// leading back to the new class is rejected immediately.
    ///
    /// # Errors
    ///
    /// - `DUPLICATE_CLASS` if the name is taken by a class or interface
    /// - [`CompositionCycleError`] if the new class closes a cycle
    /// - a capacity error past `MAX_CLASSES` or `MAX_OPERATIONS`
    pub fn declare_class(&mut self, decl: ClassDecl) -> Result<()> {
        if self.classes.contains_key(&decl.name) || self.interfaces.contains_key(&decl.name) {
            return Err(duplicate_class_error(decl.name));
        }
        check_operation_count(decl.name, decl.operations)?;

        let mut current = decl.parent;
        let mut steps = 0;
        while let Some(name) = current {
            if name == decl.name || steps > self.classes.len() {
                return Err(CompositionCycleError { class: decl.name }.into());
            }
            current = self.classes.get(&name).and_then(|c| c.parent);
            steps += 1;
        }

        self.classes.insert(decl.name, decl)?;
        Ok(())
    }

    /// Declares an interface.
    ///
    /// # Errors
    ///
    /// - `DUPLICATE_INTERFACE` if the name is taken by a class or interface
    /// - a capacity error past `MAX_INTERFACES` or `MAX_OPERATIONS`
    pub fn declare_interface(&mut self, decl: InterfaceDecl) -> Result<()> {
        if self.interfaces.contains_key(&decl.name) || self.classes.contains_key(&decl.name) {
            return Err(duplicate_interface_error(decl.name));
        }
        check_operation_count(decl.name, decl.operations)?;
        self.interfaces.insert(decl.name, decl)?;
        Ok(())
    }

    /// Looks a class up by name.
    #[must_use]
    pub fn class(&self, name: &'static str) -> Option<&ClassDecl> {
        self.classes.get(&name)
    }

    /// Looks an interface up by name.
    #[must_use]
    pub fn interface(&self, name: &'static str) -> Option<&InterfaceDecl> {
        self.interfaces.get(&name)
    }

    /// Declared classes in name order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values()
    }

    /// Number of declared classes.
    #[must_use]
    pub const fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of declared interfaces.
    #[must_use]
    pub const fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    /// Checks that every parent name resolves.
    ///
    /// # Errors
    ///
    /// Returns `UNKNOWN_PARENT` for the first class whose parent is missing.
    pub fn check_parents(&self) -> Result<()> {
        for decl in self.classes.values() {
            if let Some(parent) = decl.parent {
                if !self.classes.contains_key(&parent) {
                    return Err(unknown_parent_error(decl.name, parent));
                }
            }
        }
        Ok(())
    }

    /// Checks that the inheritance graph is a forest.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionCycleError`] naming a class whose parent chain
    /// returns to it or never ends.
    pub fn check_acyclic(&self) -> Result<()> {
        for decl in self.classes.values() {
            let mut current = decl.parent;
            let mut steps = 0;
            while let Some(name) = current {
                if name == decl.name || steps > self.classes.len() {
                    return Err(CompositionCycleError { class: decl.name }.into());
                }
                current = self.classes.get(&name).and_then(|c| c.parent);
                steps += 1;
            }
        }
        Ok(())
    }

    /// Parent chain of `name`, the class itself first and the root last.
    ///
    /// # Errors
    ///
    /// - `UNKNOWN_PARENT` (or `UNKNOWN_TARGET` for `name` itself) when a
    ///   name does not resolve
    /// - [`CompositionCycleError`] when the chain does not end
    pub fn ancestry(&self, name: &'static str) -> Result<Ancestry<'_>> {
        let mut chain = Ancestry::new();
        let mut current =
            self.classes.get(&name).ok_or(unknown_target_error(name, name))?;
        loop {
            if chain.len() > self.classes.len() {
                return Err(CompositionCycleError { class: name }.into());
            }
            chain.push(current)?;
            match current.parent {
                Some(parent) => {
                    current = self
                        .classes
                        .get(&parent)
                        .ok_or(unknown_parent_error(current.name, parent))?;
                },
                None => return Ok(chain),
            }
        }
    }

    /// Returns `true` if `class` or one of its ancestors realizes
    /// `interface`.
    #[must_use]
    pub fn realizes(&self, class: &'static str, interface: &str) -> bool {
        self.ancestry(class)
            .map(|chain| chain.iter().any(|c| c.interfaces.iter().any(|i| *i == interface)))
            .unwrap_or(false)
    }

    /// Returns `true` if `class` is `ancestor` or inherits from it.
    #[must_use]
    pub fn is_a(&self, class: &'static str, ancestor: &str) -> bool {
        self.ancestry(class)
            .map(|chain| chain.iter().any(|c| c.name == ancestor))
            .unwrap_or(false)
    }

    /// Defines every declared class's layout, parents before children.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`](ecm_error::LayoutError) found, or a
    /// resolution error from [`ClassRegistry::ancestry`].
    pub fn define_all(&self) -> Result<DescriptorMap> {
        let mut defined = DescriptorMap::new();
        for decl in self.classes.values() {
            if defined.contains_key(&decl.name) {
                continue;
            }
            let chain = self.ancestry(decl.name)?;
            for class in chain.iter().rev() {
                if defined.contains_key(&class.name) {
                    continue;
                }
                #[cfg(feature = "tracing")]
                let _span = ecm_foundation::tracing::CompositionTrace::defining(class.name).entered();
                let parent = match class.parent {
                    Some(parent) => {
                        Some(defined.get(&parent).ok_or(unknown_parent_error(class.name, parent))?)
                    },
                    None => None,
                };
                let descriptor = ClassDescriptor::define(
                    class.name,
                    class.const_fields,
                    class.var_fields,
                    parent,
                )?;
                defined.insert(class.name, descriptor)?;
            }
        }
        Ok(defined)
    }

    /// Checks that every concrete class implements each abstract operation
    /// of its ancestry.
    ///
    /// An operation counts as implemented when the introducing class or one
    /// of its descendants on the chain lists it in `implements`.
    ///
    /// # Errors
    ///
    /// Returns [`UnboundDispatchError`] for the first missing operation.
    pub fn check_dispatch(&self) -> Result<()> {
        for decl in self.classes.values().filter(|c| !c.is_abstract) {
            let chain = self.ancestry(decl.name)?;
            for (depth, introducer) in chain.iter().enumerate() {
                for &op in introducer.operations {
                    let implemented = chain
                        .as_slice()
                        .get(..=depth)
                        .unwrap_or(&[])
                        .iter()
                        .any(|c| c.implements.contains(&op));
                    if !implemented {
                        return Err(UnboundDispatchError { class: decl.name, operation: op }.into());
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks realized interfaces: each must be declared, and concrete
    /// classes must implement all of its operations.
    ///
    /// # Errors
    ///
    /// - `UNKNOWN_TARGET` for an undeclared interface
    /// - `UNREALIZED_INTERFACE_OPERATION` for a missing operation
    pub fn check_realizations(&self) -> Result<()> {
        for decl in self.classes.values() {
            let chain = self.ancestry(decl.name)?;
            for &name in chain.iter().flat_map(|c| c.interfaces.iter()) {
                let interface =
                    self.interfaces.get(&name).ok_or(unknown_target_error(decl.name, name))?;
                if decl.is_abstract {
                    continue;
                }
                for &op in interface.operations {
                    if !chain.iter().any(|c| c.implements.contains(&op)) {
                        return Err(unrealized_operation_error(decl.name, op));
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks that every association targets a declared class or interface.
    ///
    /// # Errors
    ///
    /// Returns `UNKNOWN_TARGET` for the first unresolved target.
    pub fn check_associations(&self) -> Result<()> {
        for decl in self.classes.values() {
            for assoc in decl.associations {
                if !self.classes.contains_key(&assoc.target)
                    && !self.interfaces.contains_key(&assoc.target)
                {
                    return Err(unknown_target_error(decl.name, assoc.target));
                }
            }
        }
        Ok(())
    }

    /// Checks that every declaration of an event, sent or received, uses
    /// the same parameters as the sent declarations of that name.
    ///
    /// # Errors
    ///
    /// Returns `EVENT_SIGNATURE_MISMATCH` naming the disagreeing class.
    pub fn check_events(&self) -> Result<()> {
        for decl in self.classes.values() {
            for event in decl.receives.iter().chain(decl.sends.iter()) {
                let disagrees = self
                    .classes
                    .values()
                    .flat_map(|sender| sender.sends.iter())
                    .any(|sent| sent.name == event.name && sent.params != event.params);
                if disagrees {
                    return Err(event_signature_mismatch_error(decl.name, event.name));
                }
            }
        }
        Ok(())
    }
}

fn check_operation_count(owner: &'static str, operations: &[&'static str]) -> Result<()> {
    if operations.len() > MAX_OPERATIONS {
        return Err(Error::capacity_exceeded("Too many operations").with_subject(owner));
    }
    Ok(())
}
