//! Write-only sink for native layout constraints.
//!
//! The binder describes constraints with [`NativeConstraint`] values and
//! receives opaque [`ConstraintHandle`]s back. It never reads native state.

use std::collections::HashMap;
use trellis_types::{ComponentId, LayoutAttribute};

/// A view a constraint can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewRef {
    Component(ComponentId),
    /// Auxiliary spacer created by the host for proportional edges.
    Spacer(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintRelation {
    Equal,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

/// Constraint priority on the usual 0..=1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LayoutPriority(pub f32);

impl LayoutPriority {
    pub const REQUIRED: LayoutPriority = LayoutPriority(1000.0);
    pub const DEFAULT_HIGH: LayoutPriority = LayoutPriority(750.0);
    pub const DEFAULT_LOW: LayoutPriority = LayoutPriority(250.0);

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn offset(self, delta: f32) -> LayoutPriority {
        LayoutPriority(self.0 + delta)
    }
}

/// `item.attribute <relation> related_item.related_attribute * multiplier + constant`
#[derive(Debug, Clone, PartialEq)]
pub struct NativeConstraint {
    pub item: ViewRef,
    pub attribute: LayoutAttribute,
    pub relation: ConstraintRelation,
    pub related_item: Option<ViewRef>,
    pub related_attribute: LayoutAttribute,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: LayoutPriority,
}

impl NativeConstraint {
    /// A required `item.attribute == constant` constraint.
    pub fn fixed(item: ViewRef, attribute: LayoutAttribute, constant: f64) -> Self {
        Self {
            item,
            attribute,
            relation: ConstraintRelation::Equal,
            related_item: None,
            related_attribute: LayoutAttribute::NotAnAttribute,
            multiplier: 1.0,
            constant,
            priority: LayoutPriority::REQUIRED,
        }
    }

    /// A required `item.attribute == related.related_attribute` constraint.
    pub fn pinned(
        item: ViewRef,
        attribute: LayoutAttribute,
        related: ViewRef,
        related_attribute: LayoutAttribute,
    ) -> Self {
        Self {
            related_item: Some(related),
            related_attribute,
            constant: 0.0,
            ..Self::fixed(item, attribute, 0.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(pub u64);

/// The native constraint system, seen from the binder.
pub trait ConstraintSink {
    /// Registers an inactive constraint.
    fn create(&mut self, constraint: NativeConstraint) -> ConstraintHandle;
    fn activate(&mut self, handle: ConstraintHandle);
    fn deactivate(&mut self, handle: ConstraintHandle);
    fn set_constant(&mut self, handle: ConstraintHandle, constant: f64);
    fn remove(&mut self, handle: ConstraintHandle);
}

/// A sink that keeps every constraint in memory. Useful for tests and for
/// hosts that apply constraints in a later batch.
#[derive(Debug, Default)]
pub struct RecordingConstraintSink {
    next: u64,
    constraints: HashMap<ConstraintHandle, (NativeConstraint, bool)>,
}

impl RecordingConstraintSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: ConstraintHandle) -> Option<&NativeConstraint> {
        self.constraints.get(&handle).map(|(c, _)| c)
    }

    pub fn is_active(&self, handle: ConstraintHandle) -> bool {
        self.constraints
            .get(&handle)
            .map(|(_, active)| *active)
            .unwrap_or(false)
    }

    /// Active constraints, ordered by creation.
    pub fn active(&self) -> Vec<&NativeConstraint> {
        let mut handles: Vec<_> = self
            .constraints
            .iter()
            .filter(|(_, (_, active))| *active)
            .map(|(h, _)| *h)
            .collect();
        handles.sort();
        handles.iter().filter_map(|h| self.get(*h)).collect()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl ConstraintSink for RecordingConstraintSink {
    fn create(&mut self, constraint: NativeConstraint) -> ConstraintHandle {
        self.next += 1;
        let handle = ConstraintHandle(self.next);
        self.constraints.insert(handle, (constraint, false));
        handle
    }

    fn activate(&mut self, handle: ConstraintHandle) {
        if let Some((_, active)) = self.constraints.get_mut(&handle) {
            *active = true;
        }
    }

    fn deactivate(&mut self, handle: ConstraintHandle) {
        if let Some((_, active)) = self.constraints.get_mut(&handle) {
            *active = false;
        }
    }

    fn set_constant(&mut self, handle: ConstraintHandle, constant: f64) {
        match self.constraints.get_mut(&handle) {
            Some((c, _)) => c.constant = constant,
            None => log::warn!("set_constant on unknown constraint {:?}", handle),
        }
    }

    fn remove(&mut self, handle: ConstraintHandle) {
        self.constraints.remove(&handle);
    }
}
