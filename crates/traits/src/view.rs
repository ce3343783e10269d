//! View-hierarchy queries the binder needs from the host toolkit.

use crate::constraint::ViewRef;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use trellis_types::ComponentId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewHostError {
    #[error("View not registered: {0}")]
    NotRegistered(ComponentId),

    #[error("View '{0}' cannot be its own superview")]
    SelfParent(ComponentId),
}

/// The host's view registry as seen by the constraint binder.
pub trait ViewHost {
    /// Whether a view was created for the component.
    fn is_registered(&self, id: &ComponentId) -> bool;

    /// Whether the component's view is the root of its hierarchy.
    fn is_root_view(&self, id: &ComponentId) -> bool;

    /// Whether the component's view is attached to a superview or window.
    fn is_mounted(&self, id: &ComponentId) -> bool;

    /// Adds an empty spacer view inside `ancestor`.
    fn add_spacer(&mut self, ancestor: &ComponentId) -> Option<ViewRef>;

    fn remove_spacer(&mut self, spacer: &ViewRef);
}

/// An in-memory view registry.
#[derive(Debug, Default)]
pub struct InMemoryViewHost {
    superviews: HashMap<ComponentId, Option<ComponentId>>,
    roots: HashSet<ComponentId>,
    spacers: HashSet<u64>,
    next_spacer: u64,
}

impl InMemoryViewHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a root view. Roots count as mounted in their window.
    pub fn add_root(&mut self, id: impl Into<ComponentId>) {
        let id = id.into();
        self.roots.insert(id.clone());
        self.superviews.insert(id, None);
    }

    /// Registers a view mounted in `superview`, which must already be registered.
    pub fn add_view(
        &mut self,
        id: impl Into<ComponentId>,
        superview: impl Into<ComponentId>,
    ) -> Result<(), ViewHostError> {
        let id = id.into();
        let superview = superview.into();
        if id == superview {
            return Err(ViewHostError::SelfParent(id));
        }
        if !self.superviews.contains_key(&superview) {
            return Err(ViewHostError::NotRegistered(superview));
        }
        self.superviews.insert(id, Some(superview));
        Ok(())
    }

    /// Registers a view without a superview that is not a root.
    pub fn add_unmounted(&mut self, id: impl Into<ComponentId>) {
        self.superviews.insert(id.into(), None);
    }

    pub fn unmount(&mut self, id: &ComponentId) {
        self.roots.remove(id);
        if let Some(sv) = self.superviews.get_mut(id) {
            *sv = None;
        }
    }

    pub fn spacer_count(&self) -> usize {
        self.spacers.len()
    }
}

impl ViewHost for InMemoryViewHost {
    fn is_registered(&self, id: &ComponentId) -> bool {
        self.superviews.contains_key(id)
    }

    fn is_root_view(&self, id: &ComponentId) -> bool {
        self.roots.contains(id)
    }

    fn is_mounted(&self, id: &ComponentId) -> bool {
        self.roots.contains(id) || matches!(self.superviews.get(id), Some(Some(_)))
    }

    fn add_spacer(&mut self, ancestor: &ComponentId) -> Option<ViewRef> {
        if !self.is_registered(ancestor) {
            log::warn!("Cannot add spacer: ancestor '{}' has no view", ancestor);
            return None;
        }
        self.next_spacer += 1;
        self.spacers.insert(self.next_spacer);
        Some(ViewRef::Spacer(self.next_spacer))
    }

    fn remove_spacer(&mut self, spacer: &ViewRef) {
        if let ViewRef::Spacer(id) = spacer {
            self.spacers.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_state() {
        let mut host = InMemoryViewHost::new();
        host.add_root("root");
        host.add_view("child", "root").unwrap();
        let root = ComponentId::new("root");
        let child = ComponentId::new("child");
        assert!(host.is_root_view(&root));
        assert!(host.is_mounted(&root));
        assert!(host.is_mounted(&child));
        assert!(!host.is_root_view(&child));
        host.unmount(&child);
        assert!(!host.is_mounted(&child));
        host.unmount(&root);
        assert!(!host.is_mounted(&root));
    }

    #[test]
    fn test_add_view_requires_registered_superview() {
        let mut host = InMemoryViewHost::new();
        assert_eq!(
            host.add_view("a", "missing"),
            Err(ViewHostError::NotRegistered(ComponentId::new("missing")))
        );
    }

    #[test]
    fn test_spacers() {
        let mut host = InMemoryViewHost::new();
        host.add_root("root");
        let spacer = host.add_spacer(&ComponentId::new("root")).unwrap();
        assert_eq!(host.spacer_count(), 1);
        host.remove_spacer(&spacer);
        assert_eq!(host.spacer_count(), 0);
        assert!(host.add_spacer(&ComponentId::new("nope")).is_none());
    }
}
