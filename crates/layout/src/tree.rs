//! Arena of components.
//!
//! Components live in a flat `Vec` and refer to each other by [`NodeId`].
//! Parents own the ordering of their children; the parent link is a plain
//! index back into the arena. Cache and constraint fields sit behind their
//! own locks so a layout pass only needs `&ComponentTree`.

use crate::LayoutError;
use crate::cache::{LayoutCacheState, NodeLayoutCache};
use crate::constraints::{ComponentConstraints, LayoutObject};
use crate::layout::Layout;
use crate::properties::{LayoutProperties, LayoutPropertyValues};
use crate::spec::LayoutSpec;
use std::collections::HashMap;
use std::ops::Index;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use trellis_traits::TextDescriptor;
use trellis_types::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct ComponentNode {
    id: ComponentId,
    name: Option<String>,
    spec: Option<LayoutSpec>,
    properties: LayoutProperties,
    text: Option<TextDescriptor>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    constraints: RwLock<ComponentConstraints>,
    cache: Mutex<NodeLayoutCache>,
}

impl ComponentNode {
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            spec: None,
            properties: LayoutProperties::default(),
            text: None,
            parent: None,
            children: Vec::new(),
            constraints: RwLock::new(ComponentConstraints::default()),
            cache: Mutex::new(NodeLayoutCache::default()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_spec(mut self, spec: impl Into<LayoutSpec>) -> Self {
        self.spec = Some(spec.into());
        self
    }

    pub fn with_properties(mut self, values: LayoutPropertyValues) -> Self {
        self.properties = LayoutProperties::new(values);
        self
    }

    pub fn with_layout_objects(mut self, layout_objects: Vec<LayoutObject>) -> Self {
        self.constraints = RwLock::new(ComponentConstraints::new(layout_objects));
        self
    }

    pub fn with_text(mut self, text: TextDescriptor) -> Self {
        self.text = Some(text);
        self
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn spec(&self) -> Option<&LayoutSpec> {
        self.spec.as_ref()
    }

    pub fn properties(&self) -> &LayoutProperties {
        &self.properties
    }

    pub fn text_descriptor(&self) -> Option<&TextDescriptor> {
        self.text.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn constraints(&self) -> RwLockReadGuard<'_, ComponentConstraints> {
        match self.constraints.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn constraints_mut(&self) -> RwLockWriteGuard<'_, ComponentConstraints> {
        match self.constraints.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(crate) fn lock_cache(&self) -> MutexGuard<'_, NodeLayoutCache> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn layout_version(&self) -> u64 {
        self.lock_cache().layout_version
    }

    pub fn is_layout_transition_invalid(&self) -> bool {
        self.lock_cache().transition_invalid
    }

    /// While set, layout requests compute throwaway layouts and leave the
    /// cache untouched.
    pub fn set_layout_transition_invalid(&self, invalid: bool) {
        self.lock_cache().transition_invalid = invalid;
    }

    pub fn cache_state(&self) -> LayoutCacheState {
        self.lock_cache().state()
    }

    pub fn calculated_layout(&self) -> Option<Layout> {
        self.lock_cache().calculated.layout.clone()
    }

    pub fn pending_layout(&self) -> Option<Layout> {
        self.lock_cache().pending.layout.clone()
    }

    pub fn commit_pending_layout(&self) -> bool {
        self.lock_cache().commit()
    }

    pub fn needs_top_default_layout_object(&self) -> bool {
        self.constraints().needs_top_default_layout_object()
    }

    pub fn needs_left_default_layout_object(&self) -> bool {
        self.constraints().needs_left_default_layout_object()
    }

    pub fn needs_width_default_layout_object(&self) -> bool {
        self.constraints().needs_width_default_layout_object()
    }

    pub fn needs_height_default_layout_object(&self) -> bool {
        self.constraints().needs_height_default_layout_object()
    }
}

#[derive(Debug, Default)]
pub struct ComponentTree {
    nodes: Vec<ComponentNode>,
    by_id: HashMap<ComponentId, NodeId>,
    by_name: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl Index<NodeId> for ComponentTree {
    type Output = ComponentNode;

    fn index(&self, id: NodeId) -> &ComponentNode {
        &self.nodes[id.0]
    }
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn add_root(&mut self, node: ComponentNode) -> Result<NodeId, LayoutError> {
        self.insert(None, node)
    }

    pub fn add_child(&mut self, parent: NodeId, node: ComponentNode) -> Result<NodeId, LayoutError> {
        self.insert(Some(parent), node)
    }

    fn insert(&mut self, parent: Option<NodeId>, mut node: ComponentNode) -> Result<NodeId, LayoutError> {
        if self.by_id.contains_key(&node.id) {
            return Err(LayoutError::DuplicateComponent(node.id.clone()));
        }
        if let Some(parent) = parent {
            self.check(parent)?;
        }

        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        self.by_id.insert(node.id.clone(), id);
        if let Some(name) = &node.name {
            self.by_name.entry(name.clone()).or_insert(id);
        }
        self.nodes.push(node);

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        log::trace!("Inserted component '{}' as {:?}", self.nodes[id.0].id, id);
        Ok(id)
    }

    /// Moves `child` (and its subtree) to the end of `new_parent`'s children.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), LayoutError> {
        self.check(child)?;
        self.check(new_parent)?;
        if child == new_parent || self.ancestors(new_parent).any(|a| a == child) {
            return Err(LayoutError::SelfParent(self.nodes[child.0].id.clone()));
        }

        match self.nodes[child.0].parent {
            Some(old) => self.nodes[old.0].children.retain(|c| *c != child),
            None => self.roots.retain(|r| *r != child),
        }
        self.nodes[child.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(child);
        self.invalidate_layout(new_parent);
        Ok(())
    }

    fn check(&self, id: NodeId) -> Result<(), LayoutError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(LayoutError::UnknownNode(id.0))
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&ComponentNode> {
        self.nodes.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ComponentNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn find(&self, id: &ComponentId) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// First component registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    /// Nearest component containing both `a` and `b` (either may be the answer).
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let mut chain: Vec<NodeId> = vec![a];
        chain.extend(self.ancestors(a));
        std::iter::once(b)
            .chain(self.ancestors(b))
            .find(|candidate| chain.contains(candidate))
    }

    /// Every component in the subtree rooted at `id`, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Bumps the layout version of `id` and every ancestor. Stored layouts
    /// for older versions stop answering requests.
    pub fn invalidate_layout(&self, id: NodeId) {
        let Some(node) = self.node(id) else {
            log::warn!("Cannot invalidate unknown node {:?}", id);
            return;
        };
        let version = node.lock_cache().bump_version();
        log::debug!("Invalidated '{}' (version {})", node.id, version);
        for ancestor in self.ancestors(id) {
            self.nodes[ancestor.0].lock_cache().bump_version();
        }
    }

    pub fn layout_version(&self, id: NodeId) -> u64 {
        self.node(id).map(ComponentNode::layout_version).unwrap_or(0)
    }

    pub fn set_layout_transition_invalid(&self, id: NodeId, invalid: bool) {
        if let Some(node) = self.node(id) {
            node.set_layout_transition_invalid(invalid);
        }
    }

    pub fn cache_state(&self, id: NodeId) -> LayoutCacheState {
        self.node(id)
            .map(ComponentNode::cache_state)
            .unwrap_or(LayoutCacheState::Clean)
    }

    pub fn commit_pending_layout(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(ComponentNode::commit_pending_layout)
    }

    /// Commits every pending layout in the subtree. Returns how many moved.
    pub fn commit_subtree(&self, id: NodeId) -> usize {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.nodes[n.0].commit_pending_layout())
            .count()
    }

    /// The committed layout, falling back to the pending one.
    pub fn current_layout(&self, id: NodeId) -> Option<Layout> {
        let node = self.node(id)?;
        let cache = node.lock_cache();
        cache
            .calculated
            .layout
            .clone()
            .or_else(|| cache.pending.layout.clone())
    }
}
