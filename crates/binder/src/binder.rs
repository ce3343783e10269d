use crate::meta::MetaBinder;
use std::collections::HashMap;
use trellis_layout::{ComponentTree, LayoutObject, MetaType, NodeId};
use trellis_traits::{ConstraintHandle, ConstraintSink, ViewHost};
use trellis_types::LayoutObjectId;

const META_TYPES: [MetaType; 3] = [MetaType::Ideal, MetaType::Min, MetaType::Max];

/// Keeps one [`MetaBinder`] per (edge, meta type) so that repeated binding
/// passes over the same tree create each native constraint once.
#[derive(Debug, Default)]
pub struct LayoutBinder {
    meta_binders: HashMap<(LayoutObjectId, MetaType), MetaBinder>,
}

impl LayoutBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the ideal, min and max metas of `edge`. Returns how many were
    /// newly bound.
    pub fn bind_layout_object(
        &mut self,
        edge: &LayoutObject,
        tree: &ComponentTree,
        host: &mut dyn ViewHost,
        sink: &mut dyn ConstraintSink,
    ) -> usize {
        let mut bound = 0;
        for slot in META_TYPES {
            let binder = self.meta_binders.entry((edge.id.clone(), slot)).or_default();
            if binder.bind(edge, slot, tree, &mut *host, &mut *sink) {
                bound += 1;
            }
        }
        bound
    }

    /// Binds the synthesized default edges of `node`, then its authored ones.
    pub fn bind_component(
        &mut self,
        tree: &ComponentTree,
        node: NodeId,
        host: &mut dyn ViewHost,
        sink: &mut dyn ConstraintSink,
    ) -> usize {
        let Some(component) = tree.node(node) else {
            log::warn!("Cannot bind unknown node {:?}", node);
            return 0;
        };
        let edges: Vec<LayoutObject> = {
            let constraints = component.constraints();
            constraints
                .default_layout_objects
                .iter()
                .chain(constraints.layout_objects.iter())
                .cloned()
                .collect()
        };
        let mut bound = 0;
        for edge in &edges {
            bound += self.bind_layout_object(edge, tree, &mut *host, &mut *sink);
        }
        bound
    }

    pub fn bind_tree(&mut self, tree: &ComponentTree, host: &mut dyn ViewHost, sink: &mut dyn ConstraintSink) -> usize {
        let mut bound = 0;
        for (node, _) in tree.iter() {
            bound += self.bind_component(tree, node, &mut *host, &mut *sink);
        }
        log::debug!("Bound {} constraint metas across {} components", bound, tree.len());
        bound
    }

    pub fn meta_binder(&self, edge: &LayoutObjectId, meta_type: MetaType) -> Option<&MetaBinder> {
        self.meta_binders.get(&(edge.clone(), meta_type))
    }

    /// The handle holding the constant of a bound meta.
    pub fn constant_handle(&self, edge: &LayoutObjectId, meta_type: MetaType) -> Option<ConstraintHandle> {
        self.meta_binder(edge, meta_type)
            .and_then(MetaBinder::constant_handle)
    }

    pub fn bound_count(&self) -> usize {
        self.meta_binders.values().filter(|b| b.is_bound()).count()
    }

    /// Removes every native constraint and spacer created so far.
    pub fn clean_up(&mut self, host: &mut dyn ViewHost, sink: &mut dyn ConstraintSink) {
        for binder in self.meta_binders.values_mut() {
            binder.clean_up(&mut *host, &mut *sink);
        }
        self.meta_binders.clear();
    }
}
