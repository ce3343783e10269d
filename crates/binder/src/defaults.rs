//! Synthesis of default edges for under-constrained components.
//!
//! A default edge pins the component to the frame it was last laid out at:
//! top and left relative to the parent, width and height as constants. Only
//! the attributes the component's authored edges leave undetermined get one.

use trellis_layout::{ComponentTree, LayoutObject, LayoutState, NodeId};
use trellis_types::{ComponentId, LayoutAttribute, Rect};

const DEFAULT_ATTRIBUTES: [LayoutAttribute; 4] = [
    LayoutAttribute::Top,
    LayoutAttribute::Left,
    LayoutAttribute::Width,
    LayoutAttribute::Height,
];

pub fn default_layout_object_id(component: &ComponentId, attribute: LayoutAttribute) -> String {
    let side = format!("{:?}", attribute).to_lowercase();
    format!("{}.default.{}", component, side)
}

fn default_layout_object(component: &ComponentId, parent: &ComponentId, attribute: LayoutAttribute, frame: Rect) -> LayoutObject {
    let constant = match attribute {
        LayoutAttribute::Top => frame.origin.y,
        LayoutAttribute::Left => frame.origin.x,
        LayoutAttribute::Width => frame.size.width,
        _ => frame.size.height,
    };
    let mut edge = LayoutObject::ideal(
        default_layout_object_id(component, attribute),
        component.clone(),
        attribute,
        constant,
    )
    .as_default();
    edge.ideal_meta.state = LayoutState::Default;
    if !attribute.is_sizing() {
        edge = edge.related_to(parent.clone(), attribute);
    }
    edge
}

/// The frame of `node` inside its parent's current layout.
fn frame_in_parent(tree: &ComponentTree, node: NodeId, parent: NodeId) -> Option<Rect> {
    let id = tree.node(node)?.id();
    tree.current_layout(parent)?
        .sublayouts
        .iter()
        .find(|l| l.component_id == *id)
        .map(|l| l.frame())
}

/// Replaces the default edges of `node` with the ones it currently needs.
/// Roots and components that have not been laid out get none.
pub fn synthesize_default_layout_objects(tree: &ComponentTree, node: NodeId) -> usize {
    let Some(component) = tree.node(node) else {
        return 0;
    };
    let Some(parent) = tree.parent(node) else {
        return 0;
    };
    let Some(frame) = frame_in_parent(tree, node, parent) else {
        log::debug!("No layout for '{}'; skipping default edges", component.id());
        return 0;
    };
    let parent_id = tree[parent].id().clone();

    let mut constraints = component.constraints_mut();
    let defaults: Vec<LayoutObject> = DEFAULT_ATTRIBUTES
        .iter()
        .filter(|a| constraints.needs_default_layout_object(**a))
        .map(|a| default_layout_object(component.id(), &parent_id, *a, frame))
        .collect();
    let count = defaults.len();
    constraints.default_layout_objects = defaults;
    count
}

pub fn synthesize_tree_default_layout_objects(tree: &ComponentTree) -> usize {
    tree.iter()
        .map(|(node, _)| synthesize_default_layout_objects(tree, node))
        .sum()
}
