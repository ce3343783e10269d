use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;
use crate::layout::Layout;
use crate::spec::{AbsoluteLayoutSpec, LayoutSpec};
use crate::tree::{ComponentNode, ComponentTree, NodeId};
use trellis_style::{Dimension, LayoutSize, StackSelfAlignment};
use trellis_types::{Point, Size, SizeRange};

/// Creates a serial layout engine for testing purposes.
pub fn create_test_engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::serial())
}

/// A leaf with an exact size.
pub fn fixed(id: &str, width: f64, height: f64) -> ComponentNode {
    let node = ComponentNode::new(id).with_spec(AbsoluteLayoutSpec::default());
    node.properties().set_size(LayoutSize::from_size(Size::new(width, height)));
    node
}

/// A leaf that takes whatever room it is offered.
pub fn auto(id: &str) -> ComponentNode {
    ComponentNode::new(id).with_spec(AbsoluteLayoutSpec::default())
}

/// Chainable property setters for test components.
pub trait NodeExt: Sized {
    fn at(self, x: f64, y: f64) -> Self;
    fn grow(self, grow: f64) -> Self;
    fn shrink(self, shrink: f64) -> Self;
    fn spacing(self, before: f64, after: f64) -> Self;
    fn align_self(self, alignment: StackSelfAlignment) -> Self;
    fn width(self, width: Dimension) -> Self;
    fn baselines(self, ascender: f64, descender: f64) -> Self;
}

impl NodeExt for ComponentNode {
    fn at(self, x: f64, y: f64) -> Self {
        self.properties().set_position(Point::new(x, y));
        self
    }

    fn grow(self, grow: f64) -> Self {
        self.properties().set_flex_grow(grow);
        self
    }

    fn shrink(self, shrink: f64) -> Self {
        self.properties().set_flex_shrink(shrink);
        self
    }

    fn spacing(self, before: f64, after: f64) -> Self {
        self.properties().set_spacing_before(before);
        self.properties().set_spacing_after(after);
        self
    }

    fn align_self(self, alignment: StackSelfAlignment) -> Self {
        self.properties().set_self_alignment(alignment);
        self
    }

    fn width(self, width: Dimension) -> Self {
        self.properties().set_width(width);
        self
    }

    fn baselines(self, ascender: f64, descender: f64) -> Self {
        self.properties().set_ascender(ascender);
        self.properties().set_descender(descender);
        self
    }
}

/// A root component with a spec plus the engine to lay it out.
pub struct TestTree {
    pub tree: ComponentTree,
    pub root: NodeId,
    pub engine: LayoutEngine,
}

impl TestTree {
    pub fn new(spec: impl Into<LayoutSpec>) -> Self {
        Self::with_engine(spec, create_test_engine())
    }

    pub fn with_engine(spec: impl Into<LayoutSpec>, engine: LayoutEngine) -> Self {
        let mut tree = ComponentTree::new();
        let root = tree
            .add_root(ComponentNode::new("root").with_spec(spec))
            .expect("fresh tree accepts a root");
        Self { tree, root, engine }
    }

    pub fn child(&mut self, node: ComponentNode) -> NodeId {
        self.child_of(self.root, node)
    }

    pub fn child_of(&mut self, parent: NodeId, node: ComponentNode) -> NodeId {
        self.tree.add_child(parent, node).expect("unique test component id")
    }

    pub fn layout(&self, constrained_size: SizeRange) -> Layout {
        self.engine.layout_that_fits(&self.tree, self.root, constrained_size)
    }

    /// Frames of the root's direct children as `(x, y, width, height)`.
    pub fn child_frames(&self, constrained_size: SizeRange) -> Vec<(f64, f64, f64, f64)> {
        self.layout(constrained_size)
            .sublayouts
            .iter()
            .map(|l| {
                let f = l.frame();
                (f.origin.x, f.origin.y, f.size.width, f.size.height)
            })
            .collect()
    }
}
