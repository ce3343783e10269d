//! Layout algorithms a component can delegate to.

mod absolute;
mod stack;

pub use absolute::AbsoluteLayoutSpec;
pub use stack::StackLayoutSpec;

use crate::engine::LayoutContext;
use crate::layout::Layout;
use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use trellis_types::SizeRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutSpec {
    Absolute(AbsoluteLayoutSpec),
    Stack(StackLayoutSpec),
}

impl LayoutSpec {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutSpec::Absolute(_) => "absolute",
            LayoutSpec::Stack(_) => "stack",
        }
    }

    /// Lays out `node` and its children within `constrained_size`. The range
    /// has already been intersected with the node's own size.
    pub fn layout_that_fits(&self, ctx: &LayoutContext<'_>, node: NodeId, constrained_size: SizeRange) -> Layout {
        match self {
            LayoutSpec::Absolute(spec) => spec.layout_that_fits(ctx, node, constrained_size),
            LayoutSpec::Stack(spec) => spec.layout_that_fits(ctx, node, constrained_size),
        }
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutSpec::Absolute(AbsoluteLayoutSpec::default())
    }
}

impl From<AbsoluteLayoutSpec> for LayoutSpec {
    fn from(spec: AbsoluteLayoutSpec) -> Self {
        LayoutSpec::Absolute(spec)
    }
}

impl From<StackLayoutSpec> for LayoutSpec {
    fn from(spec: StackLayoutSpec) -> Self {
        LayoutSpec::Stack(spec)
    }
}
