use thiserror::Error;
use trellis_types::ComponentId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown node index {0}.")]
    UnknownNode(usize),
    #[error("A component with id '{0}' already exists.")]
    DuplicateComponent(ComponentId),
    #[error("Component '{0}' cannot be attached to itself or its own subtree.")]
    SelfParent(ComponentId),
}

pub mod cache;
pub mod config;
pub mod constraints;
pub mod engine;
pub mod layout;
pub mod perf;
pub mod properties;
pub mod repository;
pub mod spec;
pub mod tree;

pub use self::cache::{CalculatedLayout, LayoutCacheState};
pub use self::config::LayoutConfig;
pub use self::constraints::{ComponentConstraints, LayoutMeta, LayoutObject, LayoutState, MetaType};
pub use self::engine::{LayoutContext, LayoutEngine};
pub use self::layout::Layout;
pub use self::perf::{DebugProfiler, NoOpProfiler, Profiler};
pub use self::properties::{LayoutProperties, LayoutPropertyValues};
pub use self::repository::ComponentRepository;
pub use self::spec::{AbsoluteLayoutSpec, LayoutSpec, StackLayoutSpec};
pub use self::tree::{ComponentNode, ComponentTree, NodeId};

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod test_utils;
