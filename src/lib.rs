//! Trellis computes frames for trees of visual components.
//!
//! A [`LayoutSource`] turns a JSON document into a [`ComponentTree`]. The
//! [`LayoutEngine`] lays each root out within a size range and caches the
//! result per component, and a [`LayoutBinder`] turns the constraint edges of
//! the laid-out tree into native constraints.
//!
//! ```ignore
//! use trellis::{LayoutConfig, LayoutEngine, LayoutSource, Size};
//!
//! let source = LayoutSource::from_json(&json)?;
//! let engine = LayoutEngine::new(LayoutConfig::default());
//! let layouts = trellis::layout_roots(&engine, source.tree(), Size::new(320.0, 480.0));
//! ```

pub mod error;

pub use error::TrellisError;

pub use trellis_binder as binder;
pub use trellis_executor as executor;
pub use trellis_layout as layout;
pub use trellis_source as source;
pub use trellis_style as style;
pub use trellis_traits as traits;
pub use trellis_types as types;

pub use trellis_binder::{LayoutBinder, LayoutGraph, TextSizeLinker};
pub use trellis_executor::WorkerPool;
pub use trellis_layout::{
    ComponentNode, ComponentRepository, ComponentTree, Layout, LayoutConfig, LayoutEngine, LayoutSpec, NodeId,
};
pub use trellis_source::{LayoutSource, SourceError};
pub use trellis_style::{Dimension, LayoutSize};
pub use trellis_types::{ComponentId, Point, Rect, Size, SizeRange};

/// Lays out every root of `tree` at exactly `size` and commits the results.
pub fn layout_roots(engine: &LayoutEngine, tree: &ComponentTree, size: Size) -> Vec<Layout> {
    let layouts: Vec<Layout> = tree
        .roots()
        .iter()
        .map(|&root| engine.layout_root(tree, root, size))
        .collect();
    engine.profiler().log_summary("layout_roots");
    layouts
}
