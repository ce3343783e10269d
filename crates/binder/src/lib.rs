//! Turns the constraint edges of a laid-out component tree into native
//! constraints, and keeps size-dependent constants current.

pub mod binder;
pub mod defaults;
pub mod graph;
pub mod meta;
pub mod priority;
pub mod text;

pub use self::binder::LayoutBinder;
pub use self::defaults::{synthesize_default_layout_objects, synthesize_tree_default_layout_objects};
pub use self::graph::{LayoutEdge, LayoutGraph, LayoutVertex};
pub use self::meta::MetaBinder;
pub use self::priority::{priority_for, relation_for};
pub use self::text::{TextMetricsCache, TextSizeLinker, DEFAULT_TEXT_CACHE_CAPACITY};
