#![allow(dead_code)]

pub mod fixtures;

use serde_json::Value;
use trellis::{
    ComponentId, ComponentRepository, Layout, LayoutConfig, LayoutEngine, LayoutSource, NodeId, Rect, SizeRange,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load(document: Value) -> Result<LayoutSource, trellis::SourceError> {
    init_logger();
    LayoutSource::from_json(&document.to_string())
}

pub fn serial_engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::serial())
}

pub fn node(source: &LayoutSource, id: &str) -> NodeId {
    source
        .component_by_id(&ComponentId::new(id))
        .unwrap_or_else(|| panic!("component '{}' is missing", id))
}

/// Lays out the first root of `source` within `range`.
pub fn layout_first_root(source: &LayoutSource, range: SizeRange) -> Layout {
    let root = source.top_level_components()[0];
    serial_engine().layout_that_fits(source.tree(), root, range)
}

/// Frames of the direct children of `layout`, in child order.
pub fn child_frames(layout: &Layout) -> Vec<Rect> {
    layout.sublayouts.iter().map(|l| l.frame()).collect()
}

pub fn xs(frames: &[Rect]) -> Vec<f64> {
    frames.iter().map(|f| f.origin.x).collect()
}

pub fn widths(frames: &[Rect]) -> Vec<f64> {
    frames.iter().map(|f| f.size.width).collect()
}
