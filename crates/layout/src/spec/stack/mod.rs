//! Flexbox-style stacking.
//!
//! A pass runs in two phases. [`unpositioned`] measures, wraps, flexes and
//! stretches the children; [`positioned`] places the resulting lines and
//! items and computes the final size.

mod positioned;
mod unpositioned;


use crate::engine::LayoutContext;
use crate::layout::Layout;
use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use trellis_style::{
    StackAlignment, StackAxis, StackContentAlignment, StackFlexWrap, StackHorizontalAlignment,
    StackItemJustification, StackVerticalAlignment,
};
use trellis_types::{Point, Size, SizeRange};

/// Differences smaller than this never trigger a flex or stretch pass.
pub(crate) const VIOLATION_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackLayoutSpec {
    pub axis: StackAxis,
    /// Space between adjacent children.
    pub spacing: f64,
    pub horizontal_alignment: StackHorizontalAlignment,
    pub vertical_alignment: StackVerticalAlignment,
    pub item_justification: StackItemJustification,
    pub alignment: StackAlignment,
    pub flex_wrap: StackFlexWrap,
    pub content_alignment: StackContentAlignment,
    /// Space between lines of a wrapping stack.
    pub line_spacing: f64,
}

impl Default for StackLayoutSpec {
    fn default() -> Self {
        Self {
            axis: StackAxis::Horizontal,
            spacing: 0.0,
            horizontal_alignment: StackHorizontalAlignment::None,
            vertical_alignment: StackVerticalAlignment::None,
            item_justification: StackItemJustification::Start,
            alignment: StackAlignment::Stretch,
            flex_wrap: StackFlexWrap::NoWrap,
            content_alignment: StackContentAlignment::Start,
            line_spacing: 0.0,
        }
    }
}

impl StackLayoutSpec {
    pub fn new(axis: StackAxis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    pub fn horizontal() -> Self {
        Self::new(StackAxis::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(StackAxis::Vertical)
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_justification(mut self, justification: StackItemJustification) -> Self {
        self.item_justification = justification;
        self
    }

    pub fn with_alignment(mut self, alignment: StackAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_wrap(mut self, flex_wrap: StackFlexWrap) -> Self {
        self.flex_wrap = flex_wrap;
        self
    }

    pub fn with_content_alignment(mut self, content_alignment: StackContentAlignment) -> Self {
        self.content_alignment = content_alignment;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: StackHorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: StackVerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Justification after applying the axis-independent alignments.
    pub fn resolved_justification(&self) -> StackItemJustification {
        match self.axis {
            StackAxis::Horizontal => self.horizontal_alignment.justification(self.item_justification),
            StackAxis::Vertical => self.vertical_alignment.justification(self.item_justification),
        }
    }

    /// Cross-axis alignment after applying the axis-independent alignments.
    pub fn resolved_alignment(&self) -> StackAlignment {
        match self.axis {
            StackAxis::Horizontal => self.vertical_alignment.alignment(self.alignment),
            StackAxis::Vertical => self.horizontal_alignment.alignment(self.alignment),
        }
    }

    pub fn layout_that_fits(&self, ctx: &LayoutContext<'_>, node: NodeId, constrained_size: SizeRange) -> Layout {
        let id = ctx.tree()[node].id().clone();
        if ctx.tree().children(node).is_empty() {
            return Layout::new(id, Size::ZERO, Vec::new());
        }

        let style = StackStyle::from(self);
        let unpositioned = unpositioned::compute(&style, ctx, node, constrained_size);
        let positioned = positioned::compute(&style, unpositioned, constrained_size);
        Layout::new(id, positioned.size, positioned.sublayouts)
    }
}

/// A spec with its alignments resolved, shared by both phases.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StackStyle {
    pub axis: Axis,
    pub spacing: f64,
    pub justification: StackItemJustification,
    pub alignment: StackAlignment,
    pub flex_wrap: StackFlexWrap,
    pub content_alignment: StackContentAlignment,
    pub line_spacing: f64,
}

impl From<&StackLayoutSpec> for StackStyle {
    fn from(spec: &StackLayoutSpec) -> Self {
        Self {
            axis: Axis(spec.axis),
            spacing: spec.spacing,
            justification: spec.resolved_justification(),
            alignment: spec.resolved_alignment(),
            flex_wrap: spec.flex_wrap,
            content_alignment: spec.content_alignment,
            line_spacing: spec.line_spacing,
        }
    }
}

/// Maps between stack/cross coordinates and width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Axis(pub StackAxis);

impl Axis {
    pub fn stack(self, size: Size) -> f64 {
        match self.0 {
            StackAxis::Horizontal => size.width,
            StackAxis::Vertical => size.height,
        }
    }

    pub fn cross(self, size: Size) -> f64 {
        match self.0 {
            StackAxis::Horizontal => size.height,
            StackAxis::Vertical => size.width,
        }
    }

    pub fn point(self, stack: f64, cross: f64) -> Point {
        match self.0 {
            StackAxis::Horizontal => Point::new(stack, cross),
            StackAxis::Vertical => Point::new(cross, stack),
        }
    }

    pub fn size(self, stack: f64, cross: f64) -> Size {
        match self.0 {
            StackAxis::Horizontal => Size::new(stack, cross),
            StackAxis::Vertical => Size::new(cross, stack),
        }
    }

    pub fn range(self, stack_min: f64, stack_max: f64, cross_min: f64, cross_max: f64) -> SizeRange {
        SizeRange::new(self.size(stack_min, cross_min), self.size(stack_max, cross_max))
    }
}

/// Signed distance from `sum` into `[min, max]`. Positive means the content
/// is short of the minimum.
pub(crate) fn compute_violation(sum: f64, min: f64, max: f64) -> f64 {
    if sum < min {
        min - sum
    } else if sum > max {
        max - sum
    } else {
        0.0
    }
}
