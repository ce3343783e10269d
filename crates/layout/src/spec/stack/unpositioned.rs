use super::{compute_violation, StackStyle, VIOLATION_EPSILON};
use crate::engine::LayoutContext;
use crate::layout::Layout;
use crate::properties::LayoutPropertyValues;
use crate::tree::NodeId;
use trellis_style::{StackAlignment, StackContentAlignment, StackFlexWrap};
use trellis_types::{Size, SizeRange, INFINITY, UNDEFINED};

#[derive(Debug, Clone)]
pub(super) struct StackItem {
    pub node: NodeId,
    pub props: LayoutPropertyValues,
    pub layout: Layout,
}

#[derive(Debug, Clone, Default)]
pub(super) struct StackLine {
    pub items: Vec<StackItem>,
    pub cross_size: f64,
    /// Largest distance from the line's cross start to an item baseline.
    pub baseline: f64,
    pub stack_dimension_sum: f64,
}

#[derive(Debug, Clone)]
pub(super) struct UnpositionedLayout {
    pub lines: Vec<StackLine>,
    /// Longest line, spacing included.
    pub stack_dimension_sum: f64,
    /// All lines plus line spacing.
    pub cross_dimension_sum: f64,
}

pub(super) fn compute(
    style: &StackStyle,
    ctx: &LayoutContext<'_>,
    node: NodeId,
    size_range: SizeRange,
) -> UnpositionedLayout {
    let tree = ctx.tree();
    let children = tree.children(node);

    // Only a definite axis can resolve a child's fractional dimensions.
    let definite = |min: f64, max: f64| if min == max { min } else { UNDEFINED };
    let parent_size = Size::new(
        definite(size_range.min.width, size_range.max.width),
        definite(size_range.min.height, size_range.max.height),
    );

    let props: Vec<LayoutPropertyValues> = children
        .iter()
        .map(|&child| tree[child].properties().snapshot())
        .collect();
    let pass = Pass {
        style,
        ctx,
        size_range,
        parent_size,
        optimized_flexing: use_optimized_flexing(style, &props, size_range),
    };

    let items = pass.layout_items_along_unconstrained_stack_dimension(children, props);
    let mut lines = pass.collect_children_into_lines(items);
    pass.flex_lines_along_stack_dimension(&mut lines);
    pass.compute_lines_cross_size_and_baseline(&mut lines);
    pass.stretch_lines_along_cross_dimension(&mut lines);

    let mut stack_dimension_sum: f64 = 0.0;
    for line in &mut lines {
        line.stack_dimension_sum = items_stack_dimension_sum(style, &line.items);
        stack_dimension_sum = stack_dimension_sum.max(line.stack_dimension_sum);
    }
    let cross_dimension_sum = lines_cross_dimension_sum(style, &lines);

    UnpositionedLayout {
        lines,
        stack_dimension_sum,
        cross_dimension_sum,
    }
}

/// A single flexible child inside a fixed stack extent is sized by flexing
/// alone, so its intrinsic measurement can be skipped.
fn use_optimized_flexing(style: &StackStyle, props: &[LayoutPropertyValues], size_range: SizeRange) -> bool {
    let flexible = props.iter().filter(|p| p.is_flexible_in_both_directions()).count();
    flexible == 1 && style.axis.stack(size_range.min) == style.axis.stack(size_range.max)
}

pub(super) fn items_stack_dimension_sum(style: &StackStyle, items: &[StackItem]) -> f64 {
    let spacing = if items.is_empty() {
        0.0
    } else {
        style.spacing * (items.len() - 1) as f64
    };
    items.iter().fold(spacing, |sum, item| {
        sum + item.props.spacing_before + item.props.spacing_after + style.axis.stack(item.layout.size)
    })
}

pub(super) fn lines_cross_dimension_sum(style: &StackStyle, lines: &[StackLine]) -> f64 {
    let spacing = if lines.is_empty() {
        0.0
    } else {
        style.line_spacing * (lines.len() - 1) as f64
    };
    lines.iter().fold(spacing, |sum, line| sum + line.cross_size)
}

pub(super) fn baseline_for_item(style: &StackStyle, item: &StackItem) -> f64 {
    match item.props.self_alignment.resolve(style.alignment) {
        StackAlignment::BaselineFirst => item.props.ascender,
        StackAlignment::BaselineLast => style.axis.cross(item.layout.size) + item.props.descender,
        _ => 0.0,
    }
}

fn is_baseline_aligned(style: &StackStyle, item: &StackItem) -> bool {
    item.props.self_alignment.resolve(style.alignment).is_baseline()
}

struct Pass<'a, 'ctx> {
    style: &'a StackStyle,
    ctx: &'a LayoutContext<'ctx>,
    size_range: SizeRange,
    parent_size: Size,
    optimized_flexing: bool,
}

impl Pass<'_, '_> {
    fn cross_min(&self) -> f64 {
        self.style.axis.cross(self.size_range.min)
    }

    fn cross_max(&self) -> f64 {
        self.style.axis.cross(self.size_range.max)
    }

    fn stack_violation(&self, sum: f64) -> f64 {
        let axis = self.style.axis;
        compute_violation(sum, axis.stack(self.size_range.min), axis.stack(self.size_range.max))
    }

    /// Lays a child out within the given stack range. Stretched children get
    /// at least `cross_min` unless their own size says otherwise.
    fn cross_child_layout(
        &self,
        node: NodeId,
        props: &LayoutPropertyValues,
        stack_min: f64,
        stack_max: f64,
        cross_min: f64,
        cross_max: f64,
    ) -> Layout {
        let axis = self.style.axis;
        let stretch = props.self_alignment.resolve(self.style.alignment) == StackAlignment::Stretch;

        let (child_cross_min, child_cross_max) = if stretch {
            let own = props.size.resolve(Size::undefined());
            let own_min = axis.cross(own.min);
            let own_max = axis.cross(own.max);
            (
                if own_min != 0.0 { own_min } else { cross_min },
                if own_max == INFINITY { cross_max } else { own_max },
            )
        } else {
            (0.0, cross_max)
        };

        let range = axis.range(stack_min, stack_max, child_cross_min, child_cross_max);
        self.ctx.layout_that_fits_with_parent(node, range, self.parent_size)
    }

    fn layout_items_along_unconstrained_stack_dimension(
        &self,
        children: &[NodeId],
        props: Vec<LayoutPropertyValues>,
    ) -> Vec<StackItem> {
        let parent_stack = self.style.axis.stack(self.parent_size);
        let layouts = self.ctx.dispatch_map(children.len(), |i| {
            let (node, props) = (children[i], &props[i]);
            if self.optimized_flexing && props.is_flexible_in_both_directions() {
                Layout::empty(self.ctx.tree()[node].id().clone())
            } else {
                self.cross_child_layout(
                    node,
                    props,
                    props.flex_basis.resolve(parent_stack, 0.0),
                    props.flex_basis.resolve(parent_stack, INFINITY),
                    self.cross_min(),
                    self.cross_max(),
                )
            }
        });

        children
            .iter()
            .zip(props)
            .zip(layouts)
            .map(|((&node, props), layout)| StackItem { node, props, layout })
            .collect()
    }

    fn collect_children_into_lines(&self, items: Vec<StackItem>) -> Vec<StackLine> {
        if self.style.flex_wrap == StackFlexWrap::NoWrap {
            return vec![StackLine {
                items,
                ..StackLine::default()
            }];
        }

        let mut lines = Vec::new();
        let mut line_items: Vec<StackItem> = Vec::new();
        let mut line_sum = 0.0;
        let mut interitem_spacing = 0.0;

        for item in items {
            let item_extent =
                item.props.spacing_before + self.style.axis.stack(item.layout.size) + item.props.spacing_after;
            let overflows = self.stack_violation(line_sum + interitem_spacing + item_extent) < 0.0;

            if overflows && !line_items.is_empty() {
                lines.push(StackLine {
                    items: std::mem::take(&mut line_items),
                    ..StackLine::default()
                });
                line_sum = 0.0;
                interitem_spacing = 0.0;
            }

            line_items.push(item);
            line_sum += interitem_spacing + item_extent;
            interitem_spacing = self.style.spacing;
        }

        lines.push(StackLine {
            items: line_items,
            ..StackLine::default()
        });
        lines
    }

    /// Relays out `items[i]` for every `(i, stack_size)` in `targets`.
    fn relayout(&self, items: &mut [StackItem], targets: Vec<(usize, f64)>, cross_min: f64, cross_max: f64) {
        let snapshot: &[StackItem] = items;
        let layouts = self.ctx.dispatch_map(targets.len(), |t| {
            let (i, stack) = targets[t];
            let item = &snapshot[i];
            self.cross_child_layout(item.node, &item.props, stack, stack, cross_min, cross_max)
        });
        for ((i, _), layout) in targets.iter().zip(layouts) {
            items[*i].layout = layout;
        }
    }

    fn flex_lines_along_stack_dimension(&self, lines: &mut [StackLine]) {
        for line in lines {
            let items = &mut line.items;
            let violation = self.stack_violation(items_stack_dimension_sum(self.style, items));

            let flex_factor = |item: &StackItem| {
                if violation.abs() < VIOLATION_EPSILON {
                    0.0
                } else if violation > 0.0 {
                    item.props.flex_grow
                } else {
                    item.props.flex_shrink
                }
            };
            let factor_sum: f64 = items.iter().map(flex_factor).sum();

            if factor_sum == 0.0 {
                if self.optimized_flexing {
                    self.layout_flexible_children_at_zero_size(items);
                }
                continue;
            }

            let adjustments = self.flex_adjustments(items, violation, factor_sum);
            let remaining = adjustments.iter().fold(violation, |v, a| v - a);
            let Some(first_flex) = adjustments.iter().position(|a| *a != 0.0) else {
                continue;
            };

            let targets: Vec<(usize, f64)> = adjustments
                .iter()
                .enumerate()
                .filter(|(_, a)| **a != 0.0)
                .map(|(i, a)| {
                    let item = &items[i];
                    let mut flexed = self.style.axis.stack(item.layout.size) + a;
                    if i == first_flex && item.props.flex_grow > 0.0 {
                        flexed += remaining;
                    }
                    (i, flexed.max(0.0))
                })
                .collect();
            log::trace!("Flexing {} items by a violation of {}", targets.len(), violation);
            self.relayout(items, targets, self.cross_min(), self.cross_max());
        }
    }

    fn flex_adjustments(&self, items: &[StackItem], violation: f64, factor_sum: f64) -> Vec<f64> {
        if violation > 0.0 {
            return items
                .iter()
                .map(|item| (violation * (item.props.flex_grow / factor_sum)).floor())
                .collect();
        }

        // Shrinking is weighted by each item's current extent.
        let scaled = |item: &StackItem| self.style.axis.stack(item.layout.size) * (item.props.flex_shrink / factor_sum);
        let scaled_sum: f64 = items.iter().map(scaled).sum();
        items
            .iter()
            .map(|item| {
                if scaled_sum == 0.0 {
                    0.0
                } else {
                    -(scaled(item) / scaled_sum * violation).abs()
                }
            })
            .collect()
    }

    fn layout_flexible_children_at_zero_size(&self, items: &mut [StackItem]) {
        let targets: Vec<(usize, f64)> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.props.is_flexible_in_both_directions())
            .map(|(i, _)| (i, 0.0))
            .collect();
        self.relayout(items, targets, self.cross_min(), self.cross_max());
    }

    fn compute_lines_cross_size_and_baseline(&self, lines: &mut [StackLine]) {
        let single_line = lines.len() == 1;
        let (min_cross, max_cross) = (self.cross_min(), self.cross_max());

        if single_line && min_cross == max_cross {
            let line = &mut lines[0];
            line.cross_size = min_cross;
            line.baseline = line
                .items
                .iter()
                .filter(|item| is_baseline_aligned(self.style, item))
                .fold(0.0_f64, |b, item| b.max(baseline_for_item(self.style, item)));
            return;
        }

        for line in lines {
            let mut max_start_to_baseline: f64 = 0.0;
            let mut max_baseline_to_end: f64 = 0.0;
            let mut max_item_cross: f64 = 0.0;

            for item in &line.items {
                let cross = self.style.axis.cross(item.layout.size);
                if is_baseline_aligned(self.style, item) {
                    let baseline = baseline_for_item(self.style, item);
                    max_start_to_baseline = max_start_to_baseline.max(baseline);
                    max_baseline_to_end = max_baseline_to_end.max(cross - baseline);
                } else {
                    max_item_cross = max_item_cross.max(cross);
                }
            }

            line.cross_size = (max_start_to_baseline + max_baseline_to_end).max(max_item_cross);
            if single_line {
                line.cross_size = line.cross_size.max(min_cross).min(max_cross);
            }
            line.baseline = max_start_to_baseline;
        }
    }

    fn stretch_lines_along_cross_dimension(&self, lines: &mut [StackLine]) {
        let count = lines.len();
        let violation = compute_violation(
            lines_cross_dimension_sum(self.style, lines),
            self.cross_min(),
            self.cross_max(),
        );
        // A single line was already clamped to the stack's cross range.
        let stretch_lines = count > 1
            && self.style.content_alignment == StackContentAlignment::Stretch
            && violation > VIOLATION_EPSILON;
        let extra_per_line = violation / count as f64;

        for line in lines {
            if stretch_lines {
                line.cross_size += extra_per_line;
            }
            self.stretch_items_along_cross_dimension(&mut line.items, line.cross_size);
        }
    }

    fn stretch_items_along_cross_dimension(&self, items: &mut [StackItem], cross_size: f64) {
        let axis = self.style.axis;
        let targets: Vec<(usize, f64)> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.props.self_alignment.resolve(self.style.alignment) == StackAlignment::Stretch
                    && cross_size - axis.cross(item.layout.size) > VIOLATION_EPSILON
            })
            .map(|(i, item)| (i, axis.stack(item.layout.size)))
            .collect();
        self.relayout(items, targets, cross_size, cross_size);
    }
}
