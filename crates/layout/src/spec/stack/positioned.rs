use super::unpositioned::{baseline_for_item, StackItem, StackLine, UnpositionedLayout};
use super::{compute_violation, StackStyle};
use crate::layout::Layout;
use trellis_style::{StackAlignment, StackContentAlignment, StackItemJustification};
use trellis_types::{Size, SizeRange};

pub(super) struct PositionedLayout {
    pub sublayouts: Vec<Layout>,
    pub size: Size,
}

/// Offset of the first item and the extra gap between items. `remainder`
/// is whatever floor rounding left over; it widens the last gap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Distribution {
    offset: f64,
    spacing: f64,
    remainder: f64,
}

fn justify(justification: StackItemJustification, count: usize, violation: f64) -> Distribution {
    if count == 0 || violation == 0.0 {
        return Distribution::default();
    }
    let center = Distribution {
        offset: (violation / 2.0).floor(),
        ..Distribution::default()
    };
    let single_or_overflow = count == 1 || violation < 0.0;

    match justification {
        StackItemJustification::Start => Distribution::default(),
        StackItemJustification::Center => center,
        StackItemJustification::End => Distribution {
            offset: violation,
            ..Distribution::default()
        },
        StackItemJustification::SpaceBetween if single_or_overflow => Distribution::default(),
        StackItemJustification::SpaceBetween => {
            let gaps = (count - 1) as f64;
            let spacing = (violation / gaps).floor();
            Distribution {
                offset: 0.0,
                spacing,
                remainder: violation - spacing * gaps,
            }
        }
        StackItemJustification::SpaceAround if single_or_overflow => center,
        StackItemJustification::SpaceAround => {
            // Edges get half the space of an inner gap.
            let unit = (violation / (2 * count) as f64).floor();
            Distribution {
                offset: unit,
                spacing: unit * 2.0,
                remainder: violation - unit * (2 * count) as f64,
            }
        }
    }
}

fn align_content(alignment: StackContentAlignment, lines: usize, violation: f64) -> (f64, f64) {
    if lines == 0 {
        return (0.0, 0.0);
    }
    match alignment {
        StackContentAlignment::Start | StackContentAlignment::Stretch => (0.0, 0.0),
        StackContentAlignment::Center => (violation / 2.0, 0.0),
        StackContentAlignment::End => (violation, 0.0),
        StackContentAlignment::SpaceBetween if lines > 1 => (0.0, violation / (lines - 1) as f64),
        StackContentAlignment::SpaceBetween => (0.0, 0.0),
        StackContentAlignment::SpaceAround => {
            let spacing = violation / lines as f64;
            (spacing / 2.0, spacing)
        }
    }
}

fn cross_offset(style: &StackStyle, line: &StackLine, item: &StackItem) -> f64 {
    let item_cross = style.axis.cross(item.layout.size);
    match item.props.self_alignment.resolve(style.alignment) {
        StackAlignment::End => line.cross_size - item_cross,
        StackAlignment::Center => ((line.cross_size - item_cross) / 2.0).floor(),
        StackAlignment::BaselineFirst | StackAlignment::BaselineLast => {
            line.baseline - baseline_for_item(style, item)
        }
        StackAlignment::Start | StackAlignment::Stretch | StackAlignment::None => 0.0,
    }
}

pub(super) fn compute(style: &StackStyle, layout: UnpositionedLayout, size_range: SizeRange) -> PositionedLayout {
    let axis = style.axis;
    let cross_violation = compute_violation(
        layout.cross_dimension_sum,
        axis.cross(size_range.min),
        axis.cross(size_range.max),
    );
    let (mut cross, cross_spacing) = align_content(style.content_alignment, layout.lines.len(), cross_violation);

    let mut sublayouts = Vec::new();
    for (line_index, line) in layout.lines.iter().enumerate() {
        if line_index > 0 {
            cross += style.line_spacing + cross_spacing;
        }

        let count = line.items.len();
        let stack_violation = compute_violation(
            line.stack_dimension_sum,
            axis.stack(size_range.min),
            axis.stack(size_range.max),
        );
        let distribution = justify(style.justification, count, stack_violation);

        let mut stack = distribution.offset;
        for (i, item) in line.items.iter().enumerate() {
            stack += item.props.spacing_before;
            if i > 0 {
                stack += style.spacing + distribution.spacing;
                if i == count - 1 {
                    stack += distribution.remainder;
                }
            }
            let position = axis.point(stack, cross + cross_offset(style, line, item));
            sublayouts.push(item.layout.clone().with_position(position));
            stack += axis.stack(item.layout.size) + item.props.spacing_after;
        }

        cross += line.cross_size;
    }

    let size = axis.size(layout.stack_dimension_sum, layout.cross_dimension_sum);
    PositionedLayout {
        sublayouts,
        size: size_range.clamp(size),
    }
}
