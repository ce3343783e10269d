//! Enums configuring stack and absolute layout specs.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Distribution of children along the stack axis.
///
/// On overflow `SpaceBetween` behaves like `Start` and `SpaceAround` like `Center`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackItemJustification {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

/// Placement of children along the cross axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackAlignment {
    Start,
    End,
    Center,
    #[default]
    Stretch,
    BaselineFirst,
    BaselineLast,
    None,
}

impl StackAlignment {
    pub fn is_baseline(self) -> bool {
        matches!(self, StackAlignment::BaselineFirst | StackAlignment::BaselineLast)
    }
}

/// Per-child override of the stack's cross-axis alignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackSelfAlignment {
    #[default]
    Auto,
    Start,
    End,
    Center,
    Stretch,
    BaselineFirst,
    BaselineLast,
}

impl StackSelfAlignment {
    /// Resolves against the containing stack's alignment.
    pub fn resolve(self, stack_alignment: StackAlignment) -> StackAlignment {
        match self {
            StackSelfAlignment::Auto => stack_alignment,
            StackSelfAlignment::Start => StackAlignment::Start,
            StackSelfAlignment::End => StackAlignment::End,
            StackSelfAlignment::Center => StackAlignment::Center,
            StackSelfAlignment::Stretch => StackAlignment::Stretch,
            StackSelfAlignment::BaselineFirst => StackAlignment::BaselineFirst,
            StackSelfAlignment::BaselineLast => StackAlignment::BaselineLast,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackFlexWrap {
    #[default]
    NoWrap,
    Wrap,
}

/// Placement of lines along the cross axis when the stack wraps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackContentAlignment {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    Stretch,
}

/// Axis-independent horizontal placement. Overrides justification on a
/// horizontal stack and alignment on a vertical one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackHorizontalAlignment {
    #[default]
    None,
    Left,
    Middle,
    Right,
}

impl StackHorizontalAlignment {
    pub fn alignment(self, fallback: StackAlignment) -> StackAlignment {
        match self {
            StackHorizontalAlignment::None => fallback,
            StackHorizontalAlignment::Left => StackAlignment::Start,
            StackHorizontalAlignment::Middle => StackAlignment::Center,
            StackHorizontalAlignment::Right => StackAlignment::End,
        }
    }

    pub fn justification(self, fallback: StackItemJustification) -> StackItemJustification {
        match self {
            StackHorizontalAlignment::None => fallback,
            StackHorizontalAlignment::Left => StackItemJustification::Start,
            StackHorizontalAlignment::Middle => StackItemJustification::Center,
            StackHorizontalAlignment::Right => StackItemJustification::End,
        }
    }
}

/// Axis-independent vertical placement. Overrides justification on a
/// vertical stack and alignment on a horizontal one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum StackVerticalAlignment {
    #[default]
    None,
    Top,
    Center,
    Bottom,
}

impl StackVerticalAlignment {
    pub fn alignment(self, fallback: StackAlignment) -> StackAlignment {
        match self {
            StackVerticalAlignment::None => fallback,
            StackVerticalAlignment::Top => StackAlignment::Start,
            StackVerticalAlignment::Center => StackAlignment::Center,
            StackVerticalAlignment::Bottom => StackAlignment::End,
        }
    }

    pub fn justification(self, fallback: StackItemJustification) -> StackItemJustification {
        match self {
            StackVerticalAlignment::None => fallback,
            StackVerticalAlignment::Top => StackItemJustification::Start,
            StackVerticalAlignment::Center => StackItemJustification::Center,
            StackVerticalAlignment::Bottom => StackItemJustification::End,
        }
    }
}

/// How much room an absolute spec claims.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum AbsoluteSizing {
    /// The maximum constrained size.
    #[default]
    Default,
    /// The union of all children's frames.
    SizeToFit,
}
