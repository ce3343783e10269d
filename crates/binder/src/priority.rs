//! Mapping from edge metadata to native constraint parameters.

use trellis_layout::{LayoutState, MetaType};
use trellis_traits::{ConstraintRelation, LayoutPriority};

/// Native priority for a meta state. Disabled metas are never applied.
///
/// Required > NotRequired > Default > Low, so an authored low-priority
/// edge yields to a synthesized default one.
pub fn priority_for(state: LayoutState) -> Option<LayoutPriority> {
    match state {
        LayoutState::Disabled => None,
        LayoutState::Required => Some(LayoutPriority::REQUIRED),
        LayoutState::NotRequired => Some(LayoutPriority::DEFAULT_HIGH),
        LayoutState::Default => Some(LayoutPriority::DEFAULT_HIGH.offset(-1.0)),
        LayoutState::Low => Some(LayoutPriority::DEFAULT_HIGH.offset(-2.0)),
    }
}

pub fn relation_for(meta_type: MetaType) -> ConstraintRelation {
    match meta_type {
        MetaType::Min => ConstraintRelation::GreaterThanOrEqual,
        MetaType::Max => ConstraintRelation::LessThanOrEqual,
        MetaType::Ideal | MetaType::None => ConstraintRelation::Equal,
    }
}
