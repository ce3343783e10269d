//! Authored constraint edges of a component and the rules deciding which
//! synthesized default edges it still needs.

use super::edge::LayoutObject;
use serde::{Deserialize, Serialize};
use trellis_types::{LayoutAttribute, LayoutObjectId};

const HORIZONTAL_POSITIONING: [LayoutAttribute; 5] = [
    LayoutAttribute::Left,
    LayoutAttribute::Right,
    LayoutAttribute::Leading,
    LayoutAttribute::Trailing,
    LayoutAttribute::CenterX,
];

const VERTICAL_POSITIONING: [LayoutAttribute; 3] = [
    LayoutAttribute::Top,
    LayoutAttribute::Bottom,
    LayoutAttribute::CenterY,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentConstraints {
    pub layout_objects: Vec<LayoutObject>,
    /// Synthesized edges pinning an under-constrained component.
    pub default_layout_objects: Vec<LayoutObject>,
}

impl ComponentConstraints {
    pub fn new(layout_objects: Vec<LayoutObject>) -> Self {
        Self {
            layout_objects,
            default_layout_objects: Vec::new(),
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = &LayoutObject> {
        self.layout_objects.iter().chain(self.default_layout_objects.iter())
    }

    pub fn find(&self, id: &LayoutObjectId) -> Option<&LayoutObject> {
        self.edges().find(|e| &e.id == id)
    }

    /// No authored edge on `attribute` has an active meta.
    pub fn is_attribute_completely_disabled(&self, attribute: LayoutAttribute) -> bool {
        self.layout_objects
            .iter()
            .filter(|e| e.attribute == attribute)
            .all(LayoutObject::is_completely_deactivated)
    }

    fn active_count(&self, attributes: &[LayoutAttribute]) -> usize {
        attributes
            .iter()
            .filter(|a| !self.is_attribute_completely_disabled(**a))
            .count()
    }

    pub fn needs_top_default_layout_object(&self) -> bool {
        VERTICAL_POSITIONING
            .iter()
            .all(|a| self.is_attribute_completely_disabled(*a))
    }

    pub fn needs_left_default_layout_object(&self) -> bool {
        HORIZONTAL_POSITIONING
            .iter()
            .all(|a| self.is_attribute_completely_disabled(*a))
    }

    /// Two horizontal positioning edges already imply a width.
    pub fn needs_width_default_layout_object(&self) -> bool {
        self.is_attribute_completely_disabled(LayoutAttribute::Width)
            && self.active_count(&HORIZONTAL_POSITIONING) < 2
    }

    pub fn needs_height_default_layout_object(&self) -> bool {
        self.is_attribute_completely_disabled(LayoutAttribute::Height)
            && self.active_count(&VERTICAL_POSITIONING) < 2
    }

    pub fn needs_default_layout_object(&self, attribute: LayoutAttribute) -> bool {
        match attribute {
            LayoutAttribute::Top => self.needs_top_default_layout_object(),
            LayoutAttribute::Left => self.needs_left_default_layout_object(),
            LayoutAttribute::Width => self.needs_width_default_layout_object(),
            LayoutAttribute::Height => self.needs_height_default_layout_object(),
            _ => false,
        }
    }
}
