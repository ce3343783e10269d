use serde::{Deserialize, Serialize};
use trellis_types::{ComponentId, LayoutAttribute, LayoutObjectId};

/// Strength with which an edge meta is applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum LayoutState {
    #[default]
    Disabled,
    Default,
    Low,
    NotRequired,
    Required,
}

/// Which bound of an edge a meta describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum MetaType {
    #[default]
    None,
    Ideal,
    Min,
    Max,
}

/// One bound (ideal, min or max) of a constraint edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutMeta {
    pub constant: f64,
    pub multiplier: f64,
    /// `"componentId|layoutObjectId"` of the edge this one is proportional to.
    pub proportional_layout_object_id: Option<String>,
    pub proportional_attribute: LayoutAttribute,
    pub state: LayoutState,
    pub meta_type: MetaType,
}

impl LayoutMeta {
    pub fn new(constant: f64, state: LayoutState, meta_type: MetaType) -> Self {
        Self {
            constant,
            state,
            meta_type,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != LayoutState::Disabled
    }

    pub fn is_proportional(&self) -> bool {
        self.multiplier != 0.0 && self.proportional_layout_object_id.is_some()
    }

    /// Splits the proportional id into its component and edge halves.
    pub fn proportional_target(&self) -> Option<(ComponentId, LayoutObjectId)> {
        let raw = self.proportional_layout_object_id.as_deref()?;
        let mut parts = raw.split('|');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(component), Some(edge), None) => {
                Some((ComponentId::new(component), LayoutObjectId::new(edge)))
            }
            _ => None,
        }
    }
}

/// An authored or synthesized constraint on one attribute of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutObject {
    pub id: LayoutObjectId,
    pub component_id: ComponentId,
    pub attribute: LayoutAttribute,
    #[serde(default)]
    pub related_component_id: Option<ComponentId>,
    #[serde(default)]
    pub related_attribute: LayoutAttribute,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub ideal_meta: LayoutMeta,
    #[serde(default)]
    pub min_meta: LayoutMeta,
    #[serde(default)]
    pub max_meta: LayoutMeta,
    /// Host of any spacer view a proportional meta needs.
    #[serde(default)]
    pub common_ancestor_component_id: Option<ComponentId>,
    #[serde(default)]
    pub is_linked_to_text_size: bool,
}

impl LayoutObject {
    /// An edge with only an active ideal meta.
    pub fn ideal(
        id: impl Into<LayoutObjectId>,
        component_id: impl Into<ComponentId>,
        attribute: LayoutAttribute,
        constant: f64,
    ) -> Self {
        Self {
            id: id.into(),
            component_id: component_id.into(),
            attribute,
            related_component_id: None,
            related_attribute: LayoutAttribute::NotAnAttribute,
            is_default: false,
            ideal_meta: LayoutMeta::new(constant, LayoutState::Required, MetaType::Ideal),
            min_meta: LayoutMeta::new(0.0, LayoutState::Disabled, MetaType::Min),
            max_meta: LayoutMeta::new(0.0, LayoutState::Disabled, MetaType::Max),
            common_ancestor_component_id: None,
            is_linked_to_text_size: false,
        }
    }

    pub fn related_to(mut self, component: impl Into<ComponentId>, attribute: LayoutAttribute) -> Self {
        self.related_component_id = Some(component.into());
        self.related_attribute = attribute;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn is_sizing(&self) -> bool {
        self.attribute.is_sizing()
    }

    pub fn is_horizontal(&self) -> bool {
        self.attribute.is_horizontal()
    }

    pub fn is_vertical(&self) -> bool {
        self.attribute.is_vertical()
    }

    pub fn is_completely_deactivated(&self) -> bool {
        !self.ideal_meta.is_active() && !self.min_meta.is_active() && !self.max_meta.is_active()
    }

    pub fn metas(&self) -> [&LayoutMeta; 3] {
        [&self.ideal_meta, &self.min_meta, &self.max_meta]
    }

    pub fn meta(&self, meta_type: MetaType) -> Option<&LayoutMeta> {
        match meta_type {
            MetaType::Ideal => Some(&self.ideal_meta),
            MetaType::Min => Some(&self.min_meta),
            MetaType::Max => Some(&self.max_meta),
            MetaType::None => None,
        }
    }

    pub fn meta_mut(&mut self, meta_type: MetaType) -> Option<&mut LayoutMeta> {
        match meta_type {
            MetaType::Ideal => Some(&mut self.ideal_meta),
            MetaType::Min => Some(&mut self.min_meta),
            MetaType::Max => Some(&mut self.max_meta),
            MetaType::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_target_requires_two_parts() {
        let mut meta = LayoutMeta {
            multiplier: 0.5,
            proportional_layout_object_id: Some("root|edge-1".into()),
            ..LayoutMeta::default()
        };
        assert!(meta.is_proportional());
        assert_eq!(
            meta.proportional_target(),
            Some((ComponentId::new("root"), LayoutObjectId::new("edge-1")))
        );

        meta.proportional_layout_object_id = Some("a|b|c".into());
        assert_eq!(meta.proportional_target(), None);
        meta.proportional_layout_object_id = Some("plain".into());
        assert_eq!(meta.proportional_target(), None);
    }

    #[test]
    fn test_zero_multiplier_is_not_proportional() {
        let meta = LayoutMeta {
            proportional_layout_object_id: Some("a|b".into()),
            ..LayoutMeta::default()
        };
        assert!(!meta.is_proportional());
    }

    #[test]
    fn test_completely_deactivated() {
        let mut edge = LayoutObject::ideal("e", "c", LayoutAttribute::Top, 4.0);
        assert!(!edge.is_completely_deactivated());
        edge.ideal_meta.state = LayoutState::Disabled;
        assert!(edge.is_completely_deactivated());
    }
}
