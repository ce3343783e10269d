//! Conversion from the version 1 schema into the runtime model.

use crate::error::SourceError;
use crate::schema::v1;
use std::collections::HashMap;
use trellis_layout::{
    AbsoluteLayoutSpec, ComponentNode, ComponentTree, LayoutError, LayoutMeta, LayoutObject, LayoutPropertyValues,
    LayoutSpec, LayoutState, MetaType, NodeId, StackLayoutSpec,
};
use trellis_style::{parse_dimension, Dimension, DimensionUnit, LayoutSize};
use trellis_traits::TextDescriptor;
use trellis_types::{Color, ComponentId};

/// Everything a decoded document produces.
#[derive(Debug, Default)]
pub struct Decoded {
    pub tree: ComponentTree,
    pub project_colors: HashMap<String, Color>,
    pub text_descriptors: HashMap<String, TextDescriptor>,
}

pub fn decode_document(document: v1::Document) -> Result<Decoded, SourceError> {
    let mut decoded = Decoded::default();

    for entry in document.project_colors {
        let color = Color::parse_hex(&entry.color).map_err(|message| SourceError::InvalidColor {
            identifier: entry.identifier.clone(),
            message,
        })?;
        decoded.project_colors.insert(entry.identifier, color);
    }

    for entry in document.text_descriptors {
        let descriptor = TextDescriptor {
            text: entry.text,
            attributes: entry.attributes,
            host_kind: entry.host_kind,
        };
        decoded.text_descriptors.insert(entry.identifier, descriptor);
    }

    for component in document.components {
        insert_component(&mut decoded, None, component)?;
    }
    log::debug!(
        "Decoded {} components, {} colors, {} text descriptors",
        decoded.tree.len(),
        decoded.project_colors.len(),
        decoded.text_descriptors.len()
    );
    Ok(decoded)
}

fn insert_component(
    decoded: &mut Decoded,
    parent: Option<NodeId>,
    component: v1::Component,
) -> Result<NodeId, SourceError> {
    let id = ComponentId::new(component.identifier.as_str());
    let mut node = ComponentNode::new(id.clone())
        .with_spec(component.layout_spec.map(layout_spec).unwrap_or_default())
        .with_properties(properties(&id, component.properties)?);
    if let Some(name) = component.name {
        node = node.with_name(name);
    }
    if let Some(text_id) = component.text_descriptor_id {
        match decoded.text_descriptors.get(&text_id) {
            Some(descriptor) => node = node.with_text(descriptor.clone()),
            None => log::warn!("Component '{}' refers to unknown text descriptor '{}'", id, text_id),
        }
    }

    let layout_objects = component
        .layout_objects
        .into_iter()
        .map(|edge| layout_object(&id, edge))
        .collect();
    let default_layout_objects = component
        .default_layout_objects
        .into_iter()
        .map(|edge| layout_object(&id, edge).as_default())
        .collect();
    node = node.with_layout_objects(layout_objects);

    let inserted = match parent {
        Some(parent) => decoded.tree.add_child(parent, node),
        None => decoded.tree.add_root(node),
    };
    let node_id = inserted.map_err(|e| match e {
        LayoutError::DuplicateComponent(id) => SourceError::DuplicateComponent(id),
        other => SourceError::Layout(other),
    })?;
    decoded.tree[node_id].constraints_mut().default_layout_objects = default_layout_objects;

    for child in component.child_components {
        insert_component(decoded, Some(node_id), child)?;
    }
    Ok(node_id)
}

fn layout_spec(spec: v1::LayoutSpec) -> LayoutSpec {
    match spec {
        v1::LayoutSpec::Absolute { sizing } => AbsoluteLayoutSpec::new(sizing).into(),
        v1::LayoutSpec::Stack(stack) => StackLayoutSpec {
            axis: stack.axis,
            spacing: stack.spacing,
            horizontal_alignment: stack.horizontal_alignment,
            vertical_alignment: stack.vertical_alignment,
            item_justification: stack.item_justification,
            alignment: stack.alignment,
            flex_wrap: stack.flex_wrap,
            content_alignment: stack.content_alignment,
            line_spacing: stack.line_spacing,
        }
        .into(),
    }
}

fn dimension(
    component: &ComponentId,
    property: &str,
    value: Option<v1::DimensionValue>,
) -> Result<Dimension, SourceError> {
    let invalid = |value: String, source| SourceError::InvalidDimension {
        component: component.clone(),
        property: property.to_string(),
        value,
        source,
    };
    match value {
        None => Ok(Dimension::AUTO),
        Some(v1::DimensionValue::Points(points)) => {
            Dimension::try_new(DimensionUnit::Points, points).map_err(|e| invalid(points.to_string(), e))
        }
        Some(v1::DimensionValue::Text(text)) => parse_dimension(&text).map_err(|e| invalid(text, e)),
    }
}

fn properties(component: &ComponentId, p: v1::Properties) -> Result<LayoutPropertyValues, SourceError> {
    let size = LayoutSize {
        width: dimension(component, "width", p.size.width)?,
        height: dimension(component, "height", p.size.height)?,
        min_width: dimension(component, "minWidth", p.size.min_width)?,
        max_width: dimension(component, "maxWidth", p.size.max_width)?,
        min_height: dimension(component, "minHeight", p.size.min_height)?,
        max_height: dimension(component, "maxHeight", p.size.max_height)?,
    };
    Ok(LayoutPropertyValues {
        spacing_before: p.spacing_before,
        spacing_after: p.spacing_after,
        flex_grow: p.flex_grow,
        flex_shrink: p.flex_shrink,
        flex_basis: dimension(component, "flexBasis", p.flex_basis)?,
        self_alignment: p.self_alignment,
        ascender: p.ascender,
        descender: p.descender,
        position: p.position,
        size,
    })
}

fn layout_state(state: v1::MetaState) -> LayoutState {
    match state {
        v1::MetaState::Disabled => LayoutState::Disabled,
        v1::MetaState::Default => LayoutState::Default,
        v1::MetaState::Low => LayoutState::Low,
        v1::MetaState::NotRequired => LayoutState::NotRequired,
        v1::MetaState::Required => LayoutState::Required,
    }
}

fn layout_meta(meta: Option<v1::LayoutMeta>, meta_type: MetaType) -> LayoutMeta {
    let Some(meta) = meta else {
        return LayoutMeta::new(0.0, LayoutState::Disabled, meta_type);
    };
    LayoutMeta {
        constant: meta.constant,
        multiplier: meta.multiplier,
        proportional_layout_object_id: meta.proportional_layout_object_identifier,
        proportional_attribute: meta.proportional_attribute,
        state: layout_state(meta.state),
        meta_type,
    }
}

fn layout_object(owner: &ComponentId, edge: v1::LayoutObject) -> LayoutObject {
    let component_id = edge
        .component_identifier
        .map(ComponentId::from)
        .unwrap_or_else(|| owner.clone());
    LayoutObject {
        id: edge.identifier.into(),
        component_id,
        attribute: edge.attribute,
        related_component_id: edge.related_component_identifier.map(ComponentId::from),
        related_attribute: edge.related_attribute,
        is_default: edge.default_layout,
        ideal_meta: layout_meta(edge.ideal_meta, MetaType::Ideal),
        min_meta: layout_meta(edge.min_meta, MetaType::Min),
        max_meta: layout_meta(edge.max_meta, MetaType::Max),
        common_ancestor_component_id: edge.common_ancestor_component_identifier.map(ComponentId::from),
        is_linked_to_text_size: edge.linked_to_text_size,
    }
}
