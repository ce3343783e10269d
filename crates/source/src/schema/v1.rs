//! Version 1 of the layout source format.
//!
//! These structs mirror the JSON document field for field. They are decoded
//! into the runtime model by [`crate::decode`] and never used by layout.

use serde::Deserialize;
use trellis_style::{
    AbsoluteSizing, StackAlignment, StackAxis, StackContentAlignment, StackFlexWrap, StackHorizontalAlignment,
    StackItemJustification, StackSelfAlignment, StackVerticalAlignment,
};
use trellis_traits::{TextAttributes, TextHostKind};
use trellis_types::{LayoutAttribute, Point};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub project_colors: Vec<ProjectColor>,
    #[serde(default)]
    pub text_descriptors: Vec<TextDescriptorEntry>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectColor {
    pub identifier: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDescriptorEntry {
    pub identifier: String,
    pub text: String,
    #[serde(default)]
    pub attributes: TextAttributes,
    #[serde(default)]
    pub host_kind: TextHostKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub layout_spec: Option<LayoutSpec>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, rename = "textDescriptorID")]
    pub text_descriptor_id: Option<String>,
    #[serde(default)]
    pub layout_objects: Vec<LayoutObject>,
    #[serde(default)]
    pub default_layout_objects: Vec<LayoutObject>,
    #[serde(default)]
    pub child_components: Vec<Component>,
}

/// A dimension as written: a bare number of points or a string such as
/// `"12pt"`, `"50%"` or `"auto"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Points(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Size {
    pub width: Option<DimensionValue>,
    pub height: Option<DimensionValue>,
    pub min_width: Option<DimensionValue>,
    pub max_width: Option<DimensionValue>,
    pub min_height: Option<DimensionValue>,
    pub max_height: Option<DimensionValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    pub spacing_before: f64,
    pub spacing_after: f64,
    pub flex_grow: f64,
    pub flex_shrink: f64,
    pub flex_basis: Option<DimensionValue>,
    pub self_alignment: StackSelfAlignment,
    pub ascender: f64,
    pub descender: f64,
    pub position: Point,
    pub size: Size,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutSpec {
    Absolute {
        #[serde(default)]
        sizing: AbsoluteSizing,
    },
    Stack(StackSpec),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackSpec {
    pub axis: StackAxis,
    pub spacing: f64,
    pub horizontal_alignment: StackHorizontalAlignment,
    pub vertical_alignment: StackVerticalAlignment,
    pub item_justification: StackItemJustification,
    pub alignment: StackAlignment,
    pub flex_wrap: StackFlexWrap,
    pub content_alignment: StackContentAlignment,
    pub line_spacing: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutObject {
    pub identifier: String,
    /// Defaults to the component the edge is declared on.
    #[serde(default)]
    pub component_identifier: Option<String>,
    pub attribute: LayoutAttribute,
    #[serde(default)]
    pub related_component_identifier: Option<String>,
    #[serde(default)]
    pub related_attribute: LayoutAttribute,
    #[serde(default)]
    pub common_ancestor_component_identifier: Option<String>,
    #[serde(default)]
    pub default_layout: bool,
    #[serde(default)]
    pub ideal_meta: Option<LayoutMeta>,
    #[serde(default)]
    pub min_meta: Option<LayoutMeta>,
    #[serde(default)]
    pub max_meta: Option<LayoutMeta>,
    #[serde(default)]
    pub linked_to_text_size: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMeta {
    #[serde(default)]
    pub constant: f64,
    #[serde(default)]
    pub multiplier: f64,
    #[serde(default)]
    pub proportional_layout_object_identifier: Option<String>,
    #[serde(default)]
    pub proportional_attribute: LayoutAttribute,
    #[serde(default)]
    pub state: MetaState,
}

/// Meta strength as written. `def` is accepted for `default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetaState {
    #[default]
    Disabled,
    #[serde(alias = "def")]
    Default,
    Low,
    NotRequired,
    Required,
}
