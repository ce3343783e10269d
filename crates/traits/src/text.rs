//! Text measurement interface.
//!
//! The layout core never shapes text itself. A host supplies a
//! [`TextMeasurer`] that turns a descriptor and a bounding box into metrics.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use trellis_types::{Insets, Size};

/// The kind of native control hosting the text. Each kind has its own
/// intrinsic insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextHostKind {
    #[default]
    Label,
    TextField,
    TextView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributes {
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Line height multiple, 1.0 when unset.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub letter_spacing: f64,
}

fn default_font_size() -> f64 {
    14.0
}

fn default_line_height() -> f64 {
    1.0
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            font_name: None,
            font_size: default_font_size(),
            line_height: default_line_height(),
            letter_spacing: 0.0,
        }
    }
}

impl Eq for TextAttributes {}

impl Hash for TextAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font_name.hash(state);
        self.font_size.to_bits().hash(state);
        self.line_height.to_bits().hash(state);
        self.letter_spacing.to_bits().hash(state);
    }
}

/// Text plus the attributes it is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextDescriptor {
    pub text: String,
    #[serde(default)]
    pub attributes: TextAttributes,
    #[serde(default)]
    pub host_kind: TextHostKind,
}

impl TextDescriptor {
    pub fn new(text: impl Into<String>, attributes: TextAttributes) -> Self {
        Self {
            text: text.into(),
            attributes,
            host_kind: TextHostKind::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub text_size: Size,
    pub text_margins: Insets,
    pub view_insets: Insets,
}

impl TextMetrics {
    /// Height of the hosting view for the measured text.
    pub fn content_height(&self) -> f64 {
        self.text_size.height + self.text_margins.vertical()
    }

    /// Width of the hosting view for the measured text.
    pub fn content_width(&self) -> f64 {
        self.text_size.width + self.text_margins.horizontal()
    }
}

/// Measures text for a given host kind within `bounds`.
///
/// Must be a pure function of its arguments; results are cached by callers.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, descriptor: &TextDescriptor, host: TextHostKind, bounds: Size) -> TextMetrics;
}
