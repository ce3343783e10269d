use thiserror::Error;
use trellis_layout::LayoutError;
use trellis_style::StyleParseError;
use trellis_types::ComponentId;

/// Failures while reading a layout source document.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Malformed layout source: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout source version {0} is not supported.")]
    UnsupportedVersion(u32),

    #[error("Component '{component}' has an invalid {property} '{value}': {source}")]
    InvalidDimension {
        component: ComponentId,
        property: String,
        value: String,
        source: StyleParseError,
    },

    #[error("Project color '{identifier}' is invalid: {message}")]
    InvalidColor { identifier: String, message: String },

    #[error("Component '{0}' is declared more than once.")]
    DuplicateComponent(ComponentId),

    #[error("Building the component tree failed: {0}")]
    Layout(LayoutError),
}
