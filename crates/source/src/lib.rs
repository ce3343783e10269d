//! Loading component trees from versioned JSON layout sources.
//!
//! A source document carries a `version` number. Version 1 is the only
//! supported format, and documents without a version are read as version 1.
//!
//! ```ignore
//! use trellis_source::LayoutSource;
//!
//! let source = LayoutSource::from_json(r#"{"components": [{"identifier": "root"}]}"#)?;
//! assert_eq!(source.tree().len(), 1);
//! ```

mod decode;
mod error;
pub mod schema;

pub use error::SourceError;

use schema::{v1, VersionProbe, SUPPORTED_VERSIONS};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use trellis_layout::{ComponentRepository, ComponentTree};
use trellis_traits::TextDescriptor;
use trellis_types::Color;

/// A decoded layout source: the component tree plus the project tables
/// its components refer to.
#[derive(Debug)]
pub struct LayoutSource {
    version: u32,
    tree: ComponentTree,
    project_colors: HashMap<String, Color>,
    text_descriptors: HashMap<String, TextDescriptor>,
}

impl LayoutSource {
    pub fn from_json(input: &str) -> Result<Self, SourceError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Dispatches on the document's `version` before decoding the rest.
    pub fn from_value(value: Value) -> Result<Self, SourceError> {
        let probe = VersionProbe::deserialize(&value)?;
        match probe.version {
            1 => {
                let document: v1::Document = serde_json::from_value(value)?;
                Self::from_document(document)
            }
            other => {
                log::error!(
                    "Layout source version {} is not one of {:?}",
                    other,
                    SUPPORTED_VERSIONS
                );
                Err(SourceError::UnsupportedVersion(other))
            }
        }
    }

    pub fn from_document(document: v1::Document) -> Result<Self, SourceError> {
        let decoded = decode::decode_document(document)?;
        Ok(Self {
            version: 1,
            tree: decoded.tree,
            project_colors: decoded.project_colors,
            text_descriptors: decoded.text_descriptors,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn into_tree(self) -> ComponentTree {
        self.tree
    }
}

impl ComponentRepository for LayoutSource {
    fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    fn project_color(&self, identifier: &str) -> Option<Color> {
        self.project_colors.get(identifier).copied()
    }

    fn text_descriptor(&self, identifier: &str) -> Option<&TextDescriptor> {
        self.text_descriptors.get(identifier)
    }
}
