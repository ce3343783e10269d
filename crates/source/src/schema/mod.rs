pub mod v1;

use serde::Deserialize;

fn first_version() -> u32 {
    1
}

/// Reads only the format version. Documents without one are version 1.
#[derive(Debug, Deserialize)]
pub(crate) struct VersionProbe {
    #[serde(default = "first_version")]
    pub version: u32,
}

pub const SUPPORTED_VERSIONS: &[u32] = &[1];
