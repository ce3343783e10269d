use thiserror::Error;
use trellis_layout::LayoutError;
use trellis_source::SourceError;

/// Errors surfaced by the facade and the command line tool.
#[derive(Error, Debug)]
pub enum TrellisError {
    #[error("Loading the layout source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}
