use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A target page lacks a marker pair, or the end marker precedes the start.
    #[error("markers not found or out of order: {start} ... {end}")]
    MarkersNotFound { start: String, end: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid region sidecar {}: {source}", .path.display())]
    Sidecar {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
