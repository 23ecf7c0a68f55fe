//! Structured storage for regenerable region content.
//!
//! The headline job keeps its canonical item list in a small JSON file per
//! skin and treats the HTML purely as a rendering target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fxsite_feeds::FeedItem;

use crate::error::RenderError;
use crate::files::write_page;

#[derive(Debug, Clone)]
pub struct RegionSidecar {
    path: PathBuf,
}

impl RegionSidecar {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the stored items; a missing file is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] on read failure or
    /// [`RenderError::Sidecar`] if the file is not a valid item list.
    pub fn load(&self) -> Result<Vec<FeedItem>, RenderError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(RenderError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|e| RenderError::Sidecar {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Overwrite the sidecar with `items` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Sidecar`] if serialization fails or
    /// [`RenderError::Io`] if the file cannot be written.
    pub fn save(&self, items: &[FeedItem]) -> Result<(), RenderError> {
        let mut json = serde_json::to_string_pretty(items).map_err(|e| RenderError::Sidecar {
            path: self.path.clone(),
            source: e,
        })?;
        json.push('\n');
        write_page(&self.path, &json)
    }
}
