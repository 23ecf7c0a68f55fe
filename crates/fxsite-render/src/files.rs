//! Whole-file reads and writes for target pages.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::RenderError;

fn io_err(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a page, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns [`RenderError::Io`] for any failure other than not-found.
pub fn read_page(path: &Path) -> Result<Option<String>, RenderError> {
    match std::fs::read_to_string(path) {
        Ok(html) => Ok(Some(html)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Overwrite `path` with `contents`, creating parent directories.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if a directory or the file cannot be written.
pub fn write_page(path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| io_err(path, e))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote page");
    Ok(())
}

/// Write a page only if nothing exists at `path` yet. Returns whether it
/// was written.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the write fails.
pub fn write_page_if_absent(path: &Path, contents: &str) -> Result<bool, RenderError> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "page already exists; leaving it");
        return Ok(false);
    }
    write_page(path, contents)?;
    Ok(true)
}

/// Apply `edit` to an existing page and write the result back if it
/// differs. Returns `Ok(None)` when the page does not exist, otherwise
/// whether it changed.
///
/// Nothing is written when `edit` fails.
///
/// # Errors
///
/// Propagates the error from `edit`, or [`RenderError::Io`] from the read
/// or write.
pub fn update_page<F>(path: &Path, edit: F) -> Result<Option<bool>, RenderError>
where
    F: FnOnce(&str) -> Result<String, RenderError>,
{
    let Some(html) = read_page(path)? else {
        return Ok(None);
    };
    let next = edit(&html)?;
    if next == html {
        return Ok(Some(false));
    }
    write_page(path, &next)?;
    Ok(Some(true))
}
