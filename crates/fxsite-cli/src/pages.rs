//! Page-update plumbing shared by the jobs.

use std::path::Path;

use fxsite_render::{update_page, RenderError};

/// Apply `edit` to the page at `rel` under `site_root` and report whether the
/// file changed. A missing page is skipped unless `required`.
///
/// # Errors
///
/// Returns an error for a missing required page, a marker failure, or an
/// I/O failure. Nothing is written in those cases.
pub(crate) fn edit_page<F>(
    site_root: &Path,
    rel: &str,
    required: bool,
    edit: F,
) -> anyhow::Result<bool>
where
    F: FnOnce(&str) -> Result<String, RenderError>,
{
    let path = site_root.join(rel);
    let outcome =
        update_page(&path, edit).map_err(|e| anyhow::anyhow!("failed to update {rel}: {e}"))?;
    match outcome {
        Some(changed) => Ok(changed),
        None if required => anyhow::bail!("required page {rel} does not exist"),
        None => {
            tracing::debug!(path = %path.display(), "optional page missing; skipping");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_page_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let changed = edit_page(dir.path(), "news/index.html", false, |html| Ok(html.to_string()))
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn missing_required_page_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = edit_page(dir.path(), "index.html", true, |html| Ok(html.to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn marker_error_names_the_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<main></main>").unwrap();
        let err = edit_page(dir.path(), "index.html", true, |html| {
            fxsite_render::replace_region(html, "<!-- A -->", "<!-- B -->", "x", "")
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to update index.html"));
    }
}
