//! Licensed review jobs: normalize exports, then rebuild the site1 pages.

use chrono::{DateTime, Utc};
use fxsite_core::{load_brokers, AppConfig};
use fxsite_reviews::{
    normalize_exports, read_document, read_exports, rebuild_pages, write_document,
};

/// Read every export and write the consolidated reviews document.
///
/// # Errors
///
/// Returns an error if the broker registry cannot be loaded, an export is
/// malformed, or the document cannot be written.
pub(crate) fn run_normalize(config: &AppConfig, now: DateTime<Utc>) -> anyhow::Result<()> {
    let registry = load_brokers(&config.brokers_path)?;
    let exports_dir = config.exports_dir();
    let files = read_exports(&exports_dir)
        .map_err(|e| anyhow::anyhow!("failed to read review exports: {e}"))?;

    let doc = normalize_exports(&files, &registry, now);
    let total: usize = doc.brokers.values().map(|b| b.reviews.len()).sum();
    tracing::info!(files = files.len(), reviews = total, "reviews normalized");

    let output = config.normalized_reviews_path();
    write_document(&output, &doc).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!(
        "Normalized reviews written: {} (files={})",
        output.display(),
        files.len()
    );
    Ok(())
}

/// Rebuild the review regions from the normalized document.
///
/// # Errors
///
/// Returns an error if the document cannot be read, or after processing
/// every page if any of them failed.
pub(crate) fn run_rebuild(config: &AppConfig) -> anyhow::Result<()> {
    let registry = load_brokers(&config.brokers_path)?;
    let doc = read_document(&config.normalized_reviews_path())
        .map_err(|e| anyhow::anyhow!("failed to load normalized reviews: {e}"))?;

    let report = rebuild_pages(&config.site_root, &registry, &doc);
    for path in &report.updated {
        println!("Updated {}", path.display());
    }
    if report.updated.is_empty() {
        println!("Review pages already up to date.");
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} review page(s) could not be rebuilt",
            report.failures.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use chrono::TimeZone;
    use fxsite_core::Environment;

    use super::*;

    fn config(root: &Path) -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            site_root: root.to_path_buf(),
            brokers_path: root.join("brokers.yaml"),
            feeds_path: root.join("feeds.yaml"),
            fetch_timeout_secs: 12,
            user_agent: "test".to_string(),
            freshness_days: 45,
            snapshot_limit: 4,
            snapshot_max_chars: 180,
            reviews_exports_dir: PathBuf::from("data/reviews/exports"),
            reviews_output: PathBuf::from("data/reviews/normalized.json"),
        }
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn setup() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "brokers.yaml",
            "brokers:\n  - slug: exness\n    name: Exness\n    logo_url: https://cdn.example.com/e.png\n",
        );
        write(
            dir.path(),
            "data/reviews/exports/partner.csv",
            "broker,rating,text,date,author\nexness,4,Solid platform,2026-02-01,Ana Ruiz\n",
        );
        dir
    }

    #[test]
    fn normalize_writes_document_under_site_root() {
        let dir = setup();
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
        run_normalize(&config(dir.path()), now).unwrap();

        let doc = read_document(&dir.path().join("data/reviews/normalized.json")).unwrap();
        assert_eq!(doc.brokers["exness"].reviews.len(), 1);
        assert_eq!(doc.brokers["exness"].reviews[0].author_display, "Ana R.");
    }

    #[test]
    fn rebuild_fails_when_pages_are_missing() {
        let dir = setup();
        let config = config(dir.path());
        run_normalize(&config, Utc::now()).unwrap();

        let err = run_rebuild(&config).unwrap_err();
        assert!(err.to_string().contains("2 review page(s)"));
    }

    #[test]
    fn rebuild_without_document_fails() {
        let dir = setup();
        let err = run_rebuild(&config(dir.path())).unwrap_err();
        assert!(err.to_string().contains("normalized reviews"));
    }
}
