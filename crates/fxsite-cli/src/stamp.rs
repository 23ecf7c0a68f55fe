//! Fill in publish datetimes on teaser cards written with a placeholder.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use fxsite_core::AppConfig;
use fxsite_render::{all_skins, stamp_times};

use crate::pages::edit_page;

/// Pages that can carry unstamped teasers, relative to a skin directory.
const STAMPED_PAGES: &[&str] = &["index.html", "news/index.html"];

/// # Errors
///
/// Returns an error if a page cannot be read or written.
pub(crate) fn run_stamp(config: &AppConfig, now: DateTime<Utc>) -> anyhow::Result<()> {
    let now_iso = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let updated = apply_stamp(&config.site_root, &now_iso)?;

    if updated.is_empty() {
        println!("No publish datetimes to stamp.");
    } else {
        println!("Stamped publish datetimes ({now_iso}) in: {}", updated.join(", "));
    }
    Ok(())
}

/// Stamp every page that exists. Returns the site-relative paths that changed.
pub(crate) fn apply_stamp(site_root: &Path, now_iso: &str) -> anyhow::Result<Vec<String>> {
    let mut updated = Vec::new();
    for skin in all_skins() {
        for page in STAMPED_PAGES {
            let rel = format!("{}/{page}", skin.dir());
            if edit_page(site_root, &rel, false, |html| Ok(stamp_times(html, now_iso).0))? {
                updated.push(rel);
            }
        }
    }
    Ok(updated)
}
