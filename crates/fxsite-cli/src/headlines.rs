//! RSS headline lists for both skins.
//!
//! Fresh items are merged with the skin's sidecar archive, rendered into the
//! `RSS_NEWS` region of every headline page, and the archive is saved back.

use std::path::Path;

use chrono::{DateTime, Utc};
use fxsite_core::AppConfig;
use fxsite_feeds::{
    collect_feed_items, merge_keep_recent, region_focused, FeedClient, FeedItem, LatamMatcher,
};
use fxsite_render::skins::{RSS_NEWS_END, RSS_NEWS_START};
use fxsite_render::{
    all_skins, read_page, replace_region, MarkerRegion, RegionSidecar, Skin, ITEM_INDENT,
};

use crate::pages::edit_page;

/// Fresh items kept per skin before merging with the archive.
const FRESH_LIMIT: usize = 30;

/// Fetch, merge, and render headlines for every skin.
///
/// # Errors
///
/// Returns an error if configuration files cannot be loaded, the HTTP client
/// cannot be built, or a headline page cannot be updated.
pub(crate) async fn run_headlines(
    config: &AppConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let feeds = fxsite_core::load_feeds(&config.feeds_path)?;
    let client = FeedClient::new(config.fetch_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build feed client: {e}"))?;
    let matcher = LatamMatcher::new();

    let mut updated = Vec::new();
    for skin in all_skins() {
        let sources = feeds.headlines.for_site(skin.site_id());
        let items = collect_feed_items(&client, sources).await;
        let fresh = region_focused(items, &matcher, now, config.freshness_days, FRESH_LIMIT);
        tracing::info!(skin = skin.dir(), fresh = fresh.len(), "selected headlines");
        updated.extend(apply_headlines(&config.site_root, *skin, fresh)?);
    }

    if updated.is_empty() {
        println!("RSS news: no updates applied (feeds empty or pages unchanged).");
    } else {
        println!("RSS news updated: {}", updated.join(", "));
    }
    Ok(())
}

/// Merge `fresh` into one skin's archive and re-render its headline pages.
/// Returns the site-relative paths that changed.
///
/// With no fresh items nothing is touched, so a run where every source fails
/// leaves the pages as they were. Without a sidecar the archive is recovered
/// from the cards already rendered on the pages.
pub(crate) fn apply_headlines(
    site_root: &Path,
    skin: &dyn Skin,
    fresh: Vec<FeedItem>,
) -> anyhow::Result<Vec<String>> {
    if fresh.is_empty() {
        tracing::warn!(skin = skin.dir(), "no fresh headlines; leaving pages unchanged");
        return Ok(Vec::new());
    }

    let sidecar = RegionSidecar::new(site_root.join(skin.headlines_sidecar_path()));
    let existing = if sidecar.exists() {
        sidecar.load()?
    } else {
        recover_from_pages(site_root, skin)?
    };
    let merged = merge_keep_recent(fresh, existing, skin.headline_max_items());

    let mut updated = Vec::new();
    for page in skin.headline_pages() {
        let shown = match page.limit {
            Some(limit) => &merged[..limit.min(merged.len())],
            None => &merged[..],
        };
        let inner = skin.headline_cards(shown);
        let changed = edit_page(site_root, page.path, page.required, |html| {
            replace_region(html, RSS_NEWS_START, RSS_NEWS_END, &inner, ITEM_INDENT)
        })?;
        if changed {
            updated.push(page.path.to_string());
        }
    }

    sidecar.save(&merged)?;
    Ok(updated)
}

/// Previously rendered cards from the fullest headline page that has any,
/// trying uncapped archive pages first.
fn recover_from_pages(site_root: &Path, skin: &dyn Skin) -> anyhow::Result<Vec<FeedItem>> {
    let pages = skin.headline_pages();
    let ordered = pages
        .iter()
        .filter(|p| p.limit.is_none())
        .chain(pages.iter().filter(|p| p.limit.is_some()));

    for page in ordered {
        let Some(html) = read_page(&site_root.join(page.path))? else {
            continue;
        };
        let Ok(region) = MarkerRegion::locate(&html, RSS_NEWS_START, RSS_NEWS_END) else {
            tracing::debug!(path = page.path, "no headline region to recover from");
            continue;
        };
        let items = skin.recover_headlines(region.inner(&html));
        if !items.is_empty() {
            tracing::info!(path = page.path, items = items.len(), "recovered headlines from HTML");
            return Ok(items);
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
#[path = "headlines_test.rs"]
mod tests;
