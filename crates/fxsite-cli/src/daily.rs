//! Daily brief: one page per skin per UTC day plus a teaser card.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use fxsite_core::{AppConfig, DailyKey};
use fxsite_feeds::{
    collect_feed_items, enrich_items, is_fresh, rank_recent, region_first, EnrichedItem,
    FeedClient, FeedItem, LatamMatcher, Topic,
};
use fxsite_render::{all_skins, upsert_keyed, write_page_if_absent, DailyBrief, KeyPolicy};

use crate::pages::edit_page;

/// Newest fresh items considered per section before topic filtering.
const SECTION_POOL: usize = 24;
/// Items kept per section after regional ordering.
const SECTION_PICK: usize = 8;

/// Shared inputs for building the three sections.
struct SectionContext<'a> {
    client: &'a FeedClient,
    matcher: &'a LatamMatcher,
    now: DateTime<Utc>,
    window_days: i64,
    snapshot_limit: usize,
    snapshot_max_chars: usize,
}

/// Fetch today's sections and publish the brief.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the HTTP client
/// cannot be built, or a page cannot be written or spliced.
pub(crate) async fn run_daily(
    config: &AppConfig,
    now: DateTime<Utc>,
    replace: bool,
) -> anyhow::Result<()> {
    let feeds = fxsite_core::load_feeds(&config.feeds_path)?;
    let client = FeedClient::new(config.fetch_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build feed client: {e}"))?;
    let matcher = LatamMatcher::new();
    let ctx = SectionContext {
        client: &client,
        matcher: &matcher,
        now,
        window_days: config.freshness_days,
        snapshot_limit: config.snapshot_limit,
        snapshot_max_chars: config.snapshot_max_chars,
    };

    let brief = DailyBrief {
        key: DailyKey::from_datetime(now),
        generated_at: now,
        brokers: build_section(&ctx, &feeds.daily.brokers, Topic::BrokerIndustry).await,
        forex: build_section(&ctx, &feeds.daily.forex, Topic::ForexMacro).await,
        crypto: build_section(&ctx, &feeds.daily.crypto, Topic::Crypto).await,
    };

    let policy = if replace {
        KeyPolicy::ReplaceByKey
    } else {
        KeyPolicy::InsertIfAbsent
    };
    let updated = apply_daily(&config.site_root, &brief, policy)?;

    if updated.is_empty() {
        println!("Daily news already present (key={})", brief.key);
    } else {
        println!(
            "Daily news updated: {} (key={} datetime={})",
            updated.join(", "),
            brief.key,
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    Ok(())
}

async fn build_section(
    ctx: &SectionContext<'_>,
    urls: &[String],
    topic: Topic,
) -> Vec<EnrichedItem> {
    let items = collect_feed_items(ctx.client, urls).await;
    let picked = select_section(items, topic, ctx.matcher, ctx.now, ctx.window_days);
    tracing::info!(?topic, picked = picked.len(), "selected daily section");
    enrich_items(ctx.client, &picked, ctx.snapshot_limit, ctx.snapshot_max_chars).await
}

/// Fresh, newest first, on topic, regional items ahead of the rest.
pub(crate) fn select_section(
    mut items: Vec<FeedItem>,
    topic: Topic,
    matcher: &LatamMatcher,
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<FeedItem> {
    items.retain(|item| is_fresh(item.published_at, now, window_days));
    let on_topic: Vec<FeedItem> = rank_recent(items, SECTION_POOL)
        .into_iter()
        .filter(|item| topic.matches(&item.title))
        .collect();
    region_first(on_topic, matcher, SECTION_PICK)
}

/// Write each skin's daily page (once per key) and splice its teaser.
/// Returns the site-relative paths that changed.
///
/// An empty brief means every source failed or nothing matched; no page or
/// teaser is written for it.
pub(crate) fn apply_daily(
    site_root: &Path,
    brief: &DailyBrief,
    policy: KeyPolicy,
) -> anyhow::Result<Vec<String>> {
    if brief.is_empty() {
        tracing::warn!(key = %brief.key, "daily brief is empty; nothing to publish");
        return Ok(Vec::new());
    }

    let key = brief.key.to_string();
    let mut updated = Vec::new();
    for skin in all_skins() {
        let page = skin.daily_page_path(brief.key);
        if write_page_if_absent(&site_root.join(&page), &skin.daily_page(brief))? {
            updated.push(page);
        }

        let teaser = skin.daily_teaser(brief.key, brief.generated_at);
        let teaser_page = skin.daily_teaser_page();
        let changed = edit_page(site_root, teaser_page, true, |html| {
            upsert_keyed(html, skin.daily_region(), &key, &teaser, policy)
        })?;
        if changed {
            updated.push(teaser_page.to_string());
        }
    }
    Ok(updated)
}

#[cfg(test)]
#[path = "daily_test.rs"]
mod tests;
