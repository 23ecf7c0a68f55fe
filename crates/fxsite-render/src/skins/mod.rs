//! Per-site page builders.
//!
//! Both skins carry the same content with different markup conventions.
//! Every user-facing string is emitted with `data-en`/`data-es` variants for
//! the client-side language toggle, and every `<time>` carries a machine
//! `datetime` plus `data-relative-time`/`data-show-absolute` hints.

mod dark_gradient;
mod minimal_light;

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use fxsite_core::{DailyKey, WeekKey};
use fxsite_feeds::parse::{parse_feed_date, safe_url};
use fxsite_feeds::text::{clean_text, decode_entities};
use fxsite_feeds::types::domain_label;
use fxsite_feeds::{EnrichedItem, FeedItem};
use regex::Regex;

use crate::splice::KeyedRegion;

pub use dark_gradient::DarkGradient;
pub use minimal_light::MinimalLight;

pub const RSS_NEWS_START: &str = "<!-- RSS_NEWS_START -->";
pub const RSS_NEWS_END: &str = "<!-- RSS_NEWS_END -->";
pub const DAILY_NEWS_START: &str = "<!-- DAILY_NEWS_START -->";
pub const DAILY_NEWS_END: &str = "<!-- DAILY_NEWS_END -->";
pub const WEEKLY_NEWS_START: &str = "<!-- WEEKLY_NEWS_START -->";
pub const WEEKLY_NEWS_END: &str = "<!-- WEEKLY_NEWS_END -->";
pub const WEEKLY_INDEX_START: &str = "<!-- WEEKLY_INDEX_START -->";
pub const WEEKLY_INDEX_END: &str = "<!-- WEEKLY_INDEX_END -->";

pub const DAILY_KEY_ATTR: &str = "data-daily-key";
pub const WEEKLY_KEY_ATTR: &str = "data-weekly-key";

/// A page that receives a spliced region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTarget {
    /// Path relative to the site root.
    pub path: &'static str,
    /// Relative prefix from this page back to the skin directory.
    pub base: &'static str,
    /// Whether a missing file is an error rather than a skip.
    pub required: bool,
    /// Number of headline cards shown on this page; `None` shows all.
    pub limit: Option<usize>,
}

/// Content of one daily brief page.
#[derive(Debug, Clone)]
pub struct DailyBrief {
    pub key: DailyKey,
    pub generated_at: DateTime<Utc>,
    pub brokers: Vec<EnrichedItem>,
    pub forex: Vec<EnrichedItem>,
    pub crypto: Vec<EnrichedItem>,
}

impl DailyBrief {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brokers.is_empty() && self.forex.is_empty() && self.crypto.is_empty()
    }
}

/// Content of one weekly brief page: the daily briefs published that week.
#[derive(Debug, Clone)]
pub struct WeeklyBrief {
    pub key: WeekKey,
    pub generated_at: DateTime<Utc>,
    pub daily_keys: Vec<DailyKey>,
}

/// Markup conventions and target layout of one site.
pub trait Skin: Sync {
    /// Short site name used to key per-site configuration, e.g. `site1`.
    fn site_id(&self) -> &'static str;
    /// Skin directory under the site root, e.g. `site1-dark-gradient`.
    fn dir(&self) -> &'static str;

    /// Pages carrying the `RSS_NEWS` headline region. The first one is the
    /// page every skin must have.
    fn headline_pages(&self) -> &'static [PageTarget];
    /// Cap on the merged headline archive.
    fn headline_max_items(&self) -> usize;
    /// Inner HTML of the headline region.
    fn headline_cards(&self, items: &[FeedItem]) -> String;
    /// Items recovered from previously rendered headline cards.
    fn recover_headlines(&self, region_inner: &str) -> Vec<FeedItem>;

    fn daily_region(&self) -> &'static KeyedRegion;
    /// The page carrying the `DAILY_NEWS` teaser region.
    fn daily_teaser_page(&self) -> &'static str;
    fn daily_teaser(&self, key: DailyKey, generated_at: DateTime<Utc>) -> String;
    fn daily_page(&self, brief: &DailyBrief) -> String;

    fn weekly_region(&self) -> &'static KeyedRegion;
    /// Pages carrying the `WEEKLY_NEWS` teaser region.
    fn weekly_teaser_pages(&self) -> &'static [PageTarget];
    /// Teaser linking to the weekly page, with links relative to `base`.
    fn weekly_teaser(&self, key: WeekKey, base: &str) -> String;
    fn weekly_page(&self, brief: &WeeklyBrief) -> String;
    fn weekly_index_region(&self) -> &'static KeyedRegion;
    fn weekly_index_entry(&self, key: WeekKey) -> String;

    fn daily_page_path(&self, key: DailyKey) -> String {
        format!("{}/news/daily/{key}/index.html", self.dir())
    }

    fn weekly_page_path(&self, key: WeekKey) -> String {
        format!("{}/news/weekly/{key}/index.html", self.dir())
    }

    fn weekly_index_path(&self) -> String {
        format!("{}/news/weekly/index.html", self.dir())
    }

    fn headlines_sidecar_path(&self) -> String {
        format!("data/regions/{}-headlines.json", self.dir())
    }
}

static SKINS: [&(dyn Skin); 2] = [&DarkGradient, &MinimalLight];

/// Both skins, site1 first.
#[must_use]
pub fn all_skins() -> &'static [&'static dyn Skin] {
    &SKINS
}

pub(crate) fn iso_seconds(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn week_label(key: WeekKey, word: &str) -> String {
    format!("{word} {} ({})", key.week(), key.year())
}

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\b[^>]*\bhref="([^"]+)""#).expect("valid regex"));
static DATETIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<time\b[^>]*\bdatetime="([^"]+)""#).expect("valid regex"));
static ANCHOR_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("valid regex"));

/// Parse rendered headline cards back into items.
///
/// Cards without a valid link or timestamp are skipped. A source label that
/// older renders prefixed onto the title is stripped.
pub(crate) fn recover_cards(region_inner: &str, card_re: &Regex) -> Vec<FeedItem> {
    card_re
        .find_iter(region_inner)
        .filter_map(|m| recover_card(m.as_str()))
        .collect()
}

fn recover_card(card: &str) -> Option<FeedItem> {
    let href = HREF_RE.captures(card)?;
    let link = safe_url(&decode_entities(&href[1]))?;
    let published_at = parse_feed_date(&DATETIME_RE.captures(card)?[1])?;

    let mut title = ANCHOR_TEXT_RE
        .captures(card)
        .map(|cap| clean_text(&decode_entities(&cap[1])))
        .unwrap_or_default();

    let prefix = format!("{} ", domain_label(&link).to_lowercase());
    for _ in 0..3 {
        if !title.to_lowercase().starts_with(&prefix) {
            break;
        }
        title = title.get(prefix.len()..).unwrap_or_default().trim().to_string();
    }
    if title.is_empty() {
        title.clone_from(&link);
    }

    Some(FeedItem {
        title,
        link,
        published_at,
    })
}

#[cfg(test)]
#[path = "skins_test.rs"]
mod tests;
