//! Deduplication, recency ranking, and regional prioritisation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::filter::{is_fresh, LatamMatcher};
use crate::types::FeedItem;

/// Drop later items whose `link` was already seen. Order is preserved.
#[must_use]
pub fn dedupe_by_link(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.link.clone()))
        .collect()
}

fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Dedupe, sort newest first, and keep at most `limit` items.
#[must_use]
pub fn rank_recent(items: Vec<FeedItem>, limit: usize) -> Vec<FeedItem> {
    let mut items = dedupe_by_link(items);
    sort_newest_first(&mut items);
    items.truncate(limit);
    items
}

/// Merge freshly fetched items with previously published ones.
///
/// `incoming` wins over `existing` when both carry the same link.
#[must_use]
pub fn merge_keep_recent(
    incoming: Vec<FeedItem>,
    existing: Vec<FeedItem>,
    max_items: usize,
) -> Vec<FeedItem> {
    let mut all = incoming;
    all.extend(existing);
    rank_recent(all, max_items)
}

/// Regionally relevant items first, then the rest, each partition keeping its
/// incoming order, truncated to `limit`.
#[must_use]
pub fn region_first(items: Vec<FeedItem>, matcher: &LatamMatcher, limit: usize) -> Vec<FeedItem> {
    let (mut regional, other): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| matcher.matches(item));
    regional.extend(other);
    regional.truncate(limit);
    regional
}

/// Headline selection with a strong regional preference.
///
/// Items are deduped, ranked by recency, and restricted to the freshness
/// window. When at least `max(4, min(7, limit))` regional items exist only
/// those are returned; otherwise the remaining slots are filled with the
/// newest non-regional items.
#[must_use]
pub fn region_focused(
    items: Vec<FeedItem>,
    matcher: &LatamMatcher,
    now: DateTime<Utc>,
    window_days: i64,
    limit: usize,
) -> Vec<FeedItem> {
    let ranked = rank_recent(items, usize::MAX);
    let (mut regional, other): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .filter(|item| is_fresh(item.published_at, now, window_days))
        .partition(|item| matcher.matches(item));

    let enough = limit.clamp(4, 7);
    if regional.len() >= enough {
        regional.truncate(limit);
        return regional;
    }

    let fill = limit.saturating_sub(regional.len());
    regional.extend(other.into_iter().take(fill));
    regional.truncate(limit);
    regional
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
    }

    fn item(title: &str, link: &str, hours_ago: i64) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: link.to_string(),
            published_at: now() - Duration::hours(hours_ago),
        }
    }

    fn links(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(|i| i.link.as_str()).collect()
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let items = vec![
            item("first", "https://a.example/1", 5),
            item("second", "https://a.example/2", 4),
            item("dup", "https://a.example/1", 1),
        ];
        let out = dedupe_by_link(items);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "first");
    }

    #[test]
    fn dedupe_is_idempotent_on_self_merge() {
        let items = vec![
            item("a", "https://a.example/1", 5),
            item("b", "https://a.example/2", 4),
        ];
        let doubled: Vec<FeedItem> = items.iter().chain(items.iter()).cloned().collect();
        let once = dedupe_by_link(items.clone());
        let twice = dedupe_by_link(doubled);
        assert_eq!(once, twice);
        assert_eq!(dedupe_by_link(once.clone()), once);
    }

    #[test]
    fn rank_recent_sorts_desc_and_caps() {
        let items = vec![
            item("old", "https://a.example/old", 30),
            item("new", "https://a.example/new", 1),
            item("mid", "https://a.example/mid", 10),
        ];
        let out = rank_recent(items, 2);
        assert_eq!(links(&out), vec!["https://a.example/new", "https://a.example/mid"]);
    }

    #[test]
    fn merge_prefers_incoming_over_existing() {
        let existing = vec![item("stale title", "https://a.example/1", 3)];
        let incoming = vec![item("fresh title", "https://a.example/1", 3)];
        let out = merge_keep_recent(incoming, existing, 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "fresh title");
    }

    #[test]
    fn region_first_keeps_partition_order() {
        let matcher = LatamMatcher::new();
        let items = vec![
            item("Fed minutes", "https://a.example/fed", 1),
            item("Peso mexicano: USD/MXN", "https://a.example/mxn", 2),
            item("ECB speakers", "https://a.example/ecb", 3),
            item("Copom decision", "https://a.example/copom", 4),
        ];
        let out = region_first(items, &matcher, 3);
        assert_eq!(
            links(&out),
            vec![
                "https://a.example/mxn",
                "https://a.example/copom",
                "https://a.example/fed"
            ]
        );
    }

    #[test]
    fn region_focused_fills_with_global_when_regional_is_thin() {
        let matcher = LatamMatcher::new();
        let items = vec![
            item("Fed minutes", "https://a.example/fed", 1),
            item("USD/BRL jumps", "https://a.example/brl", 2),
            item("Very old Chile story", "https://a.example/chile", 24 * 60),
        ];
        let out = region_focused(items, &matcher, now(), 45, 5);
        assert_eq!(links(&out), vec!["https://a.example/brl", "https://a.example/fed"]);
    }

    #[test]
    fn region_focused_returns_only_regional_when_plentiful() {
        let matcher = LatamMatcher::new();
        let mut items: Vec<FeedItem> = (0..5)
            .map(|i| item("USD/MXN update", &format!("https://a.example/mxn{i}"), i + 1))
            .collect();
        items.push(item("Fed minutes", "https://a.example/fed", 0));
        let out = region_focused(items, &matcher, now(), 45, 5);
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|i| i.title.contains("MXN")));
    }
}
