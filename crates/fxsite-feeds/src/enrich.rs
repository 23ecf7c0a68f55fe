//! Source snapshots: one-line summaries from a linked page's meta tags.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::FeedClient;
use crate::text::{collapse_whitespace, decode_entities, truncate_chars};
use crate::types::{EnrichedItem, FeedItem};

/// `<meta>` lookups in priority order. Each name is tried with the
/// `property`/`name` attribute before `content` and after it.
static META_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["og:description", "description"]
        .iter()
        .flat_map(|name| {
            let name = regex::escape(name);
            [
                format!(
                    r#"(?is)<meta\b[^>]*?\b(?:property|name)\s*=\s*["']{name}["'][^>]*?\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#
                ),
                format!(
                    r#"(?is)<meta\b[^>]*?\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*?\b(?:property|name)\s*=\s*["']{name}["']"#
                ),
            ]
        })
        .map(|pattern| Regex::new(&pattern).expect("valid meta regex"))
        .collect()
});

/// The page's `og:description`, else its `description`, entity-decoded.
/// Empty when neither is present.
#[must_use]
pub fn extract_meta_description(html: &str) -> String {
    META_PATTERNS
        .iter()
        .filter_map(|re| re.captures(html))
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|m| collapse_whitespace(&decode_entities(m.as_str())))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Attach snapshots to the first `limit` items, fetched one after another.
///
/// Items past `limit` are dropped. A failed fetch or a page without a
/// description leaves `snapshot` as `None`.
pub async fn enrich_items(
    client: &FeedClient,
    items: &[FeedItem],
    limit: usize,
    max_chars: usize,
) -> Vec<EnrichedItem> {
    let mut out = Vec::with_capacity(items.len().min(limit));

    for item in items.iter().take(limit) {
        let snapshot = match client.fetch_text(&item.link).await {
            Ok(html) => {
                let description = extract_meta_description(&html);
                (!description.is_empty()).then(|| truncate_chars(&description, max_chars))
            }
            Err(e) => {
                tracing::debug!(url = %item.link, error = %e, "snapshot fetch failed");
                None
            }
        };
        out.push(EnrichedItem {
            item: item.clone(),
            snapshot,
        });
    }

    out
}
