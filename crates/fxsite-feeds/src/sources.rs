use crate::client::FeedClient;
use crate::parse::parse_feed_items;
use crate::types::FeedItem;

/// Fetch and parse every source in order, concatenating their items.
///
/// A source that fails to fetch is logged and skipped; an all-failed run
/// returns an empty list rather than an error.
pub async fn collect_feed_items(client: &FeedClient, urls: &[String]) -> Vec<FeedItem> {
    let mut items = Vec::new();

    for url in urls {
        match client.fetch_text(url).await {
            Ok(body) => {
                let parsed = parse_feed_items(&body);
                tracing::debug!(source = %url, count = parsed.len(), "parsed feed items");
                items.extend(parsed);
            }
            Err(e) => {
                tracing::warn!(source = %url, error = %e, "feed source failed; skipping");
            }
        }
    }

    items
}
