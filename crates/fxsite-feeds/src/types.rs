use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// One headline parsed from a feed entry.
///
/// `link` is always an absolute http(s) URL and is the identity of the item;
/// `published_at` carries whole-second precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
}

impl FeedItem {
    /// `published_at` as `YYYY-MM-DDTHH:MM:SSZ`.
    #[must_use]
    pub fn published_iso(&self) -> String {
        self.published_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `published_at` as `YYYY-MM-DD`.
    #[must_use]
    pub fn published_date(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }

    /// Host of `link` without a leading `www.`, or `source` if unparseable.
    #[must_use]
    pub fn source_domain(&self) -> String {
        domain_label(&self.link)
    }
}

/// Host of `link` without a leading `www.`, or `source` if unparseable.
#[must_use]
pub fn domain_label(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| "source".to_string())
}

/// A feed item plus the optional snapshot summary of its target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedItem {
    pub item: FeedItem,
    pub snapshot: Option<String>,
}

impl From<FeedItem> for EnrichedItem {
    fn from(item: FeedItem) -> Self {
        Self {
            item,
            snapshot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn item(link: &str) -> FeedItem {
        FeedItem {
            title: "Peso rallies".to_string(),
            link: link.to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 2, 10, 9, 5, 0).unwrap(),
        }
    }

    #[test]
    fn published_iso_has_no_fraction() {
        assert_eq!(
            item("https://a.example/x").published_iso(),
            "2026-02-10T09:05:00Z"
        );
        assert_eq!(item("https://a.example/x").published_date(), "2026-02-10");
    }

    #[test]
    fn source_domain_strips_www() {
        assert_eq!(
            item("https://www.fxstreet.es/news/1").source_domain(),
            "fxstreet.es"
        );
        assert_eq!(domain_label("not a url"), "source");
    }

    #[test]
    fn serializes_published_at_as_rfc3339() {
        let json = serde_json::to_string(&item("https://a.example/x")).unwrap();
        assert!(json.contains("\"published_at\":\"2026-02-10T09:05:00Z\""));
        let back: FeedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item("https://a.example/x"));
    }
}
