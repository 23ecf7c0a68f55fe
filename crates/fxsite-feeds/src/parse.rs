//! Tolerant RSS 2.0 / RDF / Atom item extraction.
//!
//! This is pattern matching over the raw document, not an XML parser: real
//! feeds ship with undeclared entities, stray ampersands, and truncated
//! bodies, and a single bad byte must not cost the whole source.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use regex::Regex;
use reqwest::Url;

use crate::text::{collapse_whitespace, decode_entities, strip_cdata};
use crate::types::FeedItem;

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<item\b([^>]*)>(.*?)</item\s*>").expect("valid regex"));
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<entry\b[^>]*>(.*?)</entry\s*>").expect("valid regex"));
static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b([^>]*)>").expect("valid regex"));
static RDF_ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\brdf:about\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static TITLE: LazyLock<TagText> = LazyLock::new(|| TagText::new("title"));
static LINK: LazyLock<TagText> = LazyLock::new(|| TagText::new("link"));
static GUID: LazyLock<TagText> = LazyLock::new(|| TagText::new("guid"));
static ID: LazyLock<TagText> = LazyLock::new(|| TagText::new("id"));

/// Date tags for RSS/RDF items, in order of preference.
static RSS_DATES: LazyLock<Vec<TagText>> = LazyLock::new(|| {
    [
        "pubDate",
        "dc:date",
        "dcterms:issued",
        "dcterms:created",
        "published",
        "updated",
    ]
    .into_iter()
    .map(TagText::new)
    .collect()
});

static ATOM_DATES: LazyLock<Vec<TagText>> =
    LazyLock::new(|| ["updated", "published"].into_iter().map(TagText::new).collect());

/// Matches `<tag ...>text</tag>` and yields the decoded text.
struct TagText {
    re: Regex,
}

impl TagText {
    fn new(tag: &str) -> Self {
        let tag = regex::escape(tag);
        let pattern = format!(r"(?is)<{tag}(\s[^>]*)?>(.*?)</{tag}\s*>");
        Self {
            re: Regex::new(&pattern).expect("valid tag regex"),
        }
    }

    /// First non-self-closing occurrence, CDATA-unwrapped and entity-decoded.
    fn extract(&self, block: &str) -> String {
        self.re
            .captures_iter(block)
            .find(|cap| !cap.get(1).is_some_and(|m| m.as_str().trim_end().ends_with('/')))
            .and_then(|cap| cap.get(2))
            .map(|m| collapse_whitespace(&decode_entities(strip_cdata(m.as_str()).trim())))
            .unwrap_or_default()
    }
}

/// Extract all valid items from an RSS 2.0, RDF/RSS 1.0 or Atom document.
///
/// Items without a title, a valid absolute http(s) link, or a parseable date
/// are dropped silently. RSS items come first, then Atom entries, each in
/// document order.
#[must_use]
pub fn parse_feed_items(xml: &str) -> Vec<FeedItem> {
    let mut items = Vec::new();

    for cap in ITEM_RE.captures_iter(xml) {
        let attrs = cap.get(1).map_or("", |m| m.as_str());
        let block = cap.get(2).map_or("", |m| m.as_str());

        let title = TITLE.extract(block);
        let link = safe_url(&LINK.extract(block))
            .or_else(|| safe_url(&GUID.extract(block)))
            .or_else(|| rdf_about(attrs).and_then(|about| safe_url(&about)));
        let published_at = first_date(block, &RSS_DATES);

        if let Some(item) = build_item(title, link, published_at) {
            items.push(item);
        }
    }

    for cap in ENTRY_RE.captures_iter(xml) {
        let block = cap.get(1).map_or("", |m| m.as_str());

        let title = TITLE.extract(block);
        let link = atom_link_href(block)
            .and_then(|href| safe_url(&href))
            .or_else(|| safe_url(&LINK.extract(block)))
            .or_else(|| safe_url(&ID.extract(block)));
        let published_at = first_date(block, &ATOM_DATES);

        if let Some(item) = build_item(title, link, published_at) {
            items.push(item);
        }
    }

    items
}

fn build_item(
    title: String,
    link: Option<String>,
    published_at: Option<DateTime<Utc>>,
) -> Option<FeedItem> {
    if title.is_empty() {
        return None;
    }
    Some(FeedItem {
        title,
        link: link?,
        published_at: published_at?,
    })
}

fn first_date(block: &str, tags: &[TagText]) -> Option<DateTime<Utc>> {
    tags.iter()
        .map(|tag| tag.extract(block))
        .find(|raw| !raw.is_empty())
        .and_then(|raw| parse_feed_date(&raw))
}

fn rdf_about(attrs: &str) -> Option<String> {
    let cap = RDF_ABOUT_RE.captures(attrs)?;
    cap.get(1)
        .or_else(|| cap.get(2))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
}

/// `href` of the entry's preferred `<link>`: the first one without a `rel`
/// or with `rel="alternate"`, else the first link carrying any `href`.
fn atom_link_href(block: &str) -> Option<String> {
    let mut fallback = None;
    for cap in LINK_TAG_RE.captures_iter(block) {
        let attrs = cap.get(1).map_or("", |m| m.as_str());
        let Some(href) = attr_value(attrs, "href") else {
            continue;
        };
        match attr_value(attrs, "rel").as_deref() {
            None | Some("alternate") => return Some(href),
            Some(_) => {
                if fallback.is_none() {
                    fallback = Some(href);
                }
            }
        }
    }
    fallback
}

fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    let cap = re.captures(attrs)?;
    cap.get(1)
        .or_else(|| cap.get(2))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
}

/// Validate and normalize an absolute http(s) URL.
#[must_use]
pub fn safe_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = Url::parse(trimmed).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url.to_string())
}

/// Parse a feed timestamp into UTC with whole-second precision.
///
/// Accepts RFC 2822 (`pubDate`), RFC 3339 (Atom, `dc:date`), and a few
/// zone-less forms which are taken as UTC.
#[must_use]
pub fn parse_feed_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })?;

    Some(parsed.trunc_subsecs(0))
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
