//! Mapping raw export records onto [`NormalizedReview`]s.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use fxsite_core::BrokerRegistry;
use fxsite_render::write_page;
use regex::Regex;
use serde_json::Value;

use crate::error::ReviewsError;
use crate::exports::{ExportFile, RawRecord};
use crate::types::{
    BrokerAggregate, BrokerReviews, NormalizedDocument, NormalizedReview, BEST_RATING,
};

const BROKER_FIELDS: &[&str] = &["brokerSlug", "broker", "broker_id", "slug"];
const RATING_FIELDS: &[&str] = &["rating", "stars", "score", "ratingValue"];
const TEXT_FIELDS: &[&str] = &["text", "body", "comment"];
const DATE_FIELDS: &[&str] = &["date", "createdAt", "publishedAt"];
const AUTHOR_FIELDS: &[&str] = &["author", "reviewer", "user"];
const SOURCE_FIELDS: &[&str] = &["sourceName", "source"];
const URL_FIELDS: &[&str] = &["sourceUrl", "url"];

const DEFAULT_SOURCE_NAME: &str = "Licensed export";
const DEFAULT_LOCALE: &str = "en";
const ANONYMOUS_AUTHOR: &str = "User";

static DATE_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static ISO_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})T").expect("valid regex"));

/// Loose formats seen in partner exports, tried after the ISO forms.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y",
];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];

/// The value of the first synonym present that is neither null nor blank.
fn first_field<'a>(record: &'a RawRecord, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| match record.get(*name)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    })
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(record: &RawRecord, names: &[&str]) -> Option<String> {
    first_field(record, names)
        .and_then(value_text)
        .filter(|s| !s.is_empty())
}

/// Whole-star rating from a number or numeric string, rounded half away
/// from zero and clamped to 1..=5. Non-numeric and non-finite values yield
/// `None`.
#[must_use]
pub fn parse_rating(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    // Clamped to 1..=5 first, so the cast is exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let stars = raw.round().clamp(1.0, f64::from(BEST_RATING)) as u8;
    Some(stars)
}

/// Calendar date (`YYYY-MM-DD`, UTC) of an export timestamp.
///
/// Numbers are epoch milliseconds. Strings may be a bare date, anything
/// with an ISO `YYYY-MM-DDT` prefix, RFC 3339, RFC 2822, or one of a few
/// common loose forms.
#[must_use]
pub fn normalize_date(value: &Value) -> Option<String> {
    let date = match value {
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?)?.date_naive(),
        Value::String(s) => parse_date_str(s.trim())?,
        _ => return None,
    };
    Some(date.format("%Y-%m-%d").to_string())
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if DATE_ONLY_RE.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    }
    if let Some(cap) = ISO_PREFIX_RE.captures(s) {
        return NaiveDate::parse_from_str(&cap[1], "%Y-%m-%d").ok();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// Public display name for a reviewer: `"Maria Lopez"` becomes
/// `"Maria L."`, a single name is capitalized and capped at 20 characters,
/// and anything else becomes `"User"`.
#[must_use]
pub fn anonymize_author(author: Option<&Value>) -> String {
    let Some(name) = author.and_then(Value::as_str) else {
        return ANONYMOUS_AUTHOR.to_string();
    };
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => ANONYMOUS_AUTHOR.to_string(),
        [only] => {
            let mut chars = only.chars();
            let Some(first) = chars.next() else {
                return ANONYMOUS_AUTHOR.to_string();
            };
            first.to_uppercase().chain(chars.take(19)).collect()
        }
        [first, .., last] => {
            let initial: String = last.chars().take(1).flat_map(char::to_uppercase).collect();
            format!("{first} {initial}.")
        }
    }
}

/// Normalize one raw record, or `None` if it must be dropped: unknown
/// broker, missing or non-numeric rating, empty text, or unparseable date.
#[must_use]
pub fn normalize_record(
    record: &RawRecord,
    fallback_source: &str,
    registry: &BrokerRegistry,
) -> Option<NormalizedReview> {
    let broker_slug = text_field(record, BROKER_FIELDS)?;
    if !registry.is_known(&broker_slug) {
        tracing::debug!(broker = %broker_slug, "dropping review for unknown broker");
        return None;
    }

    let rating = first_field(record, RATING_FIELDS).and_then(parse_rating)?;
    let text = text_field(record, TEXT_FIELDS)?;
    let date = first_field(record, DATE_FIELDS).and_then(normalize_date)?;

    let source_name = text_field(record, SOURCE_FIELDS)
        .or_else(|| Some(fallback_source.trim().to_string()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string());

    Some(NormalizedReview {
        broker_slug,
        rating,
        text,
        date,
        author_display: anonymize_author(first_field(record, AUTHOR_FIELDS)),
        source_name,
        source_url: text_field(record, URL_FIELDS).unwrap_or_default(),
        locale: text_field(record, &["locale"]).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        country: text_field(record, &["country"]).unwrap_or_default(),
    })
}

/// Mean rating rounded to one decimal.
#[must_use]
pub fn aggregate(reviews: &[NormalizedReview]) -> BrokerAggregate {
    if reviews.is_empty() {
        return BrokerAggregate::default();
    }
    let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / reviews.len() as f64;
    BrokerAggregate {
        rating_value: (mean * 10.0).round() / 10.0,
        review_count: reviews.len(),
        best_rating: BEST_RATING,
    }
}

/// Drop repeats of the same author, date, and text, then order newest
/// first. Equal dates keep their import order.
fn dedupe_and_sort(reviews: Vec<NormalizedReview>) -> Vec<NormalizedReview> {
    let mut seen = HashSet::new();
    let mut kept: Vec<NormalizedReview> = reviews
        .into_iter()
        .filter(|r| seen.insert((r.author_display.clone(), r.date.clone(), r.text.clone())))
        .collect();
    kept.sort_by(|a, b| b.date.cmp(&a.date));
    kept
}

/// Build the normalized document from every export. Every registry broker
/// is present, with an empty review list if nothing matched it.
#[must_use]
pub fn normalize_exports(
    files: &[ExportFile],
    registry: &BrokerRegistry,
    generated_at: DateTime<Utc>,
) -> NormalizedDocument {
    let mut by_broker: BTreeMap<String, Vec<NormalizedReview>> = registry
        .brokers()
        .iter()
        .map(|b| (b.slug.clone(), Vec::new()))
        .collect();

    for file in files {
        let mut accepted = 0usize;
        for record in &file.records {
            if let Some(review) = normalize_record(record, &file.stem, registry) {
                accepted += 1;
                by_broker.entry(review.broker_slug.clone()).or_default().push(review);
            }
        }
        tracing::info!(
            path = %file.path.display(),
            records = file.records.len(),
            accepted,
            "normalized export"
        );
    }

    let brokers = registry
        .brokers()
        .iter()
        .map(|broker| {
            let reviews = dedupe_and_sort(by_broker.remove(&broker.slug).unwrap_or_default());
            let entry = BrokerReviews {
                name: broker.name.clone(),
                aggregate: aggregate(&reviews),
                reviews,
            };
            (broker.slug.clone(), entry)
        })
        .collect();

    NormalizedDocument {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        brokers,
    }
}

/// Overwrite `path` with the document as pretty JSON plus a trailing newline.
///
/// # Errors
///
/// Returns [`ReviewsError::Json`] if serialization fails or
/// [`ReviewsError::Render`] if the file cannot be written.
pub fn write_document(path: &Path, doc: &NormalizedDocument) -> Result<(), ReviewsError> {
    let mut json = serde_json::to_string_pretty(doc).map_err(|e| ReviewsError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    json.push('\n');
    write_page(path, &json)?;
    Ok(())
}

/// # Errors
///
/// Returns [`ReviewsError::Io`] if the file cannot be read (including when
/// it does not exist) or [`ReviewsError::Json`] if it is malformed.
pub fn read_document(path: &Path) -> Result<NormalizedDocument, ReviewsError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReviewsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ReviewsError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
