//! Publish-time stamping of `<time data-stamp-on-publish="true">` elements.
//!
//! New teaser cards are written with a placeholder time. Stamping gives them
//! a real `datetime` once and removes the marker so later runs leave them be.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static STAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<time\b([^>]*?)\bdata-stamp-on-publish\s*=\s*"true"([^>]*)>(.*?)</time>"#)
        .expect("valid regex")
});
static DATETIME_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdatetime\s*=").expect("valid regex"));
static SHOW_ABSOLUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdata-show-absolute\s*=\s*"true""#).expect("valid regex"));

const PLACEHOLDERS: &[&str] = &["Just now", "Publishing…"];

/// Stamp every marked `<time>` element with `now_iso`.
///
/// Elements that already carry a `datetime` only lose the marker. Otherwise
/// `datetime="<now_iso>"` is appended, and the inner text becomes the date
/// part of `now_iso` when the element shows an absolute date or still holds
/// a placeholder. Returns the new document and whether anything was stamped.
#[must_use]
pub fn stamp_times(html: &str, now_iso: &str) -> (String, bool) {
    let date = now_iso.split('T').next().unwrap_or(now_iso);
    let mut changed = false;

    let next = STAMP_RE.replace_all(html, |cap: &Captures<'_>| {
        changed = true;
        let before = cap[1].trim_end();
        let after = cap[2].trim();
        let inner = &cap[3];

        let mut attrs = before.to_string();
        if !after.is_empty() {
            attrs.push(' ');
            attrs.push_str(after);
        }

        if DATETIME_ATTR_RE.is_match(&attrs) {
            return format!("<time{attrs}>{inner}</time>");
        }

        let show_date =
            SHOW_ABSOLUTE_RE.is_match(&attrs) || PLACEHOLDERS.contains(&inner.trim());
        let inner = if show_date { date } else { inner };
        format!(r#"<time{attrs} datetime="{now_iso}">{inner}</time>"#)
    });

    (next.into_owned(), changed)
}
