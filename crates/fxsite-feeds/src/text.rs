//! Text cleanup shared by the feed parser, the enricher, and page rendering.

use std::sync::LazyLock;

use regex::Regex;

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("valid regex"));
static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid regex"));

/// Decode named and numeric HTML entities (`&amp;`, `&#8217;`, `&#x2026;`, ...).
#[must_use]
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

/// Unwrap every `<![CDATA[...]]>` section, keeping its raw content.
#[must_use]
pub fn strip_cdata(input: &str) -> String {
    CDATA_RE.replace_all(input.trim(), "$1").into_owned()
}

/// Collapse runs of whitespace (including non-breaking spaces) to one space.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip tags and collapse whitespace.
#[must_use]
pub fn clean_text(input: &str) -> String {
    collapse_whitespace(&TAGS_RE.replace_all(input, " "))
}

/// Trim and cut to at most `max_chars` characters, ending with `…` when cut.
#[must_use]
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", head.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_typographic_references() {
        assert_eq!(
            decode_entities("Fed&#8217;s &#8220;pause&#8221;&#8230; &amp; more"),
            "Fed\u{2019}s \u{201C}pause\u{201D}\u{2026} & more"
        );
    }

    #[test]
    fn strips_wrapping_cdata() {
        assert_eq!(strip_cdata("  <![CDATA[USD/MXN <b>falls</b>]]> "), "USD/MXN <b>falls</b>");
        assert_eq!(strip_cdata("plain"), "plain");
    }

    #[test]
    fn nbsp_collapses_like_a_space() {
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b \n c"), "a b c");
    }

    #[test]
    fn clean_text_removes_markup() {
        assert_eq!(clean_text("<p>Peso <b>up</b></p>"), "Peso up");
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("  short  ", 10), "short");
        assert_eq!(truncate_chars("México sube tasas hoy", 8), "México…");
        assert_eq!(truncate_chars("abcdef", 6), "abcdef");
    }
}
