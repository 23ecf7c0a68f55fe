//! Marker-region splicing.
//!
//! A region is the text strictly between the first occurrence of a literal
//! start marker and the first occurrence of a literal end marker. The markers
//! themselves are never rewritten.

use regex::Regex;

use crate::error::RenderError;

/// Column at which region items are laid out in every target page.
pub const ITEM_INDENT: &str = "                    ";

/// Byte offsets of a region's inner content within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRegion {
    pub inner_start: usize,
    pub inner_end: usize,
}

impl MarkerRegion {
    /// Locate the region delimited by `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MarkersNotFound`] if either marker is absent
    /// or the end marker occurs before the start marker.
    pub fn locate(html: &str, start: &str, end: &str) -> Result<Self, RenderError> {
        let not_found = || RenderError::MarkersNotFound {
            start: start.to_string(),
            end: end.to_string(),
        };
        let start_idx = html.find(start).ok_or_else(not_found)?;
        let end_idx = html.find(end).ok_or_else(not_found)?;
        let inner_start = start_idx + start.len();
        if end_idx < inner_start {
            return Err(not_found());
        }
        Ok(Self {
            inner_start,
            inner_end: end_idx,
        })
    }

    #[must_use]
    pub fn inner<'a>(&self, html: &'a str) -> &'a str {
        &html[self.inner_start..self.inner_end]
    }

    /// `html` with the inner content swapped for `replacement`.
    #[must_use]
    pub fn splice(&self, html: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(html.len() + replacement.len());
        out.push_str(&html[..self.inner_start]);
        out.push_str(replacement);
        out.push_str(&html[self.inner_end..]);
        out
    }
}

/// Replace a region's content with `inner`, trimmed and placed on its own
/// line at `indent`, with the end marker moved to the same column.
///
/// # Errors
///
/// Returns [`RenderError::MarkersNotFound`] when the markers are missing or
/// misordered.
pub fn replace_region(
    html: &str,
    start: &str,
    end: &str,
    inner: &str,
    indent: &str,
) -> Result<String, RenderError> {
    let region = MarkerRegion::locate(html, start, end)?;
    Ok(region.splice(html, &format!("\n{indent}{}\n{indent}", inner.trim())))
}

/// What to do when the region already holds an item for the current key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Leave the document untouched.
    InsertIfAbsent,
    /// Swap the existing item for the new one, keeping its position.
    ReplaceByKey,
}

/// A marker region holding a list of items tagged with `key_attr="<key>"`.
#[derive(Debug)]
pub struct KeyedRegion {
    pub start_marker: &'static str,
    pub end_marker: &'static str,
    /// Matches one whole item; items are collected in document order.
    pub item_pattern: Regex,
    pub key_attr: &'static str,
    pub max_items: usize,
}

impl KeyedRegion {
    /// # Panics
    ///
    /// Panics if `item_pattern` is not a valid regex. Patterns are
    /// compile-time constants.
    #[must_use]
    pub fn new(
        start_marker: &'static str,
        end_marker: &'static str,
        item_pattern: &str,
        key_attr: &'static str,
        max_items: usize,
    ) -> Self {
        Self {
            start_marker,
            end_marker,
            item_pattern: Regex::new(item_pattern).expect("valid item regex"),
            key_attr,
            max_items,
        }
    }

    /// # Errors
    ///
    /// Returns [`RenderError::MarkersNotFound`] when the markers are missing.
    pub fn locate(&self, html: &str) -> Result<MarkerRegion, RenderError> {
        MarkerRegion::locate(html, self.start_marker, self.end_marker)
    }

    fn items<'a>(&self, inner: &'a str) -> Vec<&'a str> {
        self.item_pattern
            .find_iter(inner)
            .map(|m| m.as_str().trim())
            .collect()
    }

    fn key_needle(&self, key: &str) -> String {
        format!(r#"{}="{key}""#, self.key_attr)
    }
}

fn join_items<S: AsRef<str>>(items: &[S]) -> String {
    let sep = format!("\n{ITEM_INDENT}");
    let mut out = String::new();
    for item in items {
        out.push_str(&sep);
        out.push_str(item.as_ref().trim());
    }
    out.push_str(&sep);
    out
}

/// Insert or replace the item for `key`, newest first, capped at
/// `region.max_items`.
///
/// Items not matching `region.item_pattern` are discarded from the region.
///
/// # Errors
///
/// Returns [`RenderError::MarkersNotFound`] when the markers are missing or
/// misordered.
pub fn upsert_keyed(
    html: &str,
    region: &KeyedRegion,
    key: &str,
    new_item: &str,
    policy: KeyPolicy,
) -> Result<String, RenderError> {
    let loc = region.locate(html)?;
    let existing = region.items(loc.inner(html));
    let needle = region.key_needle(key);
    let current = existing.iter().position(|item| item.contains(&needle));

    let mut next: Vec<&str> = match (current, policy) {
        (Some(_), KeyPolicy::InsertIfAbsent) => return Ok(html.to_string()),
        (Some(idx), KeyPolicy::ReplaceByKey) => {
            let mut items = existing;
            items[idx] = new_item;
            items
        }
        (None, _) => std::iter::once(new_item).chain(existing).collect(),
    };
    next.truncate(region.max_items);

    Ok(loc.splice(html, &join_items(&next)))
}

/// Keys carried by `key_attr="..."` attributes in `region_inner`, in
/// document order, without duplicates.
#[must_use]
pub fn extract_keys(region_inner: &str, key_attr: &str) -> Vec<String> {
    let pattern = format!(r#"\b{}="([^"]+)""#, regex::escape(key_attr));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let mut keys: Vec<String> = Vec::new();
    for cap in re.captures_iter(region_inner) {
        let key = cap[1].to_string();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Regenerate a keyed region from an ordered key list, one rendered item per
/// key, capped at `region.max_items`.
///
/// # Errors
///
/// Returns [`RenderError::MarkersNotFound`] when the markers are missing or
/// misordered.
pub fn rebuild_keyed<K, F>(
    html: &str,
    region: &KeyedRegion,
    keys: &[K],
    render: F,
) -> Result<String, RenderError>
where
    K: AsRef<str>,
    F: Fn(&str) -> String,
{
    let loc = region.locate(html)?;
    let items: Vec<String> = keys
        .iter()
        .take(region.max_items)
        .map(|key| render(key.as_ref()))
        .collect();
    Ok(loc.splice(html, &join_items(&items)))
}

#[cfg(test)]
#[path = "splice_test.rs"]
mod tests;
