//! Weekly brief: a page per skin per ISO week, a teaser card on every page
//! that lists weekly briefs, and the weekly index.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use fxsite_core::{AppConfig, DailyKey, WeekKey};
use fxsite_render::skins::DAILY_KEY_ATTR;
use fxsite_render::{
    all_skins, extract_keys, read_page, rebuild_keyed, upsert_keyed, write_page_if_absent,
    KeyPolicy, Skin, WeeklyBrief,
};

use crate::pages::edit_page;

/// Publish this week's brief on both skins.
///
/// # Errors
///
/// Returns an error if a required teaser page is missing or any page cannot
/// be read, spliced, or written.
pub(crate) fn run_weekly(config: &AppConfig, now: DateTime<Utc>) -> anyhow::Result<()> {
    let key = WeekKey::from_datetime(now);
    let updated = apply_weekly(&config.site_root, key, now)?;

    if updated.is_empty() {
        println!("Weekly news already present (key={key})");
    } else {
        println!(
            "Weekly news updated: {} (key={key} datetime={})",
            updated.join(", "),
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    Ok(())
}

/// Returns the site-relative paths that changed.
///
/// The weekly page is written once per week and lists the daily briefs
/// announced at that moment, so the job is meant to run after the week's
/// last daily brief (Sunday, UTC). Later runs in the same week only refresh
/// the teasers and the index.
pub(crate) fn apply_weekly(
    site_root: &Path,
    key: WeekKey,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<String>> {
    let mut updated = Vec::new();
    for skin in all_skins() {
        let brief = WeeklyBrief {
            key,
            generated_at: now,
            daily_keys: daily_keys_in_week(site_root, *skin, key)?,
        };
        tracing::debug!(skin = skin.dir(), days = brief.daily_keys.len(), "weekly brief");

        let page = skin.weekly_page_path(key);
        if write_page_if_absent(&site_root.join(&page), &skin.weekly_page(&brief))? {
            updated.push(page);
        }

        let key_str = key.to_string();
        for target in skin.weekly_teaser_pages() {
            let teaser = skin.weekly_teaser(key, target.base);
            let changed = edit_page(site_root, target.path, target.required, |html| {
                let region = skin.weekly_region();
                upsert_keyed(html, region, &key_str, &teaser, KeyPolicy::ReplaceByKey)
            })?;
            if changed {
                updated.push(target.path.to_string());
            }
        }

        let index = skin.weekly_index_path();
        if rebuild_weekly_index(site_root, *skin, &index, key)? {
            updated.push(index);
        }
    }
    Ok(updated)
}

/// Daily briefs already announced on the skin's daily teaser page that fall
/// in `week`, newest first.
fn daily_keys_in_week(
    site_root: &Path,
    skin: &dyn Skin,
    week: WeekKey,
) -> anyhow::Result<Vec<DailyKey>> {
    let Some(html) = read_page(&site_root.join(skin.daily_teaser_page()))? else {
        return Ok(Vec::new());
    };
    let Ok(region) = skin.daily_region().locate(&html) else {
        tracing::warn!(
            page = skin.daily_teaser_page(),
            "no daily region; weekly page lists no days"
        );
        return Ok(Vec::new());
    };
    let mut days: Vec<DailyKey> = extract_keys(region.inner(&html), DAILY_KEY_ATTR)
        .iter()
        .filter_map(|raw| raw.parse::<DailyKey>().ok())
        .filter(|day| day.week() == week)
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    Ok(days)
}

/// Regenerate the weekly index from the keys it already lists plus
/// `current`, newest first. The index page is optional.
fn rebuild_weekly_index(
    site_root: &Path,
    skin: &dyn Skin,
    rel: &str,
    current: WeekKey,
) -> anyhow::Result<bool> {
    let region = skin.weekly_index_region();
    edit_page(site_root, rel, false, |html| {
        let known = region.locate(html)?;
        let mut keys: Vec<WeekKey> = extract_keys(known.inner(html), region.key_attr)
            .iter()
            .filter_map(|raw| raw.parse::<WeekKey>().ok())
            .collect();
        keys.push(current);
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.dedup();

        let labels: Vec<String> = keys.iter().map(ToString::to_string).collect();
        rebuild_keyed(html, region, &labels, |label| {
            label
                .parse::<WeekKey>()
                .map(|k| skin.weekly_index_entry(k))
                .unwrap_or_default()
        })
    })
}

#[cfg(test)]
#[path = "weekly_test.rs"]
mod tests;
