use chrono::{Duration, TimeZone};
use fxsite_render::skins::{DAILY_NEWS_END, DAILY_NEWS_START};

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap()
}

fn item(title: &str, link: &str, hours_ago: i64) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        link: link.to_string(),
        published_at: now() - Duration::hours(hours_ago),
    }
}

fn brief(at: DateTime<Utc>) -> DailyBrief {
    DailyBrief {
        key: DailyKey::from_datetime(at),
        generated_at: at,
        brokers: vec![item("Broker adds MT5", "https://fxnews.example/1", 3).into()],
        forex: Vec::new(),
        crypto: Vec::new(),
    }
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let region = format!("<main>\n{DAILY_NEWS_START}\n{DAILY_NEWS_END}\n</main>\n");
    for rel in ["site1-dark-gradient/index.html", "site2-minimal-light/news/index.html"] {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, &region).unwrap();
    }
    dir
}

// -----------------------------------------------------------------------
// Section selection
// -----------------------------------------------------------------------

#[test]
fn section_keeps_fresh_on_topic_items_regional_first() {
    let matcher = LatamMatcher::new();
    let items = vec![
        item("ECB minutes in focus", "https://a.example/ecb", 1),
        item("Banxico holds rates, MXN firms", "https://a.example/banxico", 2),
        item("Gold rallies on safe haven demand", "https://a.example/gold", 1),
        item("USD/BRL jumps in Brazil", "https://a.example/old", 24 * 60),
    ];
    let picked = select_section(items, Topic::ForexMacro, &matcher, now(), 45);
    let links: Vec<&str> = picked.iter().map(|i| i.link.as_str()).collect();
    assert_eq!(links, vec!["https://a.example/banxico", "https://a.example/ecb"]);
}

#[test]
fn section_is_capped() {
    let matcher = LatamMatcher::new();
    let items = (0..12)
        .map(|i| item(&format!("Bitcoin update {i}"), &format!("https://c.example/{i}"), i))
        .collect();
    assert_eq!(select_section(items, Topic::Crypto, &matcher, now(), 45).len(), 8);
}

// -----------------------------------------------------------------------
// Publishing
// -----------------------------------------------------------------------

#[test]
fn writes_pages_and_teasers_once_per_day() {
    let dir = setup();
    let root = dir.path();

    let updated = apply_daily(root, &brief(now()), KeyPolicy::InsertIfAbsent).unwrap();
    assert_eq!(
        updated,
        vec![
            "site1-dark-gradient/news/daily/2026-02-10/index.html",
            "site1-dark-gradient/index.html",
            "site2-minimal-light/news/daily/2026-02-10/index.html",
            "site2-minimal-light/news/index.html",
        ]
    );
    let home = std::fs::read_to_string(root.join("site1-dark-gradient/index.html")).unwrap();
    assert_eq!(home.matches(r#"data-daily-key="2026-02-10""#).count(), 1);

    let later = now() + Duration::hours(4);
    let again = apply_daily(root, &brief(later), KeyPolicy::InsertIfAbsent).unwrap();
    assert!(again.is_empty());
}

#[test]
fn replace_updates_teasers_but_not_pages() {
    let dir = setup();
    let root = dir.path();
    apply_daily(root, &brief(now()), KeyPolicy::InsertIfAbsent).unwrap();
    let page = root.join("site1-dark-gradient/news/daily/2026-02-10/index.html");
    let first_page = std::fs::read_to_string(&page).unwrap();

    let later = now() + Duration::hours(4);
    let updated = apply_daily(root, &brief(later), KeyPolicy::ReplaceByKey).unwrap();
    assert_eq!(
        updated,
        vec!["site1-dark-gradient/index.html", "site2-minimal-light/news/index.html"]
    );
    assert_eq!(std::fs::read_to_string(&page).unwrap(), first_page);
    let home = std::fs::read_to_string(root.join("site1-dark-gradient/index.html")).unwrap();
    assert!(home.contains(r#"datetime="2026-02-10T13:00:00Z""#));
    assert_eq!(home.matches(r#"data-daily-key="2026-02-10""#).count(), 1);
}

#[test]
fn empty_brief_publishes_nothing() {
    let dir = setup();
    let mut empty = brief(now());
    empty.brokers.clear();
    assert!(apply_daily(dir.path(), &empty, KeyPolicy::InsertIfAbsent).unwrap().is_empty());
    assert!(!dir.path().join("site1-dark-gradient/news/daily").exists());
}

#[test]
fn missing_teaser_page_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = apply_daily(dir.path(), &brief(now()), KeyPolicy::InsertIfAbsent).unwrap_err();
    assert!(err.to_string().contains("site1-dark-gradient/index.html"));
}
