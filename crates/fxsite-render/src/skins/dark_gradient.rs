//! site1: dark gradient theme, `article.news-card` markup.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use fxsite_core::{DailyKey, WeekKey};
use fxsite_feeds::text::truncate_chars;
use fxsite_feeds::{EnrichedItem, FeedItem};
use regex::Regex;

use super::{
    iso_seconds, recover_cards, week_label, DailyBrief, PageTarget, Skin, WeeklyBrief,
    DAILY_KEY_ATTR, DAILY_NEWS_END, DAILY_NEWS_START, WEEKLY_INDEX_END, WEEKLY_INDEX_START,
    WEEKLY_KEY_ATTR, WEEKLY_NEWS_END, WEEKLY_NEWS_START,
};
use crate::escape::{attr, text};
use crate::splice::KeyedRegion;

const DIR: &str = "site1-dark-gradient";
const SITE_URL: &str = "https://brokerproreviews.com";

const HEADLINE_TITLE_CHARS: usize = 110;
const SOURCE_TITLE_CHARS: usize = 120;

static HEADLINE_PAGES: [PageTarget; 3] = [
    PageTarget {
        path: "site1-dark-gradient/index.html",
        base: "",
        required: true,
        limit: Some(6),
    },
    PageTarget {
        path: "site1-dark-gradient/news/index.html",
        base: "../",
        required: false,
        limit: None,
    },
    PageTarget {
        path: "site1-dark-gradient/news/headlines/index.html",
        base: "../../",
        required: false,
        limit: None,
    },
];

static WEEKLY_TEASER_PAGES: [PageTarget; 2] = [
    PageTarget {
        path: "site1-dark-gradient/index.html",
        base: "",
        required: true,
        limit: None,
    },
    PageTarget {
        path: "site1-dark-gradient/news/index.html",
        base: "../",
        required: false,
        limit: None,
    },
];

static HEADLINE_CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<article class="news-card rss-news-card">.*?</article>"#)
        .expect("valid regex")
});

static DAILY_REGION: LazyLock<KeyedRegion> = LazyLock::new(|| {
    KeyedRegion::new(
        DAILY_NEWS_START,
        DAILY_NEWS_END,
        r#"(?s)<article class="news-card" data-daily-news="true" data-daily-key="[^"]+">.*?</article>"#,
        DAILY_KEY_ATTR,
        31,
    )
});

static WEEKLY_REGION: LazyLock<KeyedRegion> = LazyLock::new(|| {
    KeyedRegion::new(
        WEEKLY_NEWS_START,
        WEEKLY_NEWS_END,
        r#"(?s)<article class="news-card" data-weekly-news="true" data-weekly-key="[^"]+">.*?</article>"#,
        WEEKLY_KEY_ATTR,
        12,
    )
});

static WEEKLY_INDEX_REGION: LazyLock<KeyedRegion> = LazyLock::new(|| {
    KeyedRegion::new(
        WEEKLY_INDEX_START,
        WEEKLY_INDEX_END,
        r#"(?s)<article class="news-card" data-weekly-index="true" data-weekly-key="[^"]+">.*?</article>"#,
        WEEKLY_KEY_ATTR,
        52,
    )
});

#[derive(Debug, Clone, Copy, Default)]
pub struct DarkGradient;

impl Skin for DarkGradient {
    fn site_id(&self) -> &'static str {
        "site1"
    }

    fn dir(&self) -> &'static str {
        DIR
    }

    fn headline_pages(&self) -> &'static [PageTarget] {
        &HEADLINE_PAGES
    }

    fn headline_max_items(&self) -> usize {
        60
    }

    fn headline_cards(&self, items: &[FeedItem]) -> String {
        items
            .iter()
            .map(headline_card)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn recover_headlines(&self, region_inner: &str) -> Vec<FeedItem> {
        recover_cards(region_inner, &HEADLINE_CARD_RE)
    }

    fn daily_region(&self) -> &'static KeyedRegion {
        &DAILY_REGION
    }

    fn daily_teaser_page(&self) -> &'static str {
        "site1-dark-gradient/index.html"
    }

    fn daily_teaser(&self, key: DailyKey, generated_at: DateTime<Utc>) -> String {
        let title_en = format!("LATAM Broker + Crypto/FX Brief — {key}");
        let title_es = format!("Resumen LATAM Brokers + Cripto/FX — {key}");
        let checklist_en = "Today’s checklist (LATAM): confirm the regulated entity for your country, review spreads on USD/MXN &amp; USD/BRL, check deposit/withdrawal rails, and verify whether crypto CFDs/spot are supported and restricted in your region.";
        let checklist_es = "Checklist de hoy (LATAM): confirma la entidad regulada para tu país, revisa spreads en USD/MXN y USD/BRL, revisa depósitos/retiros y verifica si hay soporte y restricciones para cripto (CFDs/spot) en tu región.";
        format!(
            r#"<article class="news-card" data-daily-news="true" data-daily-key="{key}">
  <div class="news-image"></div>
  <div class="news-content">
    <span class="news-category" data-en="Daily Brief" data-es="Resumen diario">Daily Brief</span>
    <h3 class="news-title">
      <a class="link-cta" href="news/daily/{key}/" data-en="{en_attr}" data-es="{es_attr}">{en_text}</a>
    </h3>
    <p class="news-excerpt"
       data-en="{checklist_en}"
       data-es="{checklist_es}">{checklist_en}</p>
    <time class="news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{key}</time>
  </div>
</article>"#,
            en_attr = attr(&title_en),
            es_attr = attr(&title_es),
            en_text = text(&title_en),
            datetime = iso_seconds(generated_at),
        )
    }

    fn daily_page(&self, brief: &DailyBrief) -> String {
        let key = brief.key;
        let mut body = String::new();
        body.push_str(&format!(
            r#"        <h1 class="guide-title" data-en="Daily brief (LATAM) — {key}" data-es="Resumen diario (LATAM) — {key}">Daily brief (LATAM) — {key}</h1>
        <p class="guide-lead" data-en="Original summaries with links to the source. Always verify the regulated entity for your country and read the primary source before acting." data-es="Resúmenes originales con enlace a la fuente. Verifica siempre la entidad regulada para tu país y lee la fuente primaria antes de actuar.">Original summaries with links to the source. Always verify the regulated entity for your country and read the primary source before acting.</p>
        <time class="news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{key}</time>
"#,
            datetime = iso_seconds(brief.generated_at),
        ));
        for (heading_en, heading_es, items) in [
            (
                "Broker &amp; industry updates (LATAM)",
                "Actualizaciones de brokers e industria (LATAM)",
                &brief.brokers,
            ),
            (
                "Forex &amp; macro headlines (LATAM focus)",
                "Titulares de forex y macro (enfoque LATAM)",
                &brief.forex,
            ),
            (
                "Crypto headlines (LATAM + global)",
                "Titulares cripto (LATAM + global)",
                &brief.crypto,
            ),
        ] {
            body.push_str(&format!(
                r#"
        <h2 class="section-subheading mt-5" data-en="{heading_en}" data-es="{heading_es}">{heading_en}</h2>
        {}
"#,
                source_list(items),
            ));
        }

        page_shell(
            &format!("Daily Brief (LATAM) — {key} | BrokerProReviews"),
            "Daily LATAM brief: broker updates, forex headlines, and crypto news. Original summaries with links to primary sources.",
            &format!("{SITE_URL}/news/daily/{key}/"),
            &body,
        )
    }

    fn weekly_region(&self) -> &'static KeyedRegion {
        &WEEKLY_REGION
    }

    fn weekly_teaser_pages(&self) -> &'static [PageTarget] {
        &WEEKLY_TEASER_PAGES
    }

    fn weekly_teaser(&self, key: WeekKey, base: &str) -> String {
        let title_en = format!(
            "Weekly Forex Brief (BrokerProReviews) — {}",
            week_label(key, "Week")
        );
        let title_es = format!(
            "Resumen Forex Semanal (BrokerProReviews) — {}",
            week_label(key, "Semana")
        );
        format!(
            r#"<article class="news-card" data-weekly-news="true" data-weekly-key="{key}">
  <div class="news-image"></div>
  <div class="news-content">
    <span class="news-category" data-en="Weekly Brief" data-es="Resumen semanal">Weekly Brief</span>
    <h3 class="news-title">
      <a class="link-cta" href="{base}news/weekly/{key}/" data-en="{en_attr}" data-es="{es_attr}">{en_text}</a>
    </h3>
    <p class="news-excerpt"
       data-en="{WEEKLY_CHECKLIST_EN}"
       data-es="{WEEKLY_CHECKLIST_ES}">{WEEKLY_CHECKLIST_EN}</p>
    <time class="news-date" data-relative-time="true" data-stamp-on-publish="true">Just now</time>
  </div>
</article>"#,
            en_attr = attr(&title_en),
            es_attr = attr(&title_es),
            en_text = text(&title_en),
        )
    }

    fn weekly_page(&self, brief: &WeeklyBrief) -> String {
        let key = brief.key;
        let label_en = week_label(key, "Week");
        let label_es = week_label(key, "Semana");
        let mut body = format!(
            r#"        <h1 class="guide-title" data-en="Weekly brief — {label_en}" data-es="Resumen semanal — {label_es}">Weekly brief — {label_en}</h1>
        <p class="guide-lead" data-en="{WEEKLY_CHECKLIST_EN}" data-es="{WEEKLY_CHECKLIST_ES}">{WEEKLY_CHECKLIST_EN}</p>
        <time class="news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{key}</time>

        <h2 class="section-subheading mt-5" data-en="Daily briefs this week" data-es="Resúmenes diarios de la semana">Daily briefs this week</h2>
"#,
            datetime = iso_seconds(brief.generated_at),
        );
        if brief.daily_keys.is_empty() {
            body.push_str(
                r#"        <p class="section-intro section-intro-narrow" data-en="No daily briefs were published this week." data-es="No se publicaron resúmenes diarios esta semana.">No daily briefs were published this week.</p>
"#,
            );
        }
        for day in &brief.daily_keys {
            body.push_str(&format!(
                r#"        <div class="card-panel">
          <h3 class="subheading-card"><a class="link-cta" href="../../daily/{day}/" data-en="Daily brief (LATAM) — {day}" data-es="Resumen diario (LATAM) — {day}">Daily brief (LATAM) — {day}</a></h3>
        </div>
"#
            ));
        }

        page_shell(
            &format!("Weekly Brief — {label_en} | BrokerProReviews"),
            "Weekly forex brief: the week's daily LATAM briefs in one place, with a risk-first checklist.",
            &format!("{SITE_URL}/news/weekly/{key}/"),
            &body,
        )
    }

    fn weekly_index_region(&self) -> &'static KeyedRegion {
        &WEEKLY_INDEX_REGION
    }

    fn weekly_index_entry(&self, key: WeekKey) -> String {
        let label_en = week_label(key, "Week");
        let label_es = week_label(key, "Semana");
        let monday = key.monday().map(|d| d.to_string()).unwrap_or_default();
        format!(
            r#"<article class="news-card" data-weekly-index="true" data-weekly-key="{key}">
  <div class="news-content">
    <h3 class="news-title">
      <a class="link-cta" href="{key}/" data-en="Weekly brief — {label_en}" data-es="Resumen semanal — {label_es}">Weekly brief — {label_en}</a>
    </h3>
    <time class="news-date" datetime="{monday}" data-relative-time="true" data-show-absolute="true">{monday}</time>
  </div>
</article>"#
        )
    }
}

const WEEKLY_CHECKLIST_EN: &str = "This week’s checklist: key macro dates, major FX themes, and risk-first reminders. Verify regulation, test withdrawals, and compare all-in costs before scaling.";
const WEEKLY_CHECKLIST_ES: &str = "Checklist de la semana: fechas macro, temas FX y recordatorios de riesgo. Verifica regulación, prueba retiros y compara costos totales antes de escalar.";

fn headline_card(item: &FeedItem) -> String {
    let src = item.source_domain();
    let title = truncate_chars(&item.title, HEADLINE_TITLE_CHARS);
    format!(
        r#"<article class="news-card rss-news-card">
  <div class="news-image"></div>
  <div class="news-content">
    <span class="news-category" data-en="{src}" data-es="{src}">{src}</span>
    <h3 class="news-title">
      <a class="link-cta" href="{link}" target="_blank" rel="noopener noreferrer" data-en="{title_attr}" data-es="{title_attr}">{title_text}</a>
    </h3>
    <p class="news-excerpt" data-en="Source: {src}. Open original →" data-es="Fuente: {src}. Abrir original →">Source: {src}. Open original →</p>
    <time class="news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{date}</time>
  </div>
</article>"#,
        link = attr(&item.link),
        title_attr = attr(&title),
        title_text = text(&title),
        datetime = item.published_iso(),
        date = item.published_date(),
    )
}

fn source_list(items: &[EnrichedItem]) -> String {
    items
        .iter()
        .map(source_card)
        .collect::<Vec<_>>()
        .join("\n")
}

fn source_card(entry: &EnrichedItem) -> String {
    let item = &entry.item;
    let src = item.source_domain();
    let title = truncate_chars(&item.title, SOURCE_TITLE_CHARS);
    let snapshot = entry.snapshot.as_deref().map_or_else(String::new, |s| {
        let s = attr(s);
        format!(
            "\n  <p class=\"section-intro section-intro-narrow\" data-en=\"Source snapshot: {s}\" data-es=\"Resumen de la fuente: {s}\">Source snapshot: {s}</p>"
        )
    });
    format!(
        r#"<div class="card-panel">
  <h3 class="subheading-card"><a class="link-cta" href="{link}" target="_blank" rel="noopener noreferrer">{title_text}</a></h3>
  <p class="rating-small" data-en="Source: {src}. Open original →" data-es="Fuente: {src}. Abrir original →">Source: {src}. Open original →</p>
  <time class="news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{date}</time>{snapshot}
  <p class="section-intro section-intro-narrow" data-en="Our note: Keep it practical for LATAM. Verify the exact regulated entity, fees, and withdrawal terms for your country before acting." data-es="Nuestra nota: Manténlo práctico para LATAM. Verifica la entidad regulada exacta, comisiones y retiros para tu país antes de actuar.">Our note: Keep it practical for LATAM. Verify the exact regulated entity, fees, and withdrawal terms for your country before acting.</p>
</div>"#,
        link = attr(&item.link),
        title_text = text(&title),
        datetime = item.published_iso(),
        date = item.published_date(),
    )
}

/// Full document for pages three levels below the skin root
/// (`news/<kind>/<key>/index.html`).
fn page_shell(title: &str, description: &str, canonical: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <meta name="robots" content="index,follow,max-image-preview:large,max-snippet:-1,max-video-preview:-1">
  <link rel="canonical" href="{canonical}">
  <link rel="icon" href="/favicon.ico">
  <link rel="apple-touch-icon" href="/apple-touch-icon.png">
  <meta name="theme-color" content="#0b1220">
  <link rel="stylesheet" href="../../../styles.css">
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700;800&display=swap" rel="stylesheet">
</head>
<body>
  <header class="header guide-header">
    <nav class="nav guide-nav">
      <div class="container">
        <div class="nav-content">
          <a class="logo" href="../../../index.html" aria-label="BrokerProReviews home">
            <span class="logo-icon">📊</span>
            <span class="logo-text">BrokerProReviews</span>
          </a>
          <div class="nav-actions">
            <a class="guide-back link-cta" href="../../../index.html#news" data-en="← Back to news" data-es="← Volver a noticias">← Back to news</a>
            <button class="lang-toggle" id="langToggle" type="button">ES</button>
          </div>
        </div>
      </div>
    </nav>
  </header>

  <main class="section-pad section-pad-dark">
    <div class="container">
      <article class="guide-article">
{body}      </article>
    </div>
  </main>

  <script src="../../../translations.js"></script>
</body>
</html>
"##,
        title = text(title),
        description = attr(description),
    )
}
