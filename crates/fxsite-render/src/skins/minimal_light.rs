//! site2: minimal light theme, `div.card.card-pad` markup.

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

const DIR: &str = "site2-minimal-light";
const SITE_URL: &str = "https://brokercompare.com";

const HEADLINE_TITLE_CHARS: usize = 95;
const SOURCE_TITLE_CHARS: usize = 110;

static HEADLINE_PAGES: [PageTarget; 2] = [
    PageTarget {
        path: "site2-minimal-light/news/index.html",
        base: "../",
        required: true,
        limit: None,
    },
    PageTarget {
        path: "site2-minimal-light/news/headlines/index.html",
        base: "../../",
        required: false,
        limit: None,
    },
];

static WEEKLY_TEASER_PAGES: [PageTarget; 2] = [
    PageTarget {
        path: "site2-minimal-light/news/index.html",
        base: "../",
        required: true,
        limit: None,
    },
    PageTarget {
        path: "site2-minimal-light/index.html",
        base: "",
        required: false,
        limit: None,
    },
];

static HEADLINE_CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div class="card card-pad rss-news-card">.*?</div>"#).expect("valid regex")
});

static DAILY_REGION: LazyLock<KeyedRegion> = LazyLock::new(|| {
    KeyedRegion::new(
        DAILY_NEWS_START,
        DAILY_NEWS_END,
        r#"(?s)<div class="card card-pad" data-daily-news="true" data-daily-key="[^"]+">.*?</div>"#,
        DAILY_KEY_ATTR,
        31,
    )
});

static WEEKLY_REGION: LazyLock<KeyedRegion> = LazyLock::new(|| {
    KeyedRegion::new(
        WEEKLY_NEWS_START,
        WEEKLY_NEWS_END,
        r#"(?s)<div class="card card-pad" data-weekly-news="true" data-weekly-key="[^"]+">.*?</div>"#,
        WEEKLY_KEY_ATTR,
        12,
    )
});

static WEEKLY_INDEX_REGION: LazyLock<KeyedRegion> = LazyLock::new(|| {
    KeyedRegion::new(
        WEEKLY_INDEX_START,
        WEEKLY_INDEX_END,
        r#"(?s)<div class="card card-pad" data-weekly-index="true" data-weekly-key="[^"]+">.*?</div>"#,
        WEEKLY_KEY_ATTR,
        52,
    )
});

const WEEKLY_SUMMARY_EN: &str = "A short weekly snapshot: what matters, what to watch, and what to avoid. Compare platforms and regulation, then test deposits/withdrawals with a small amount.";
const WEEKLY_SUMMARY_ES: &str = "Snapshot semanal: qué importa, qué vigilar y qué evitar. Compara plataformas y regulación, y prueba depósitos/retiros con un monto pequeño.";

#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalLight;

impl Skin for MinimalLight {
    fn site_id(&self) -> &'static str {
        "site2"
    }

    fn dir(&self) -> &'static str {
        DIR
    }

    fn headline_pages(&self) -> &'static [PageTarget] {
        &HEADLINE_PAGES
    }

    fn headline_max_items(&self) -> usize {
        36
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
        "site2-minimal-light/news/index.html"
    }

    fn daily_teaser(&self, key: DailyKey, generated_at: DateTime<Utc>) -> String {
        let title_en = format!("Daily LATAM Broker & Crypto/FX Brief — {key}");
        let title_es = format!("Resumen diario LATAM (Brokers y Cripto/FX) — {key}");
        let focus_en = "Daily focus: LATAM broker conditions (local entity, fees, withdrawals) + forex &amp; crypto catalysts. Open the original headlines below, and always cross-check the regulator register for your jurisdiction.";
        let focus_es = "Enfoque diario: condiciones de brokers en LATAM (entidad local, comisiones, retiros) + catalizadores de forex y cripto. Abre los titulares originales abajo y valida siempre en el registro del regulador de tu jurisdicción.";
        format!(
            r#"<div class="card card-pad" data-daily-news="true" data-daily-key="{key}">
  <h3 class="card-title">
    <a class="btn-link" href="daily/{key}/" data-en="{en_attr}" data-es="{es_attr}">{en_text}</a>
  </h3>
  <p class="muted mb-1"
     data-en="{focus_en}"
     data-es="{focus_es}">{focus_en}</p>
  <time class="muted small news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{key}</time>
</div>"#,
            en_attr = attr(&title_en),
            es_attr = attr(&title_es),
            en_text = text(&title_en),
            datetime = iso_seconds(generated_at),
        )
    }

    fn daily_page(&self, brief: &DailyBrief) -> String {
        let key = brief.key;
        let intro = format!(
            r#"        <h1 class="intro-title" data-en="Daily LATAM brief — {key}" data-es="Resumen diario LATAM — {key}">Daily LATAM brief — {key}</h1>
        <p class="intro-text" data-en="Original summaries with links to sources. Verify regulation and read the primary source before acting." data-es="Resúmenes originales con enlace a las fuentes. Verifica regulación y lee la fuente primaria antes de actuar.">Original summaries with links to sources. Verify regulation and read the primary source before acting.</p>
        <time class="muted small news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{key}</time>
"#,
            datetime = iso_seconds(brief.generated_at),
        );

        let mut sections = String::new();
        for (idx, (heading_en, heading_es, items)) in [
            (
                "Broker &amp; industry updates",
                "Actualizaciones de brokers e industria",
                &brief.brokers,
            ),
            ("Forex &amp; macro", "Forex y macro", &brief.forex),
            ("Crypto", "Cripto", &brief.crypto),
        ]
        .into_iter()
        .enumerate()
        {
            let spacing = if idx == 0 { "mb-2" } else { "mb-2 mt-4" };
            if idx > 0 {
                sections.push('\n');
            }
            sections.push_str(&format!(
                r#"        <h2 class="section-heading {spacing}" data-en="{heading_en}" data-es="{heading_es}">{heading_en}</h2>
        <div class="grid grid-3">
          {}
        </div>
"#,
                source_list(items),
            ));
        }

        page_shell(
            &format!("Daily LATAM Brief — {key} | Brokercompare"),
            "Daily LATAM brief: brokers, forex, and crypto headlines. Original summaries with links to primary sources.",
            &format!("{SITE_URL}/news/daily/{key}/"),
            &intro,
            &sections,
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
            "Weekly Market Brief (Brokercompare) — {}",
            week_label(key, "Week")
        );
        let title_es = format!(
            "Resumen Semanal de Mercado (Brokercompare) — {}",
            week_label(key, "Semana")
        );
        format!(
            r#"<div class="card card-pad" data-weekly-news="true" data-weekly-key="{key}">
  <h3 class="card-title">
    <a class="btn-link" href="{base}news/weekly/{key}/" data-en="{en_attr}" data-es="{es_attr}">{en_text}</a>
  </h3>
  <p class="muted mb-1"
     data-en="{WEEKLY_SUMMARY_EN}"
     data-es="{WEEKLY_SUMMARY_ES}">{WEEKLY_SUMMARY_EN}</p>
  <time class="muted small news-date" data-relative-time="true" data-stamp-on-publish="true">Just now</time>
</div>"#,
            en_attr = attr(&title_en),
            es_attr = attr(&title_es),
            en_text = text(&title_en),
        )
    }

    fn weekly_page(&self, brief: &WeeklyBrief) -> String {
        let key = brief.key;
        let label_en = week_label(key, "Week");
        let label_es = week_label(key, "Semana");
        let intro = format!(
            r#"        <h1 class="intro-title" data-en="Weekly market brief — {label_en}" data-es="Resumen semanal de mercado — {label_es}">Weekly market brief — {label_en}</h1>
        <p class="intro-text" data-en="{WEEKLY_SUMMARY_EN}" data-es="{WEEKLY_SUMMARY_ES}">{WEEKLY_SUMMARY_EN}</p>
        <time class="muted small news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{key}</time>
"#,
            datetime = iso_seconds(brief.generated_at),
        );

        let cards = if brief.daily_keys.is_empty() {
            r#"<div class="card card-pad">
            <p class="muted" data-en="No daily briefs were published this week." data-es="No se publicaron resúmenes diarios esta semana.">No daily briefs were published this week.</p>
          </div>"#
                .to_string()
        } else {
            brief
                .daily_keys
                .iter()
                .map(|day| {
                    format!(
                        r#"<div class="card card-pad">
            <h3 class="card-title"><a class="btn-link" href="../../daily/{day}/" data-en="Daily LATAM brief — {day}" data-es="Resumen diario LATAM — {day}">Daily LATAM brief — {day}</a></h3>
          </div>"#
                    )
                })
                .collect::<Vec<_>>()
                .join("\n          ")
        };
        let sections = format!(
            r#"        <h2 class="section-heading mb-2" data-en="Daily briefs this week" data-es="Resúmenes diarios de la semana">Daily briefs this week</h2>
        <div class="grid grid-3">
          {cards}
        </div>
"#
        );

        page_shell(
            &format!("Weekly Market Brief — {label_en} | Brokercompare"),
            "Weekly market brief: the week's daily LATAM briefs in one place, with what to watch next.",
            &format!("{SITE_URL}/news/weekly/{key}/"),
            &intro,
            &sections,
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
            r#"<div class="card card-pad" data-weekly-index="true" data-weekly-key="{key}">
  <h3 class="card-title">
    <a class="btn-link" href="{key}/" data-en="Weekly market brief — {label_en}" data-es="Resumen semanal de mercado — {label_es}">Weekly market brief — {label_en}</a>
  </h3>
  <time class="muted small news-date" datetime="{monday}" data-relative-time="true" data-show-absolute="true">{monday}</time>
</div>"#
        )
    }
}

fn headline_card(item: &FeedItem) -> String {
    let src = item.source_domain();
    let title = truncate_chars(&item.title, HEADLINE_TITLE_CHARS);
    format!(
        r#"<div class="card card-pad rss-news-card">
  <h3 class="card-title">
    <a class="btn-link" href="{link}" target="_blank" rel="noopener noreferrer" data-en="{title_attr}" data-es="{title_attr}">{title_text}</a>
  </h3>
  <p class="muted mb-1" data-en="Source: {src}. Open original →" data-es="Fuente: {src}. Abrir original →">Source: {src}. Open original →</p>
  <time class="muted small news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{date}</time>
</div>"#,
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
            "\n  <p class=\"muted\" data-en=\"Source snapshot: {s}\" data-es=\"Resumen de la fuente: {s}\">Source snapshot: {s}</p>"
        )
    });
    format!(
        r#"<div class="card card-pad">
  <h3 class="card-title"><a class="btn-link" href="{link}" target="_blank" rel="noopener noreferrer">{title_text}</a></h3>
  <p class="muted mb-1" data-en="Source: {src}. Open original →" data-es="Fuente: {src}. Abrir original →">Source: {src}. Open original →</p>
  <time class="muted small news-date" datetime="{datetime}" data-relative-time="true" data-show-absolute="true">{date}</time>{snapshot}
  <p class="muted" data-en="Our note: Compare costs and regulation for your LATAM jurisdiction, then validate the headline details on the official source." data-es="Nuestra nota: Compara costos y regulación para tu jurisdicción en LATAM, y valida los detalles del titular en la fuente oficial.">Our note: Compare costs and regulation for your LATAM jurisdiction, then validate the headline details on the official source.</p>
</div>"#,
        link = attr(&item.link),
        title_text = text(&title),
        datetime = item.published_iso(),
        date = item.published_date(),
    )
}

/// Full document for pages three levels below the skin root.
fn page_shell(title: &str, description: &str, canonical: &str, intro: &str, sections: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <link rel="canonical" href="{canonical}">
  <link rel="stylesheet" href="../../../styles.css">
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@300;400;500;600;700&display=swap" rel="stylesheet">
</head>
<body>
  <header class="header">
    <div class="container">
      <nav class="navbar">
        <a class="logo" href="../../../index.html">Brokercompare</a>
        <ul class="nav-links" id="primaryNav">
          <li><a href="../../../index.html#brokers" data-en="Brokers" data-es="Brokers">Brokers</a></li>
          <li><a href="../../../reviews/" data-en="Reviews" data-es="Reseñas">Reviews</a></li>
          <li><a href="../../../compare/" data-en="Compare" data-es="Comparar">Compare</a></li>
          <li><a href="../../../strategies/" data-en="Strategies" data-es="Estrategias">Strategies</a></li>
          <li><a href="../../../index.html#tools" data-en="Tools" data-es="Herramientas">Tools</a></li>
          <li><a href="../../../learn/" data-en="Learn" data-es="Aprender">Learn</a></li>
          <li><a href="../../" data-en="News" data-es="Noticias">News</a></li>
        </ul>
        <div class="nav-right">
          <button class="menu-btn" id="menuToggle" type="button" aria-controls="primaryNav" aria-expanded="false" data-en="Menu" data-es="Menú">Menu</button>
          <button class="lang-btn" id="langToggle" type="button">ES</button>
        </div>
      </nav>
    </div>
  </header>

  <main>
    <section class="intro">
      <div class="container">
{intro}      </div>
    </section>

    <section class="section section--alt">
      <div class="container">
{sections}      </div>
    </section>
  </main>

  <script src="../../../translations.js"></script>
  <script>
    (function () {{
      var btn = document.getElementById('menuToggle');
      var nav = document.getElementById('primaryNav');
      if (!btn || !nav) return;
      btn.addEventListener('click', function () {{
        var expanded = btn.getAttribute('aria-expanded') === 'true';
        btn.setAttribute('aria-expanded', expanded ? 'false' : 'true');
        nav.classList.toggle('is-open', !expanded);
      }});
    }})();
  </script>
</body>
</html>
"##,
        title = text(title),
        description = attr(description),
    )
}
