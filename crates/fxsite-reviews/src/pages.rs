//! Review regions on the site1 broker pages and homepage.
//!
//! Both regions are regenerated in full from `normalized.json` on every run;
//! hand edits between the markers do not survive.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fxsite_core::{BrokerConfig, BrokerRegistry};
use fxsite_render::escape::{attr, text};
use fxsite_render::{update_page, DarkGradient, MarkerRegion, RenderError, Skin};

use crate::error::ReviewsError;
use crate::types::{BrokerReviews, NormalizedDocument, NormalizedReview, BEST_RATING};

pub const SUMMARY_START: &str = "<!-- LICENSED_USER_REVIEWS_SUMMARY_START -->";
pub const SUMMARY_END: &str = "<!-- LICENSED_USER_REVIEWS_SUMMARY_END -->";
pub const BLOCK_START: &str = "<!-- LICENSED_REVIEWS_BLOCK_START -->";
pub const BLOCK_END: &str = "<!-- LICENSED_REVIEWS_BLOCK_END -->";

/// Snippets shown in a broker page summary.
const SUMMARY_SNIPPETS: usize = 3;
/// Cards rendered per homepage panel.
const PANEL_CARDS: usize = 5;
/// Cards visible before "View more".
const PANEL_VISIBLE: usize = 2;

const SUMMARY_INDENT: &str = "                ";
const PANEL_INDENT: &str = "                    ";

const EMPTY_STARS: &str = "☆☆☆☆☆";

/// `★★★★☆` for a rating, rounded and clamped to 1..=5.
fn stars(rating: f64) -> String {
    // Clamped before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = rating.round().clamp(1.0, f64::from(BEST_RATING)) as usize;
    let best = usize::from(BEST_RATING);
    format!("{}{}", "★".repeat(filled), "☆".repeat(best - filled))
}

fn count_label(count: usize, one: &str, many: &str) -> String {
    format!("({count} {})", if count == 1 { one } else { many })
}

/// Prefix every non-empty line with `indent`.
fn indent_lines(block: &str, indent: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

struct RatingSummary {
    stars: String,
    score: String,
    count_en: String,
    count_es: String,
}

fn rating_summary(data: &BrokerReviews) -> RatingSummary {
    let count = data.aggregate.review_count;
    let value = if count == 0 { 0.0 } else { data.aggregate.rating_value };
    let has_value = value > 0.0;
    RatingSummary {
        stars: if has_value { stars(value) } else { EMPTY_STARS.to_string() },
        score: if has_value { format!("{value}/5") } else { "—".to_string() },
        count_en: count_label(count, "review", "reviews"),
        count_es: count_label(count, "reseña", "reseñas"),
    }
}

fn source_html(review: &NormalizedReview) -> String {
    if review.source_url.is_empty() {
        return text(&review.source_name).into_owned();
    }
    format!(
        r#"<a class="link-cta" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        attr(&review.source_url),
        text(&review.source_name)
    )
}

/// One review card, unindented.
fn review_card(review: &NormalizedReview, hidden: bool) -> String {
    let class = if hidden { "review-card is-hidden" } else { "review-card" };
    let body = attr(&review.text);
    let source = attr(&review.source_name);
    format!(
        r#"<div class="{class}">
    <div class="review-header">
        <span class="review-name">{author}</span>
        <span class="rating-stars-gold">{stars}</span>
    </div>
    <p class="review-text" data-en="{body}" data-es="{body}">
        {body}
    </p>
    <time class="review-date" datetime="{date_attr}">{date}</time>
    <span class="review-date" data-en="Source: {source} (licensed)" data-es="Fuente: {source} (licencia)">Source: {source_html} (licensed)</span>
</div>"#,
        author = text(&review.author_display),
        stars = stars(f64::from(review.rating)),
        date_attr = attr(&review.date),
        date = text(&review.date),
        source_html = source_html(review),
    )
}

/// Summary panel for a broker's own page.
#[must_use]
pub fn summary_block(slug: &str, data: &BrokerReviews) -> String {
    let rating = rating_summary(data);
    let snippets = if data.reviews.is_empty() {
        r#"<p class="rating-small" data-en="No licensed reviews imported yet." data-es="Aún no hay reseñas importadas con licencia.">No licensed reviews imported yet.</p>"#
            .to_string()
    } else {
        data.reviews
            .iter()
            .take(SUMMARY_SNIPPETS)
            .map(|r| review_card(r, false))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let block = format!(
        r#"<div class="card-panel" data-licensed-reviews-summary="{slug}">
    <h2 class="subheading-card" data-en="User rating (licensed exports)" data-es="Calificación de usuarios (licencia)">User rating (licensed exports)</h2>
    <p class="guide-text" data-en="This summary is calculated from reviews you’re licensed to republish (and/or reader submissions). It’s separate from our editorial score." data-es="Este resumen se calcula con reseñas con licencia (y/o envíos de lectores). Es independiente del puntaje editorial.">
        This summary is calculated from reviews you’re licensed to republish (and/or reader submissions). It’s separate from our editorial score.
    </p>
    <div class="rating-row">
        <span class="rating-stars-gold">{stars}</span>
        <span class="rating-score">{score}</span>
        <span class="rating-small" data-en="{count_en}" data-es="{count_es}">{count_en}</span>
    </div>
    <div class="mt-2">
        <h3 class="criteria-label" data-en="Recent licensed snippets" data-es="Fragmentos recientes (licencia)">Recent licensed snippets</h3>
{snippets}
    </div>
    <div class="link-row">
        <a class="link-cta" href="../methodology/" data-en="Methodology &amp; sources →" data-es="Metodología y fuentes →">Methodology &amp; sources →</a>
        <a class="link-cta" href="../reviews/submit/" data-en="Submit a review →" data-es="Enviar una reseña →">Submit a review →</a>
    </div>
</div>"#,
        slug = attr(slug),
        stars = rating.stars,
        score = text(&rating.score),
        count_en = attr(&rating.count_en),
        count_es = attr(&rating.count_es),
        snippets = indent_lines(&snippets, "    "),
    );
    indent_lines(&block, SUMMARY_INDENT)
}

/// One broker's panel in the homepage review list.
#[must_use]
pub fn broker_panel(broker: &BrokerConfig, data: &BrokerReviews) -> String {
    let rating = rating_summary(data);
    let cards = if data.reviews.is_empty() {
        r#"<p class="rating-small" data-en="No licensed reviews imported yet." data-es="Aún no hay reseñas importadas con licencia.">No licensed reviews imported yet.</p>"#
            .to_string()
    } else {
        data.reviews
            .iter()
            .take(PANEL_CARDS)
            .enumerate()
            .map(|(idx, r)| review_card(r, idx >= PANEL_VISIBLE))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let more = if data.reviews.len() > PANEL_VISIBLE {
        r#"
<div class="reviews-actions">
    <button class="btn-more" type="button" data-review-toggle data-en="View more reviews" data-es="Ver más reseñas">View more reviews</button>
</div>"#
    } else {
        ""
    };

    let panel = format!(
        r#"<div class="card-panel" data-licensed-reviews-broker="{slug}">
    <div class="card-header-flex">
        <div class="badge-logo">
            <img class="broker-logo-img" src="{logo}" alt="{name_attr} logo" width="48" height="48" loading="lazy" decoding="async">
        </div>
        <div>
            <h4 class="card-heading-sm">{name}</h4>
            <div class="rating-row">
                <span class="rating-stars-gold">{stars}</span>
                <span class="rating-score">{score}</span>
                <span class="rating-small review-count" data-en="{count_en}" data-es="{count_es}">{count_en}</span>
            </div>
        </div>
    </div>
    <div class="mt-2">
        <h5 class="block-title" data-en="User Reviews (licensed)" data-es="Reseñas (licencia)">User Reviews (licensed)</h5>
{cards}
    </div>
</div>"#,
        slug = attr(&broker.slug),
        logo = attr(&broker.logo_url),
        name_attr = attr(&broker.name),
        name = text(&broker.name),
        stars = rating.stars,
        score = text(&rating.score),
        count_en = attr(&rating.count_en),
        count_es = attr(&rating.count_es),
        cards = indent_lines(&format!("{cards}{more}"), "        "),
    );
    indent_lines(&panel, PANEL_INDENT)
}

/// Inner content of the homepage review region: a heading, a disclaimer,
/// and one panel per registry broker in registry order.
#[must_use]
pub fn homepage_block(registry: &BrokerRegistry, doc: &NormalizedDocument) -> String {
    let header = format!(
        r#"{PANEL_INDENT}<h3 class="section-subheading" data-en="Detailed Broker Reviews" data-es="Reseñas Detalladas de Brokers">Detailed Broker Reviews</h3>
{PANEL_INDENT}<p class="rating-small" data-en="These review snippets are imported from licensed exports and/or reader submissions. Always verify the broker entity on official registers." data-es="Estos fragmentos se importan de exports con licencia y/o envíos de lectores. Verifica la entidad en registros oficiales.">These review snippets are imported from licensed exports and/or reader submissions. Always verify the broker entity on official registers.</p>"#
    );
    let panels: Vec<String> = registry
        .brokers()
        .iter()
        .map(|broker| broker_panel(broker, &broker_data(doc, broker)))
        .collect();
    format!("\n{header}\n\n{}\n{SUMMARY_INDENT}", panels.join("\n\n"))
}

fn broker_data(doc: &NormalizedDocument, broker: &BrokerConfig) -> BrokerReviews {
    doc.brokers
        .get(&broker.slug)
        .cloned()
        .unwrap_or_else(|| BrokerReviews {
            name: broker.name.clone(),
            ..BrokerReviews::default()
        })
}

fn replace_inner(html: &str, start: &str, end: &str, inner: &str) -> Result<String, RenderError> {
    let region = MarkerRegion::locate(html, start, end)?;
    Ok(region.splice(html, inner))
}

/// Outcome of a rebuild. Failed files do not stop the remaining ones.
#[derive(Debug, Default)]
pub struct RebuildReport {
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, ReviewsError)>,
}

impl RebuildReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: Result<bool, ReviewsError>) {
        match result {
            Ok(true) => self.updated.push(path),
            Ok(false) => self.unchanged.push(path),
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "failed to rebuild review region"
                );
                self.failures.push((path, e));
            }
        }
    }
}

/// Rewrite one existing page. A missing page is an error.
fn rebuild_file<F>(path: &Path, edit: F) -> Result<bool, ReviewsError>
where
    F: FnOnce(&str) -> Result<String, RenderError>,
{
    update_page(path, edit)?.ok_or_else(|| ReviewsError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::from(ErrorKind::NotFound),
    })
}

/// Regenerate the summary region on every broker page and the panel list
/// on the site1 homepage.
#[must_use]
pub fn rebuild_pages(
    site_root: &Path,
    registry: &BrokerRegistry,
    doc: &NormalizedDocument,
) -> RebuildReport {
    let site = DarkGradient.dir();
    let mut report = RebuildReport::default();

    for broker in registry.brokers() {
        let path = site_root.join(format!("{site}/brokers/{}.html", broker.slug));
        let inner = format!(
            "\n{}\n{SUMMARY_INDENT}",
            summary_block(&broker.slug, &broker_data(doc, broker))
        );
        let result = rebuild_file(&path, |html| {
            replace_inner(html, SUMMARY_START, SUMMARY_END, &inner)
        });
        report.record(path, result);
    }

    let path = site_root.join(format!("{site}/index.html"));
    let inner = homepage_block(registry, doc);
    let result = rebuild_file(&path, |html| replace_inner(html, BLOCK_START, BLOCK_END, &inner));
    report.record(path, result);

    report
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
