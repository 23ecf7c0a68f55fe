use std::collections::BTreeMap;

use crate::types::BrokerAggregate;

use super::*;

fn broker(slug: &str, name: &str) -> BrokerConfig {
    BrokerConfig {
        slug: slug.to_string(),
        name: name.to_string(),
        logo_url: format!("https://cdn.example.com/{slug}.png"),
    }
}

fn registry() -> BrokerRegistry {
    BrokerRegistry::new(vec![broker("libertex", "Libertex"), broker("exness", "Exness")]).unwrap()
}

fn review(date: &str, text: &str, url: &str) -> NormalizedReview {
    NormalizedReview {
        broker_slug: "exness".to_string(),
        rating: 4,
        text: text.to_string(),
        date: date.to_string(),
        author_display: "Ana R.".to_string(),
        source_name: "Trustpilot".to_string(),
        source_url: url.to_string(),
        locale: "es".to_string(),
        country: "MX".to_string(),
    }
}

fn reviews(n: usize) -> BrokerReviews {
    let reviews: Vec<NormalizedReview> = (0..n)
        .map(|i| review(&format!("2026-01-{:02}", 20 - i), &format!("review {i}"), ""))
        .collect();
    BrokerReviews {
        name: "Exness".to_string(),
        aggregate: BrokerAggregate {
            rating_value: 4.3,
            review_count: n,
            best_rating: 5,
        },
        reviews,
    }
}

fn document(exness: BrokerReviews) -> NormalizedDocument {
    NormalizedDocument {
        generated_at: "2026-02-10T09:00:00Z".to_string(),
        brokers: BTreeMap::from([("exness".to_string(), exness)]),
    }
}

// -----------------------------------------------------------------------
// Markup
// -----------------------------------------------------------------------

#[test]
fn stars_round_and_clamp() {
    assert_eq!(stars(4.3), "★★★★☆");
    assert_eq!(stars(4.5), "★★★★★");
    assert_eq!(stars(0.2), "★☆☆☆☆");
}

#[test]
fn summary_shows_score_count_and_three_snippets() {
    let html = summary_block("exness", &reviews(4));
    assert!(html.contains(r#"data-licensed-reviews-summary="exness""#));
    assert!(html.contains(r#"<span class="rating-stars-gold">★★★★☆</span>"#));
    assert!(html.contains(r#"<span class="rating-score">4.3/5</span>"#));
    assert!(html.contains(r#"data-en="(4 reviews)" data-es="(4 reseñas)""#));
    assert_eq!(html.matches(r#"<div class="review-card">"#).count(), 3);
    assert!(!html.contains("review 3"));
}

#[test]
fn summary_without_reviews_shows_placeholder() {
    let html = summary_block("libertex", &BrokerReviews::default());
    assert!(html.contains(r#"<span class="rating-score">—</span>"#));
    assert!(html.contains("☆☆☆☆☆"));
    assert!(html.contains(">(0 reviews)<"));
    assert!(html.contains("No licensed reviews imported yet."));
}

#[test]
fn single_review_uses_singular_labels() {
    let html = summary_block("exness", &reviews(1));
    assert!(html.contains(r#"data-en="(1 review)" data-es="(1 reseña)""#));
}

#[test]
fn review_text_and_source_are_escaped() {
    let mut data = reviews(1);
    data.reviews[0] = review(
        "2026-01-05",
        r#"Spreads <tight> & "fast""#,
        "https://reviews.example/?a=1&b=2",
    );
    let html = summary_block("exness", &data);
    assert!(html.contains(r#"data-en="Spreads &lt;tight&gt; &amp; &quot;fast&quot;""#));
    assert!(html.contains(r#"href="https://reviews.example/?a=1&amp;b=2""#));
    assert!(html.contains(r#"rel="noopener noreferrer">Trustpilot</a> (licensed)"#));
}

#[test]
fn panel_hides_cards_after_the_second() {
    let html = broker_panel(&broker("exness", "Exness"), &reviews(7));
    assert_eq!(html.matches(r#"class="review-card""#).count(), 2);
    assert_eq!(html.matches(r#"class="review-card is-hidden""#).count(), 3);
    assert!(html.contains("data-review-toggle"));
    assert!(html.contains(r#"src="https://cdn.example.com/exness.png" alt="Exness logo""#));
}

#[test]
fn panel_with_two_reviews_has_no_toggle() {
    let html = broker_panel(&broker("exness", "Exness"), &reviews(2));
    assert!(!html.contains("data-review-toggle"));
    assert!(!html.contains("is-hidden"));
}

#[test]
fn homepage_block_lists_brokers_in_registry_order() {
    let block = homepage_block(&registry(), &document(reviews(1)));
    let libertex = block.find(r#"data-licensed-reviews-broker="libertex""#).unwrap();
    let exness = block.find(r#"data-licensed-reviews-broker="exness""#).unwrap();
    assert!(libertex < exness);
    assert!(block.starts_with("\n                    <h3 class=\"section-subheading\""));
}

// -----------------------------------------------------------------------
// rebuild_pages
// -----------------------------------------------------------------------

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn broker_page() -> String {
    format!("<html><main>\n                {SUMMARY_START}\n                <p>old</p>\n                {SUMMARY_END}\n</main></html>\n")
}

#[test]
fn rebuild_rewrites_regions_and_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "site1-dark-gradient/brokers/libertex.html", &broker_page());
    write(root, "site1-dark-gradient/brokers/exness.html", &broker_page());
    write(
        root,
        "site1-dark-gradient/index.html",
        &format!("<body>{BLOCK_START}<p>stale</p>{BLOCK_END}</body>"),
    );

    let doc = document(reviews(3));
    let report = rebuild_pages(root, &registry(), &doc);
    assert!(report.is_success());
    assert_eq!(report.updated.len(), 3);

    let exness = std::fs::read_to_string(root.join("site1-dark-gradient/brokers/exness.html")).unwrap();
    assert!(exness.starts_with("<html><main>\n                <!-- LICENSED"));
    assert!(exness.ends_with(&format!("{SUMMARY_END}\n</main></html>\n")));
    assert!(exness.contains("4.3/5"));
    assert!(!exness.contains("<p>old</p>"));

    let index = std::fs::read_to_string(root.join("site1-dark-gradient/index.html")).unwrap();
    assert!(!index.contains("stale"));
    assert!(index.starts_with(&format!("<body>{BLOCK_START}\n")));

    let again = rebuild_pages(root, &registry(), &doc);
    assert!(again.updated.is_empty());
    assert_eq!(again.unchanged.len(), 3);
}

#[test]
fn rebuild_continues_past_failed_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "site1-dark-gradient/brokers/libertex.html", "<html>no markers</html>");
    write(root, "site1-dark-gradient/brokers/exness.html", &broker_page());

    let report = rebuild_pages(root, &registry(), &document(reviews(1)));
    assert!(!report.is_success());
    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.failures.len(), 2);
    assert!(matches!(
        report.failures[0].1,
        ReviewsError::Render(RenderError::MarkersNotFound { .. })
    ));
    assert!(matches!(report.failures[1].1, ReviewsError::Io { .. }));
    assert_eq!(
        std::fs::read_to_string(root.join("site1-dark-gradient/brokers/libertex.html")).unwrap(),
        "<html>no markers</html>"
    );
}
