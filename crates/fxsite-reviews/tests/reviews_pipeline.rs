//! Exports on disk through to rebuilt pages.

use std::path::Path;

use chrono::{TimeZone, Utc};
use fxsite_core::{BrokerConfig, BrokerRegistry};
use fxsite_reviews::{normalize_exports, read_document, read_exports, rebuild_pages, write_document};

fn registry() -> BrokerRegistry {
    let broker = |slug: &str, name: &str| BrokerConfig {
        slug: slug.to_string(),
        name: name.to_string(),
        logo_url: format!("https://cdn.example.com/{slug}.png"),
    };
    BrokerRegistry::new(vec![
        broker("libertex", "Libertex"),
        broker("xm-group", "XM Group"),
        broker("exness", "Exness"),
        broker("pepperstone", "Pepperstone"),
    ])
    .unwrap()
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn csv_and_json_exports_feed_the_broker_pages() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "data/reviews/exports/partner.csv",
        "broker,rating,text,date,author\n\
         exness,5,\"Fast withdrawals, no fuss\",2026-02-01,Maria Lopez\n\
         exness,six,Unrated,2026-02-02,Someone\n\
         bucketshop,5,Unknown broker,2026-02-03,Nobody\n",
    );
    write(
        root,
        "data/reviews/exports/trustpilot.json",
        r#"[
            {"brokerSlug": "exness", "stars": 3, "body": "Okay app", "createdAt": "2026-01-20T12:00:00Z", "reviewer": "juan"},
            {"brokerSlug": "pepperstone", "score": "4.6", "comment": "Tight spreads", "publishedAt": "2026-01-11", "url": "https://reviews.example/p/1"}
        ]"#,
    );

    let files = read_exports(&root.join("data/reviews/exports")).unwrap();
    assert_eq!(files.len(), 2);

    let now = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
    let doc = normalize_exports(&files, &registry(), now);
    let out = root.join("data/reviews/normalized.json");
    write_document(&out, &doc).unwrap();
    let doc = read_document(&out).unwrap();

    let exness = &doc.brokers["exness"];
    assert_eq!(exness.aggregate.review_count, 2);
    assert!((exness.aggregate.rating_value - 4.0).abs() < f64::EPSILON);
    assert_eq!(exness.reviews[0].author_display, "Maria L.");
    assert_eq!(exness.reviews[0].source_name, "partner");
    assert_eq!(exness.reviews[1].author_display, "Juan");

    let pepperstone = &doc.brokers["pepperstone"];
    assert_eq!(pepperstone.reviews[0].rating, 5);
    assert_eq!(pepperstone.reviews[0].source_name, "trustpilot");
    assert!(doc.brokers["libertex"].reviews.is_empty());

    let page = "<main>\n<!-- LICENSED_USER_REVIEWS_SUMMARY_START --><!-- LICENSED_USER_REVIEWS_SUMMARY_END -->\n</main>\n";
    for slug in ["libertex", "xm-group", "exness", "pepperstone"] {
        write(root, &format!("site1-dark-gradient/brokers/{slug}.html"), page);
    }
    write(
        root,
        "site1-dark-gradient/index.html",
        "<!-- LICENSED_REVIEWS_BLOCK_START --><!-- LICENSED_REVIEWS_BLOCK_END -->",
    );

    let report = rebuild_pages(root, &registry(), &doc);
    assert!(report.is_success());
    assert_eq!(report.updated.len(), 5);

    let exness_page =
        std::fs::read_to_string(root.join("site1-dark-gradient/brokers/exness.html")).unwrap();
    assert!(exness_page.contains("4/5"));
    assert!(exness_page.contains("Fast withdrawals, no fuss"));
    assert!(!exness_page.contains("Unrated"));

    let pepperstone_page =
        std::fs::read_to_string(root.join("site1-dark-gradient/brokers/pepperstone.html"))
            .unwrap();
    assert!(pepperstone_page.contains(r#"href="https://reviews.example/p/1""#));
}
