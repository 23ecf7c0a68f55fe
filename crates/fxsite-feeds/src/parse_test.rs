use chrono::TimeZone;

use super::*;

// -----------------------------------------------------------------------
// parse_feed_items
// -----------------------------------------------------------------------

const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>FX Desk</title>
    <link>https://fxdesk.example/</link>
    <item>
      <title><![CDATA[USD/MXN slips as Banxico holds]]></title>
      <link>https://fxdesk.example/news/usd-mxn</link>
      <pubDate>Tue, 10 Feb 2026 09:30:15 GMT</pubDate>
    </item>
    <item>
      <title>Broker&#8217;s &#8220;zero spread&#8221; claim &amp; the fine print&#8230;</title>
      <guid isPermaLink="true">https://fxdesk.example/news/zero-spread</guid>
      <dc:date>2026-02-09T18:00:00.250+01:00</dc:date>
    </item>
    <item>
      <title>No link here</title>
      <guid isPermaLink="false">a1b2c3</guid>
      <pubDate>Tue, 10 Feb 2026 09:30:15 GMT</pubDate>
    </item>
    <item>
      <title>Undated headline</title>
      <link>https://fxdesk.example/news/undated</link>
    </item>
  </channel>
</rss>"#;

#[test]
fn rss_items_with_all_fields_survive() {
    let items = parse_feed_items(RSS);
    assert_eq!(items.len(), 2, "got {items:?}");

    assert_eq!(items[0].title, "USD/MXN slips as Banxico holds");
    assert_eq!(items[0].link, "https://fxdesk.example/news/usd-mxn");
    assert_eq!(items[0].published_iso(), "2026-02-10T09:30:15Z");
}

#[test]
fn rss_guid_fallback_and_entity_decoding() {
    let items = parse_feed_items(RSS);
    assert_eq!(items[1].link, "https://fxdesk.example/news/zero-spread");
    assert_eq!(
        items[1].title,
        "Broker\u{2019}s \u{201C}zero spread\u{201D} claim & the fine print\u{2026}"
    );
    // 18:00:00.250+01:00 → 17:00:00Z, milliseconds dropped.
    assert_eq!(items[1].published_iso(), "2026-02-09T17:00:00Z");
}

#[test]
fn rdf_items_use_about_attribute_and_dc_date() {
    let rdf = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
      <item rdf:about="https://www.banxico.org.mx/SieInternet/fix?id=1">
        <title>Tipo de cambio FIX 17.2345</title>
        <dc:date>2026-02-10T12:00-06:00</dc:date>
      </item>
    </rdf:RDF>"#;
    let items = parse_feed_items(rdf);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link, "https://www.banxico.org.mx/SieInternet/fix?id=1");
    assert_eq!(items[0].published_iso(), "2026-02-10T18:00:00Z");
}

#[test]
fn atom_entries_prefer_alternate_link() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
      <title>Regulator notices</title>
      <entry>
        <title type="html">CNBV warns on unlicensed brokers</title>
        <link rel="self" href="https://reg.example/feed/entry/7"/>
        <link rel="alternate" type="text/html" href="https://reg.example/notices/7"/>
        <id>tag:reg.example,2026:7</id>
        <updated>2026-02-08T10:00:00Z</updated>
      </entry>
      <entry>
        <title>Id only</title>
        <id>https://reg.example/notices/8</id>
        <published>2026-02-07T10:00:00Z</published>
      </entry>
    </feed>"#;
    let items = parse_feed_items(atom);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].link, "https://reg.example/notices/7");
    assert_eq!(items[1].link, "https://reg.example/notices/8");
    assert_eq!(items[1].published_iso(), "2026-02-07T10:00:00Z");
}

#[test]
fn atom_tag_uri_id_is_not_a_link() {
    let atom = r"<feed><entry>
        <title>Only a tag id</title>
        <id>tag:reg.example,2026:9</id>
        <updated>2026-02-08T10:00:00Z</updated>
      </entry></feed>";
    assert!(parse_feed_items(atom).is_empty());
}

#[test]
fn malformed_document_keeps_complete_items() {
    let broken = r"<rss><channel>
      <item><title>Good & unescaped</title><link>https://a.example/1</link>
        <pubDate>Mon, 09 Feb 2026 08:00:00 +0000</pubDate></item>
      <item><title>Truncated";
    let items = parse_feed_items(broken);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Good & unescaped");
}

#[test]
fn relative_links_are_rejected() {
    let rss = r"<rss><channel><item>
        <title>Relative</title><link>/news/1</link>
        <pubDate>Mon, 09 Feb 2026 08:00:00 +0000</pubDate>
      </item></channel></rss>";
    assert!(parse_feed_items(rss).is_empty());
}

#[test]
fn empty_input_yields_nothing() {
    assert!(parse_feed_items("").is_empty());
    assert!(parse_feed_items("<html><body>not a feed</body></html>").is_empty());
}

// -----------------------------------------------------------------------
// safe_url
// -----------------------------------------------------------------------

#[test]
fn safe_url_normalizes_and_validates() {
    assert_eq!(
        safe_url("  https://Example.com ").as_deref(),
        Some("https://example.com/")
    );
    assert!(safe_url("ftp://example.com/file").is_none());
    assert!(safe_url("urn:uuid:1234").is_none());
    assert!(safe_url("").is_none());
}

// -----------------------------------------------------------------------
// parse_feed_date
// -----------------------------------------------------------------------

#[test]
fn parse_feed_date_formats() {
    let expected = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
    assert_eq!(parse_feed_date("Tue, 10 Feb 2026 09:00:00 GMT"), Some(expected));
    assert_eq!(parse_feed_date("Tue, 10 Feb 2026 04:00:00 -0500"), Some(expected));
    assert_eq!(parse_feed_date("2026-02-10T09:00:00Z"), Some(expected));
    assert_eq!(parse_feed_date("2026-02-10T09:00:00.999Z"), Some(expected));
    assert_eq!(parse_feed_date("2026-02-10 09:00:00"), Some(expected));
    assert_eq!(
        parse_feed_date("2026-02-10"),
        Some(Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap())
    );
}

#[test]
fn parse_feed_date_rejects_garbage() {
    assert!(parse_feed_date("").is_none());
    assert!(parse_feed_date("last tuesday").is_none());
    assert!(parse_feed_date("2026-13-45").is_none());
}
