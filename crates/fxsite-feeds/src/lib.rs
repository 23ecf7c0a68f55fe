//! Feed ingestion for the fxsite generators.
//!
//! Fetches RSS 2.0, RDF and Atom documents one URL at a time, extracts items
//! with tolerant pattern matching, filters them by topic and region, merges and
//! ranks them by recency, and optionally enriches the top few with a one-line
//! snapshot taken from the linked page's meta description.

pub mod client;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod merge;
pub mod parse;
pub mod sources;
pub mod text;
pub mod types;

pub use client::FeedClient;
pub use enrich::{enrich_items, extract_meta_description};
pub use error::FeedError;
pub use filter::{is_fresh, LatamMatcher, Topic};
pub use merge::{dedupe_by_link, merge_keep_recent, rank_recent, region_first, region_focused};
pub use parse::parse_feed_items;
pub use sources::collect_feed_items;
pub use types::{EnrichedItem, FeedItem};
