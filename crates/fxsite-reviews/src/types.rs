use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Best possible rating on the five-star scale.
pub const BEST_RATING: u8 = 5;

/// One review that survived normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    pub broker_slug: String,
    /// Whole stars, 1 to 5.
    pub rating: u8,
    pub text: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub author_display: String,
    pub source_name: String,
    /// Empty when the export carried no link.
    #[serde(default)]
    pub source_url: String,
    pub locale: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerAggregate {
    /// Mean rating rounded to one decimal; `0` when there are no reviews.
    pub rating_value: f64,
    pub review_count: usize,
    pub best_rating: u8,
}

impl Default for BrokerAggregate {
    fn default() -> Self {
        Self {
            rating_value: 0.0,
            review_count: 0,
            best_rating: BEST_RATING,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrokerReviews {
    pub name: String,
    #[serde(default)]
    pub aggregate: BrokerAggregate,
    /// Newest first.
    #[serde(default)]
    pub reviews: Vec<NormalizedReview>,
}

/// Contents of `normalized.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDocument {
    /// RFC 3339 UTC, whole seconds.
    pub generated_at: String,
    /// Keyed by broker slug.
    #[serde(default)]
    pub brokers: BTreeMap<String, BrokerReviews>,
}
