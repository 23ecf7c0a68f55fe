//! Licensed broker reviews: export normalization and site1 page rebuilds.

pub mod error;
pub mod exports;
pub mod normalize;
pub mod pages;
pub mod types;

pub use error::ReviewsError;
pub use exports::{read_exports, ExportFile, RawRecord};
pub use normalize::{
    aggregate, anonymize_author, normalize_date, normalize_exports, normalize_record,
    parse_rating, read_document, write_document,
};
pub use pages::{broker_panel, homepage_block, rebuild_pages, summary_block, RebuildReport};
pub use types::{BrokerAggregate, BrokerReviews, NormalizedDocument, NormalizedReview};
