//! Shared configuration and domain primitives for the fxsite generators.

pub mod app_config;
pub mod brokers;
pub mod config;
pub mod feeds;
pub mod period;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brokers::{load_brokers, BrokerConfig, BrokerRegistry};
pub use config::{load_app_config, load_app_config_from_env};
pub use feeds::{load_feeds, FeedCatalogue};
pub use period::{DailyKey, WeekKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid period key \"{0}\"")]
    InvalidPeriodKey(String),
}
