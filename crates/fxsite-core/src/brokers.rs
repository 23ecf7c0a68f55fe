use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One broker that review exports may reference and that owns a static page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub slug: String,
    pub name: String,
    pub logo_url: String,
}

#[derive(Debug, Deserialize)]
struct BrokersFile {
    brokers: Vec<BrokerConfig>,
}

/// The fixed set of known brokers, in display order.
#[derive(Debug, Clone, Default)]
pub struct BrokerRegistry {
    brokers: Vec<BrokerConfig>,
}

impl BrokerRegistry {
    /// Build a registry from an already-validated broker list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on empty, malformed, or duplicate slugs.
    pub fn new(brokers: Vec<BrokerConfig>) -> Result<Self, ConfigError> {
        validate_brokers(&brokers)?;
        Ok(Self { brokers })
    }

    #[must_use]
    pub fn brokers(&self) -> &[BrokerConfig] {
        &self.brokers
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&BrokerConfig> {
        self.brokers.iter().find(|b| b.slug == slug)
    }

    #[must_use]
    pub fn is_known(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }
}

/// Load and validate the broker registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brokers(path: &Path) -> Result<BrokerRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: BrokersFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    BrokerRegistry::new(file.brokers)
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_brokers(brokers: &[BrokerConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for broker in brokers {
        if broker.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "broker '{}' must have a non-empty name",
                broker.slug
            )));
        }

        if !is_valid_slug(&broker.slug) {
            return Err(ConfigError::Validation(format!(
                "broker '{}' has invalid slug '{}'; use lowercase letters, digits and '-'",
                broker.name, broker.slug
            )));
        }

        if !seen.insert(broker.slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate broker slug: '{}'",
                broker.slug
            )));
        }
    }

    Ok(())
}
