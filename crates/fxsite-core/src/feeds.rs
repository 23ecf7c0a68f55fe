//! Feed source catalogue: which RSS/Atom URLs each job reads.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Feed URLs for the headline job, one list per site skin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadlineFeeds {
    #[serde(default)]
    pub site1: Vec<String>,
    #[serde(default)]
    pub site2: Vec<String>,
}

impl HeadlineFeeds {
    /// Sources for one site by its short id; unknown ids have none.
    #[must_use]
    pub fn for_site(&self, site_id: &str) -> &[String] {
        match site_id {
            "site1" => &self.site1,
            "site2" => &self.site2,
            _ => &[],
        }
    }
}

/// Feed URLs for the daily brief, one list per topic section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyFeeds {
    #[serde(default)]
    pub brokers: Vec<String>,
    #[serde(default)]
    pub forex: Vec<String>,
    #[serde(default)]
    pub crypto: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedCatalogue {
    #[serde(default)]
    pub headlines: HeadlineFeeds,
    #[serde(default)]
    pub daily: DailyFeeds,
}

impl FeedCatalogue {
    fn all_urls(&self) -> impl Iterator<Item = &String> {
        self.headlines
            .site1
            .iter()
            .chain(&self.headlines.site2)
            .chain(&self.daily.brokers)
            .chain(&self.daily.forex)
            .chain(&self.daily.crypto)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for url in self.all_urls() {
            let trimmed = url.trim();
            let has_scheme = trimmed.starts_with("https://") || trimmed.starts_with("http://");
            if !has_scheme || trimmed.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "feed URL '{url}' must be an absolute http(s) URL"
                )));
            }
        }
        Ok(())
    }
}

/// Load and validate the feed catalogue from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains a
/// non-http(s) URL.
pub fn load_feeds(path: &Path) -> Result<FeedCatalogue, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalogue: FeedCatalogue =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    catalogue.validate()?;
    Ok(catalogue)
}
