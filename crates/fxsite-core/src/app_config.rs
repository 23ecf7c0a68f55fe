use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by every generator job.
///
/// Relative paths in `reviews_exports_dir` and `reviews_output` are resolved
/// against `site_root` by [`AppConfig::site_path`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub site_root: PathBuf,
    pub brokers_path: PathBuf,
    pub feeds_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub freshness_days: i64,
    pub snapshot_limit: usize,
    pub snapshot_max_chars: usize,
    pub reviews_exports_dir: PathBuf,
    pub reviews_output: PathBuf,
}

impl AppConfig {
    /// Join a site-relative path onto `site_root`. Absolute paths pass through.
    #[must_use]
    pub fn site_path(&self, rel: impl AsRef<std::path::Path>) -> PathBuf {
        let rel = rel.as_ref();
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.site_root.join(rel)
        }
    }

    #[must_use]
    pub fn exports_dir(&self) -> PathBuf {
        self.site_path(&self.reviews_exports_dir)
    }

    #[must_use]
    pub fn normalized_reviews_path(&self) -> PathBuf {
        self.site_path(&self.reviews_output)
    }
}
