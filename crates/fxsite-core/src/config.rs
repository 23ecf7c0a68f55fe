use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("FXSITE_ENV", "development"))?;
    let log_level = or_default("FXSITE_LOG_LEVEL", "info");
    let site_root = PathBuf::from(or_default("FXSITE_SITE_ROOT", "."));
    let brokers_path = PathBuf::from(or_default("FXSITE_BROKERS_PATH", "./config/brokers.yaml"));
    let feeds_path = PathBuf::from(or_default("FXSITE_FEEDS_PATH", "./config/feeds.yaml"));

    let fetch_timeout_secs = parse_u64("FXSITE_FETCH_TIMEOUT_SECS", "12")?;
    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FXSITE_FETCH_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default(
        "FXSITE_USER_AGENT",
        "BrokerDailyBriefBot/1.0 (+https://example.invalid)",
    );

    let freshness_days = or_default("FXSITE_FRESHNESS_DAYS", "45")
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "FXSITE_FRESHNESS_DAYS".to_string(),
            reason: e.to_string(),
        })?;

    let snapshot_limit = parse_usize("FXSITE_SNAPSHOT_LIMIT", "4")?;
    let snapshot_max_chars = parse_usize("FXSITE_SNAPSHOT_MAX_CHARS", "180")?;

    let reviews_exports_dir = PathBuf::from(or_default(
        "FXSITE_REVIEWS_EXPORTS_DIR",
        "data/reviews/exports",
    ));
    let reviews_output = PathBuf::from(or_default(
        "FXSITE_REVIEWS_OUTPUT",
        "data/reviews/normalized.json",
    ));

    Ok(AppConfig {
        env,
        log_level,
        site_root,
        brokers_path,
        feeds_path,
        fetch_timeout_secs,
        user_agent,
        freshness_days: i64::from(freshness_days),
        snapshot_limit,
        snapshot_max_chars,
        reviews_exports_dir,
        reviews_output,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FXSITE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
