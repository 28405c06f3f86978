use crate::app_config::{AppConfig, ArchiveLayout, Environment, LogFormat};
use crate::ConfigError;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let search_api_key = require("NEWSETL_SEARCH_API_KEY")?;
    let s3_bucket = require("NEWSETL_S3_BUCKET")?;

    let env = parse_environment(&or_default("NEWSETL_ENV", "development"))?;
    let log_level = or_default("NEWSETL_LOG_LEVEL", "info");
    let log_format = match optional("NEWSETL_LOG_FORMAT") {
        Some(raw) => parse_log_format(&raw)?,
        None => env.default_log_format(),
    };

    let search_base_url = or_default("NEWSETL_SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL);
    let search_query = or_default("NEWSETL_SEARCH_QUERY", "Trump");
    let search_request_timeout_secs = parse_u64("NEWSETL_SEARCH_REQUEST_TIMEOUT_SECS", "30")?;
    let search_user_agent = or_default("NEWSETL_SEARCH_USER_AGENT", "newsetl/0.1 (article-archive)");
    let search_page_delay_ms = parse_u64("NEWSETL_SEARCH_PAGE_DELAY_MS", "6000")?;
    let search_max_pages = parse_u32("NEWSETL_SEARCH_MAX_PAGES", "100")?;
    if search_max_pages == 0 {
        return Err(invalid(
            "NEWSETL_SEARCH_MAX_PAGES",
            "must be at least 1".to_string(),
        ));
    }

    let raw_data_prefix = or_default("NEWSETL_RAW_DATA_PREFIX", "json-raw/");
    let cleaned_data_prefix = or_default("NEWSETL_CLEANED_DATA_PREFIX", "json-clean/");
    if raw_data_prefix == cleaned_data_prefix {
        return Err(invalid(
            "NEWSETL_CLEANED_DATA_PREFIX",
            "must differ from NEWSETL_RAW_DATA_PREFIX".to_string(),
        ));
    }
    let archive_layout = parse_archive_layout(&or_default("NEWSETL_ARCHIVE_LAYOUT", "daily"))?;

    let chart_data_bucket = optional("NEWSETL_CHART_DATA_BUCKET").unwrap_or_else(|| s3_bucket.clone());
    let chart_data_key = optional("NEWSETL_CHART_DATA_KEY");

    let s3_region = optional("NEWSETL_S3_REGION");
    let s3_endpoint = optional("NEWSETL_S3_ENDPOINT");

    let fetch_schedule = or_default("NEWSETL_FETCH_SCHEDULE", "0 0 6 * * *");

    Ok(AppConfig {
        env,
        log_level,
        log_format,
        search_api_key,
        search_base_url,
        search_query,
        search_request_timeout_secs,
        search_user_agent,
        search_page_delay_ms,
        search_max_pages,
        s3_bucket,
        s3_region,
        s3_endpoint,
        raw_data_prefix,
        cleaned_data_prefix,
        archive_layout,
        chart_data_bucket,
        chart_data_key,
        fetch_schedule,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Recognized values: `"development"`, `"test"`, `"production"`.
/// Any other value returns an error.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSETL_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat, ConfigError> {
    match s {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSETL_LOG_FORMAT".to_string(),
            reason: format!("expected \"json\" or \"pretty\", got \"{other}\""),
        }),
    }
}

fn parse_archive_layout(s: &str) -> Result<ArchiveLayout, ConfigError> {
    match s {
        "daily" => Ok(ArchiveLayout::Daily),
        "per-page" => Ok(ArchiveLayout::PerPage),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSETL_ARCHIVE_LAYOUT".to_string(),
            reason: format!("expected \"daily\" or \"per-page\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
