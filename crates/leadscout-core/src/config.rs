use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        u32::try_from(parse(var, default)?).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Sizes and concurrency limits: zero would mean no work can happen.
    let parse_count = |var: &str, default: &str| -> Result<usize, ConfigError> {
        match usize::try_from(parse(var, default)?) {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(value) => Ok(value),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let places_api_key = require("LEADSCOUT_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("LEADSCOUT_ENV", "development"))?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");
    let places_base_url = or_default("LEADSCOUT_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);

    let request_timeout_secs = parse("LEADSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LEADSCOUT_USER_AGENT", "leadscout/0.1 (lead-research)");
    let max_retries = parse_u32("LEADSCOUT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse("LEADSCOUT_RETRY_BACKOFF_BASE_MS", "500")?;

    let cohort_size = parse_count("LEADSCOUT_COHORT_SIZE", "10")?;
    let nearby_radius_meters = parse_u32("LEADSCOUT_NEARBY_RADIUS_METERS", "8000")?;
    let max_batch_queries = parse_count("LEADSCOUT_MAX_BATCH_QUERIES", "10")?;
    let max_concurrent_queries = parse_count("LEADSCOUT_MAX_CONCURRENT_QUERIES", "1")?;

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        cohort_size,
        nearby_radius_meters,
        max_batch_queries,
        max_concurrent_queries,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
