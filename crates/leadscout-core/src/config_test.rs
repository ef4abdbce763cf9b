use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("LEADSCOUT_PLACES_API_KEY", "test-key");
    m
}

#[test]
fn parse_environment_known_values() {
    for (raw, expected) in [
        ("development", Environment::Development),
        ("test", Environment::Test),
        ("production", Environment::Production),
    ] {
        assert_eq!(parse_environment(raw).unwrap(), expected, "{raw}");
    }
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LEADSCOUT_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LEADSCOUT_PLACES_API_KEY"),
        "expected MissingEnvVar(LEADSCOUT_PLACES_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("LEADSCOUT_PLACES_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.places_api_key, "test-key");
    assert_eq!(cfg.places_base_url, "https://maps.googleapis.com/maps/api/place");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "leadscout/0.1 (lead-research)");
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 500);
    assert_eq!(cfg.cohort_size, 10);
    assert_eq!(cfg.nearby_radius_meters, 8000);
    assert_eq!(cfg.max_batch_queries, 10);
    assert_eq!(cfg.max_concurrent_queries, 1);
}

#[test]
fn build_app_config_overrides_cohort_size() {
    let mut map = full_env();
    map.insert("LEADSCOUT_COHORT_SIZE", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cohort_size, 5);
}

#[test]
fn build_app_config_rejects_zero_cohort_size() {
    let mut map = full_env();
    map.insert("LEADSCOUT_COHORT_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_COHORT_SIZE"),
        "expected InvalidEnvVar(LEADSCOUT_COHORT_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = full_env();
    map.insert("LEADSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEADSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_concurrency() {
    let mut map = full_env();
    map.insert("LEADSCOUT_MAX_CONCURRENT_QUERIES", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_queries, 4);
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn build_app_config_rejects_radius_beyond_u32() {
    let mut map = full_env();
    map.insert("LEADSCOUT_NEARBY_RADIUS_METERS", "99999999999");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_NEARBY_RADIUS_METERS"
    ));
}

#[test]
fn build_app_config_rejects_zero_limits() {
    for var in ["LEADSCOUT_MAX_BATCH_QUERIES", "LEADSCOUT_MAX_CONCURRENT_QUERIES"] {
        let mut map = full_env();
        map.insert(var, "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { var: ref v, .. }) if v == var),
            "{var}: {result:?}"
        );
    }
}
