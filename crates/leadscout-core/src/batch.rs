use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One business query in a batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Free-text business query or maps URL.
    pub query: String,
    /// Optional category/location text used to gather the competitor cohort.
    pub cohort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchFile {
    pub queries: Vec<BatchEntry>,
}

/// Load and validate a batch of queries from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_batch(path: &Path, max_queries: usize) -> Result<BatchFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BatchFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_batch(&content, max_queries)
}

/// Parse and validate a batch of queries from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_batch(content: &str, max_queries: usize) -> Result<BatchFile, ConfigError> {
    let batch: BatchFile = serde_yaml::from_str(content).map_err(ConfigError::BatchFileParse)?;
    validate_batch(&batch, max_queries)?;
    Ok(batch)
}

fn validate_batch(batch: &BatchFile, max_queries: usize) -> Result<(), ConfigError> {
    if batch.queries.is_empty() {
        return Err(ConfigError::Validation(
            "batch must contain at least one query".to_string(),
        ));
    }

    if batch.queries.len() > max_queries {
        return Err(ConfigError::Validation(format!(
            "batch has {} queries; at most {max_queries} are allowed",
            batch.queries.len()
        )));
    }

    let mut seen = HashSet::new();
    for entry in &batch.queries {
        let trimmed = entry.query.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Validation(
                "query must be non-empty".to_string(),
            ));
        }
        if !seen.insert(trimmed.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate query: '{trimmed}'"
            )));
        }
    }

    Ok(())
}
