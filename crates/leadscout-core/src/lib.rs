pub mod app_config;
pub mod batch;
pub mod business;
pub mod config;

pub use app_config::{AppConfig, Environment};
pub use batch::{load_batch, parse_batch, BatchEntry, BatchFile};
pub use business::{
    CandidateRecord, CompetitorRecord, GeoPoint, Lead, ResolvedBusiness, Tier, Urgency,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read batch file {path}: {source}")]
    BatchFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse batch file: {0}")]
    BatchFileParse(#[from] serde_yaml::Error),

    #[error("batch validation failed: {0}")]
    Validation(String),
}
