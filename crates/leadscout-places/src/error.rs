use thiserror::Error;

/// Errors returned by a place-lookup provider.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    ///
    /// The request URL is stripped before wrapping because it carries the
    /// API key.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the provider.
    #[error("rate limited by places provider (endpoint {endpoint})")]
    RateLimited { endpoint: String },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The provider's daily or per-second quota is exhausted.
    #[error("places quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The provider answered with a non-OK envelope status
    /// (`REQUEST_DENIED`, `INVALID_REQUEST`, `UNKNOWN_ERROR`, ...).
    #[error("places API status {status}: {message}")]
    ApiStatus { status: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid places base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl PlacesError {
    /// Returns `true` for errors worth retrying after a back-off delay.
    ///
    /// **Retriable:** timeouts, connect failures, HTTP 5xx, HTTP 429, and the
    /// provider's `UNKNOWN_ERROR` status.
    ///
    /// **Not retriable:** quota exhaustion, denied/invalid requests,
    /// malformed bodies, and configuration errors.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            PlacesError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            PlacesError::RateLimited { .. } => true,
            PlacesError::UnexpectedStatus { status, .. } => *status >= 500,
            PlacesError::ApiStatus { status, .. } => status == "UNKNOWN_ERROR",
            PlacesError::QuotaExceeded(_)
            | PlacesError::Deserialize { .. }
            | PlacesError::InvalidBaseUrl { .. } => false,
        }
    }
}
