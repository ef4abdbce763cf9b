//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with envelope-status checking, API key handling, and
//! retry on transient failures. The request URL carries the API key, so it is
//! stripped from every surfaced error.

use std::time::Duration;

use async_trait::async_trait;
use leadscout_core::{AppConfig, CandidateRecord, GeoPoint};
use reqwest::{Client, StatusCode, Url};

use crate::error::PlacesError;
use crate::lookup::PlaceLookup;
use crate::retry::retry_with_backoff;
use crate::types::{ApiPlace, PlacesEnvelope};

const PLACE_FIELDS: &str = "place_id,name,formatted_address,rating,user_ratings_total,geometry,types";

/// Google Places client implementing [`PlaceLookup`].
///
/// Use [`GooglePlacesClient::from_config`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GooglePlacesClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built, or
    /// [`PlacesError::InvalidBaseUrl`] if the configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        Self::with_base_url(
            &config.places_api_key,
            &config.places_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built, or
    /// [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends the endpoint instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    async fn request(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<PlacesEnvelope, PlacesError> {
        let url = self.build_url(endpoint, params)?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| PlacesError::Http(e.without_url()))?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    return Err(PlacesError::RateLimited {
                        endpoint: endpoint.to_owned(),
                    });
                }

                if !status.is_success() {
                    return Err(PlacesError::UnexpectedStatus {
                        status: status.as_u16(),
                        endpoint: endpoint.to_owned(),
                    });
                }

                let body = response
                    .text()
                    .await
                    .map_err(|e| PlacesError::Http(e.without_url()))?;
                let envelope = serde_json::from_str::<PlacesEnvelope>(&body).map_err(|e| {
                    PlacesError::Deserialize {
                        context: format!("{endpoint} response"),
                        source: e,
                    }
                })?;

                Self::check_status(envelope)
            }
        })
        .await
    }

    /// Surfaces non-OK envelope statuses as typed errors.
    ///
    /// `ZERO_RESULTS` and `NOT_FOUND` are normal outcomes, not errors.
    fn check_status(envelope: PlacesEnvelope) -> Result<PlacesEnvelope, PlacesError> {
        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" | "NOT_FOUND" => Ok(envelope),
            "OVER_QUERY_LIMIT" => Err(PlacesError::QuotaExceeded(
                envelope
                    .error_message
                    .unwrap_or_else(|| "over query limit".to_owned()),
            )),
            other => Err(PlacesError::ApiStatus {
                status: other.to_owned(),
                message: envelope.error_message.unwrap_or_default(),
            }),
        }
    }

    fn into_candidates(places: Vec<ApiPlace>) -> Vec<CandidateRecord> {
        places
            .into_iter()
            .filter_map(ApiPlace::into_candidate)
            .collect()
    }
}

#[async_trait]
impl PlaceLookup for GooglePlacesClient {
    async fn search_by_text(&self, text: &str) -> Result<Vec<CandidateRecord>, PlacesError> {
        let envelope = self
            .request(
                "findplacefromtext/json",
                &[
                    ("input", text),
                    ("inputtype", "textquery"),
                    ("fields", PLACE_FIELDS),
                ],
            )
            .await?;
        let candidates = Self::into_candidates(envelope.candidates);
        tracing::debug!(text, count = candidates.len(), "find-place search complete");
        Ok(candidates)
    }

    async fn search_broad(&self, text: &str) -> Result<Vec<CandidateRecord>, PlacesError> {
        let envelope = self
            .request("textsearch/json", &[("query", text)])
            .await?;
        let candidates = Self::into_candidates(envelope.results);
        tracing::debug!(text, count = candidates.len(), "text search complete");
        Ok(candidates)
    }

    async fn get_details(&self, identifier: &str) -> Result<Option<CandidateRecord>, PlacesError> {
        // Numeric identifiers are maps customer ids (`cid`), not place ids.
        let id_param = if !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit())
        {
            "cid"
        } else {
            "place_id"
        };
        let envelope = self
            .request(
                "details/json",
                &[(id_param, identifier), ("fields", PLACE_FIELDS)],
            )
            .await?;
        Ok(envelope.result.and_then(ApiPlace::into_candidate))
    }

    async fn search_nearby(
        &self,
        center: GeoPoint,
        category_hint: &str,
        radius_meters: u32,
    ) -> Result<Vec<CandidateRecord>, PlacesError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();
        let mut params = vec![("location", location.as_str()), ("radius", radius.as_str())];
        if !category_hint.trim().is_empty() {
            params.push(("keyword", category_hint));
        }
        let envelope = self.request("nearbysearch/json", &params).await?;
        let candidates = Self::into_candidates(envelope.results);
        tracing::debug!(
            category_hint,
            radius_meters,
            count = candidates.len(),
            "nearby search complete"
        );
        Ok(candidates)
    }
}
