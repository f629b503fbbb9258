//! MBTA V3 API HTTP client.
//!
//! Handles authentication, rate-limit backoff, and parsing into source
//! records. The MBTA API answers anonymous requests at a low rate limit,
//! so the API key is optional; when present it is sent in the `x-api-key`
//! header on every request.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{RouteId, RouteType};
use crate::network::source::{
    FetchStage, FormatError, RouteRecord, RouteSource, SourceError, StopRecord, TransportError,
};

use super::convert;
use super::types::{Document, RouteResource, StopResource};

/// Default base URL for the MBTA V3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How many times a rate-limited request is retried before giving up.
const DEFAULT_MAX_RETRIES: u32 = 5;

/// Wait before the first retry; doubles on each further retry.
const BASE_BACKOFF: Duration = Duration::from_secs(2);

/// Ceiling on a single backoff sleep. MBTA rate-limit windows reset
/// every minute, so sleeping longer than this buys nothing.
const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key; `None` uses the anonymous rate limit.
    pub api_key: Option<String>,
    /// Base URL for the API (override for testing).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry budget for rate-limited requests.
    pub max_retries: u32,
}

impl MbtaConfig {
    /// Create a config with defaults and no API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the rate-limit retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MBTA V3 API client.
///
/// Implements [`RouteSource`] over `GET /routes` and `GET /stops`.
/// Requests that come back 429 are retried with exponential backoff
/// (honouring a numeric `Retry-After` header) up to the configured
/// budget; all other failures surface immediately.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl MbtaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| TransportError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert("x-api-key", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_retries: config.max_retries,
        })
    }

    /// GET a JSON:API document, retrying through rate limits.
    async fn get<T: DeserializeOwned>(
        &self,
        stage: FetchStage,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt: u32 = 0;

        loop {
            debug!(%url, attempt, "request");
            let response = self
                .http
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|e| SourceError::transport(stage, e))?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                attempt += 1;
                if attempt > self.max_retries {
                    return Err(SourceError::transport(
                        stage,
                        TransportError::RateLimited { attempts: attempt },
                    ));
                }
                let delay = backoff_delay(attempt, retry_after(&response));
                warn!(%url, attempt, delay_secs = delay.as_secs(), "rate limited, backing off");
                tokio::time::sleep(delay).await;
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(SourceError::transport(
                    stage,
                    TransportError::Api {
                        status: status.as_u16(),
                        message,
                    },
                ));
            }

            let body = response
                .text()
                .await
                .map_err(|e| SourceError::transport(stage, e))?;

            return serde_json::from_str(&body).map_err(|e| {
                SourceError::format(
                    stage,
                    FormatError::Json {
                        message: e.to_string(),
                    },
                )
            });
        }
    }
}

impl RouteSource for MbtaClient {
    async fn fetch_routes(&self, types: &[RouteType]) -> Result<Vec<RouteRecord>, SourceError> {
        // Filter server-side: one request returns exactly the matching
        // routes, instead of downloading the full listing and filtering
        // locally. An empty filter omits the parameter, which the API
        // treats as "all routes".
        let mut query = Vec::new();
        if !types.is_empty() {
            let codes = types
                .iter()
                .map(|t| t.code().to_string())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("filter[type]", codes));
        }

        let document: Document<RouteResource> =
            self.get(FetchStage::Routes, "/routes", &query).await?;

        document
            .data
            .into_iter()
            .map(|resource| {
                convert::route_record(resource)
                    .map_err(|e| SourceError::format(FetchStage::Routes, e))
            })
            .collect()
    }

    async fn fetch_stops(&self, route: &RouteId) -> Result<Vec<StopRecord>, SourceError> {
        let query = vec![("filter[route]", route.as_str().to_string())];

        let document: Document<StopResource> =
            self.get(FetchStage::Stops, "/stops", &query).await?;

        document
            .data
            .into_iter()
            .map(|resource| {
                convert::stop_record(resource).map_err(|e| SourceError::format(FetchStage::Stops, e))
            })
            .collect()
    }
}

/// Pull a numeric `Retry-After` value out of a 429 response.
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Sleep length before retry `attempt` (1-based): the server's
/// `Retry-After` when it sent one, else exponential doubling from
/// [`BASE_BACKOFF`]. Either way capped at [`MAX_BACKOFF`].
fn backoff_delay(attempt: u32, retry_after: Option<Duration>) -> Duration {
    let delay = match retry_after {
        Some(requested) => requested,
        None => BASE_BACKOFF.saturating_mul(1u32 << (attempt - 1).min(16)),
    };
    delay.min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = MbtaConfig::new();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn config_builder() {
        let config = MbtaConfig::new()
            .with_api_key("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60)
            .with_max_retries(2);

        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn client_creation() {
        assert!(MbtaClient::new(MbtaConfig::new()).is_ok());
        assert!(MbtaClient::new(MbtaConfig::new().with_api_key("key")).is_ok());
    }

    #[test]
    fn client_rejects_malformed_api_key() {
        let result = MbtaClient::new(MbtaConfig::new().with_api_key("bad\nkey"));
        assert!(result.is_err());
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_delay(1, None), Duration::from_secs(2));
        assert_eq!(backoff_delay(2, None), Duration::from_secs(4));
        assert_eq!(backoff_delay(3, None), Duration::from_secs(8));
        assert_eq!(backoff_delay(5, None), Duration::from_secs(32));
    }

    #[test]
    fn backoff_is_capped() {
        assert_eq!(backoff_delay(10, None), MAX_BACKOFF);
        assert_eq!(backoff_delay(u32::MAX, None), MAX_BACKOFF);
    }

    #[test]
    fn retry_after_header_wins_when_present() {
        assert_eq!(
            backoff_delay(1, Some(Duration::from_secs(17))),
            Duration::from_secs(17)
        );
        // Still subject to the cap.
        assert_eq!(
            backoff_delay(1, Some(Duration::from_secs(600))),
            MAX_BACKOFF
        );
    }

    // Exercising the retry loop end-to-end needs a live endpoint that
    // returns 429s on demand; the policy itself is covered above and the
    // error propagation is covered by the repository tests against a
    // scripted source.
}
