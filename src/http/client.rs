//! Authenticated page fetching
//!
//! Wraps `reqwest` with the bearer token, a request timeout (the original
//! integration had none, which left a hung connection hanging forever), and
//! outcome classification:
//! - 200 with a well-formed body is a page of records
//! - 404 is the catalog's end-of-collection signal
//! - any other status is a transient error for the caller's retry policy

use crate::endpoint::Cursor;
use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Bearer token, forwarded verbatim in the `Authorization` header
    pub token: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("pimberly-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config builder
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }
}

/// Builder for API client config
#[derive(Default)]
pub struct ApiClientConfigBuilder {
    config: ApiClientConfig,
}

impl ApiClientConfigBuilder {
    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = token.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ApiClientConfig {
        self.config
    }
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// Classified result of fetching one page
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// 200 with records and, while more pages remain, the next cursor
    Success {
        /// Raw records from the page's `data` array
        records: Vec<Value>,
        /// Cursor derived from `maxId`, absent when the response carries none
        next_cursor: Option<Cursor>,
    },
    /// 404: no more pages in the collection
    EndOfCollection,
    /// Any other status; the caller's retry policy decides what happens next
    TransientError {
        /// The HTTP status code received
        status: u16,
    },
}

impl FetchOutcome {
    /// Check if this is a successful page
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Check if this is the end-of-collection signal
    pub fn is_end_of_collection(&self) -> bool {
        matches!(self, Self::EndOfCollection)
    }

    /// Check if this is a transient error
    pub fn is_transient_error(&self) -> bool {
        matches!(self, Self::TransientError { .. })
    }
}

// ============================================================================
// API Client
// ============================================================================

/// HTTP client for the Pimberly API
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a client with the given bearer token and default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config(ApiClientConfig {
            token: token.into(),
            ..ApiClientConfig::default()
        })
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ApiClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Fetch one page and classify the outcome.
    ///
    /// Exactly one outbound request per call. A 200 response whose body is
    /// not JSON, or is missing the `data` array, is a fatal
    /// [`Error::MalformedResponse`] rather than something to retry.
    pub async fn fetch_page(&self, url: &Url) -> Result<FetchOutcome> {
        let response = self
            .client
            .get(url.clone())
            .header("Authorization", &self.config.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("404 from {url}: end of collection");
            return Ok(FetchOutcome::EndOfCollection);
        }
        if status != StatusCode::OK {
            debug!("{} from {url}", status.as_u16());
            return Ok(FetchOutcome::TransientError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("response body is not JSON: {e}")))?;

        let records = envelope
            .get("data")
            .ok_or_else(|| Error::malformed("response is missing the 'data' field"))?
            .as_array()
            .ok_or_else(|| Error::malformed("'data' is not an array"))?
            .clone();

        let next_cursor = envelope.get("maxId").and_then(Cursor::from_value);

        Ok(FetchOutcome::Success {
            records,
            next_cursor,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("timeout", &self.config.timeout)
            .field("user_agent", &self.config.user_agent)
            .finish_non_exhaustive()
    }
}
