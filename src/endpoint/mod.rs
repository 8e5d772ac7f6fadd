//! Endpoint URL construction
//!
//! Builds fully-qualified request URLs for the Pimberly v2.2 API. This is
//! pure computation: no state, no I/O, identical inputs always yield an
//! identical URL.
//!
//! The original integration spliced raw `"?sinceId=..."` strings into URL
//! templates; here the cursor is an opaque [`Cursor`] value and every URL is
//! assembled through [`url::Url`] query builders.

use crate::error::{Error, Result};
use crate::types::{Environment, ResourceKind};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;
use url::Url;

/// Production products endpoint
pub const PRODUCTION_BASE: &str = "https://pimber.ly/api/v2.2/products";

/// Sandbox products endpoint
pub const SANDBOX_BASE: &str = "https://sandbox.pimber.ly/api/v2.2/products";

// ============================================================================
// Cursor
// ============================================================================

/// Opaque pagination cursor derived from a response's `maxId`.
///
/// Absent on the first page, present on every subsequent page. Embedded into
/// the next request URL as the `sinceId` query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from a raw `maxId` value
    pub fn new(max_id: impl Into<String>) -> Self {
        Self(max_id.into())
    }

    /// Build a cursor from the JSON `maxId` field (string or numeric)
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// The raw cursor value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Child identifier encoding
// ============================================================================

/// Percent-encode a child identifier for use as a URL path segment
pub fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

/// Decode a percent-encoded child identifier back to its original form
pub fn decode_id(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

// ============================================================================
// Endpoint Builder
// ============================================================================

/// Builds request URLs for the catalog and parent-lookup endpoints
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    production: Url,
    sandbox: Url,
}

impl Default for EndpointBuilder {
    fn default() -> Self {
        Self {
            production: Url::parse(PRODUCTION_BASE).expect("valid production base URL"),
            sandbox: Url::parse(SANDBOX_BASE).expect("valid sandbox base URL"),
        }
    }
}

impl EndpointBuilder {
    /// Create a builder targeting the real Pimberly hosts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom base URLs (used by tests against a mock
    /// server; both must include the full `/api/v2.2/products` path)
    pub fn with_base_urls(production: Url, sandbox: Url) -> Self {
        Self {
            production,
            sandbox,
        }
    }

    fn base(&self, env: Environment) -> &Url {
        match env {
            Environment::Production => &self.production,
            Environment::Sandbox => &self.sandbox,
        }
    }

    /// Build the catalog URL for one page of the Channel or Product endpoint.
    ///
    /// Rules, in priority order:
    /// 1. `Channel`: base URL for the environment, plus `sinceId` whenever a
    ///    cursor is present.
    /// 2. `Product`: base URL, `sinceId` after the first page, then always
    ///    `extendResponse=1&attributes=*`.
    /// 3. A non-empty `since_date` overrides both: the production host is
    ///    targeted regardless of `env` (a quirk inherited from the original
    ///    integration, kept deliberately) with a `dateUpdated` filter clause.
    ///
    /// Page numbers start at 1. A page past the first without a cursor is the
    /// one unsupported combination and yields an explicit error.
    pub fn products(
        &self,
        page: u32,
        cursor: Option<&Cursor>,
        resource: ResourceKind,
        env: Environment,
        since_date: Option<&str>,
    ) -> Result<Url> {
        if page == 0 {
            return Err(Error::unsupported_endpoint("page numbers start at 1"));
        }
        if page > 1 && cursor.is_none() {
            return Err(Error::unsupported_endpoint(format!(
                "page {page} requested without a pagination cursor"
            )));
        }

        let since_date = since_date.filter(|d| !d.is_empty());
        if let Some(date) = since_date {
            // Date filter always hits production, whatever `env` says
            let mut url = self.production.clone();
            {
                let mut query = url.query_pairs_mut();
                if page > 1 {
                    if let Some(cursor) = cursor {
                        query.append_pair("sinceId", cursor.as_str());
                    }
                }
                query.append_pair(
                    "filters",
                    &format!("{{\"dateUpdated\":{{\"$gte\":\"{date}T00:00:0.000Z\"}}}}"),
                );
            }
            return Ok(url);
        }

        let mut url = self.base(env).clone();
        match resource {
            ResourceKind::Channel => {
                if let Some(cursor) = cursor {
                    url.query_pairs_mut().append_pair("sinceId", cursor.as_str());
                }
            }
            ResourceKind::Product => {
                let mut query = url.query_pairs_mut();
                if page > 1 {
                    if let Some(cursor) = cursor {
                        query.append_pair("sinceId", cursor.as_str());
                    }
                }
                query
                    .append_pair("extendResponse", "1")
                    .append_pair("attributes", "*");
            }
        }
        Ok(url)
    }

    /// Build the parent-lookup URL for one child identifier.
    ///
    /// `encoded_child_id` must already be percent-encoded (see [`encode_id`]).
    /// `id_only` selects the lightweight identifiers-only response; otherwise
    /// full parent records are requested.
    pub fn parents(
        &self,
        encoded_child_id: &str,
        env: Environment,
        id_only: bool,
    ) -> Result<Url> {
        let base = self.base(env).as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{encoded_child_id}/parents"))?;
        if !id_only {
            url.query_pairs_mut()
                .append_pair("extendResponse", "1")
                .append_pair("attributes", "*");
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests;
