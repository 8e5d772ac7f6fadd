//! HTTP transport for the Pimberly API
//!
//! One authenticated GET per call, outcome classified for the harvesting
//! loops. Retries are deliberately not handled here; they belong to the
//! caller's retry policy.

mod client;

pub use client::{ApiClient, ApiClientConfig, ApiClientConfigBuilder, FetchOutcome};
