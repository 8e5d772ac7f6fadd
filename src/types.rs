//! Common types used throughout pimberly-harvest
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Environment
// ============================================================================

/// Which Pimberly host to target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Environment {
    /// Live catalog at pimber.ly
    #[default]
    Production,
    /// Staging catalog at sandbox.pimber.ly
    Sandbox,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "Production"),
            Self::Sandbox => write!(f, "Sandbox"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Production" => Ok(Self::Production),
            "Sandbox" => Ok(Self::Sandbox),
            other => Err(crate::error::Error::InvalidConfigValue {
                field: "env".to_string(),
                message: format!("expected 'Production' or 'Sandbox', got '{other}'"),
            }),
        }
    }
}

// ============================================================================
// Resource Kind
// ============================================================================

/// Which catalog API to paginate
///
/// `Channel` is the bulk export endpoint for a configured channel;
/// `Product` is the per-item endpoint returning full attribute sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Channel export endpoint
    Channel,
    /// Product endpoint with `extendResponse=1&attributes=*`
    #[default]
    Product,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Channel => write!(f, "Channel"),
            Self::Product => write!(f, "Product"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Channel" => Ok(Self::Channel),
            "Product" => Ok(Self::Product),
            other => Err(crate::error::Error::InvalidConfigValue {
                field: "api".to_string(),
                message: format!("expected 'Channel' or 'Product', got '{other}'"),
            }),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    #[default]
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    Exponential,
}

// ============================================================================
// Retry Policy
// ============================================================================

/// Retry policy applied by the harvesting loops on non-200/404 responses.
///
/// The default is [`RetryPolicy::legacy`]: unbounded immediate retries,
/// matching the behavior of the original harvesting scripts. Production
/// callers should prefer [`RetryPolicy::bounded`] so a persistent outage
/// surfaces as [`crate::Error::RetriesExhausted`] instead of looping forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per page/item (`None` = unbounded)
    pub max_attempts: Option<u32>,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::legacy()
    }
}

impl RetryPolicy {
    /// Unbounded immediate retries, no backoff
    pub fn legacy() -> Self {
        Self {
            max_attempts: None,
            backoff_type: BackoffType::Constant,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Bounded retries with exponential backoff capped at one minute
    pub fn bounded(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            backoff_type: BackoffType::Exponential,
            initial_backoff,
            max_backoff: Duration::from_secs(60),
        }
    }

    /// Whether another attempt is allowed after `attempts` failures
    pub fn allows(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }

    /// Delay before the retry following the given failed attempt (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
