//! Credentials file loading
//!
//! Harvest runs are driven by a local JSON credentials file, kept compatible
//! with the one the original cron scripts read:
//!
//! ```json
//! {
//!     "token": "...",
//!     "api": "Product",
//!     "env": "Production",
//!     "since_id": "",
//!     "date_updated": "2021-08-12",
//!     "items": ["894096938XLG", 813037900076]
//! }
//! ```

use crate::endpoint::Cursor;
use crate::error::{Error, Result};
use crate::types::{Environment, OptionStringExt, ResourceKind};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Credentials and run parameters loaded from a JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// API bearer token, forwarded verbatim
    pub token: String,

    /// Which catalog API to paginate
    #[serde(default)]
    pub api: ResourceKind,

    /// Which host to target
    #[serde(default)]
    pub env: Environment,

    /// Cursor to resume pagination from (raw `maxId` value)
    #[serde(default)]
    pub since_id: Option<String>,

    /// Only fetch products updated on or after this date (YYYY-MM-DD)
    #[serde(default)]
    pub date_updated: Option<String>,

    /// Child identifiers for parent resolution (strings or numbers)
    #[serde(default)]
    pub items: Vec<Value>,
}

impl Credentials {
    /// Load credentials from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let credentials: Self = serde_json::from_str(&contents)?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check required fields
    fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::missing_field("token"));
        }
        Ok(())
    }

    /// The start cursor, if a non-empty `since_id` was configured
    pub fn start_cursor(&self) -> Option<Cursor> {
        self.since_id.clone().none_if_empty().map(Cursor::new)
    }

    /// The date filter, if a non-empty `date_updated` was configured
    pub fn since_date(&self) -> Option<&str> {
        self.date_updated.as_deref().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
                "token": "secret",
                "api": "Channel",
                "env": "Sandbox",
                "since_id": "abc123",
                "date_updated": "2021-08-12",
                "items": ["894096938XLG", 813037900076]
            }"#,
        );

        let credentials = Credentials::load(file.path()).unwrap();
        assert_eq!(credentials.token, "secret");
        assert_eq!(credentials.api, ResourceKind::Channel);
        assert_eq!(credentials.env, Environment::Sandbox);
        assert_eq!(credentials.start_cursor(), Some(Cursor::new("abc123")));
        assert_eq!(credentials.since_date(), Some("2021-08-12"));
        assert_eq!(credentials.items.len(), 2);
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let file = write_config(r#"{"token": "secret"}"#);

        let credentials = Credentials::load(file.path()).unwrap();
        assert_eq!(credentials.api, ResourceKind::Product);
        assert_eq!(credentials.env, Environment::Production);
        assert!(credentials.start_cursor().is_none());
        assert!(credentials.since_date().is_none());
        assert!(credentials.items.is_empty());
    }

    #[test]
    fn test_empty_strings_are_treated_as_absent() {
        let file = write_config(
            r#"{"token": "secret", "since_id": "", "date_updated": ""}"#,
        );

        let credentials = Credentials::load(file.path()).unwrap();
        assert!(credentials.start_cursor().is_none());
        assert!(credentials.since_date().is_none());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let file = write_config(r#"{"token": ""}"#);

        let result = Credentials::load(file.path());
        assert!(matches!(
            result,
            Err(Error::MissingConfigField { ref field }) if field == "token"
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Credentials::load("/nonexistent/config.json");
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
