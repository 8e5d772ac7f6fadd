//! Harvest configuration and statistics

use crate::types::RetryPolicy;

/// Configuration for harvest operations
#[derive(Debug, Clone, Default)]
pub struct HarvestConfig {
    /// Retry policy for non-200/404 responses
    pub retry: RetryPolicy,
    /// Emit one log line per downloaded page
    pub log_pages: bool,
    /// Emit one log line per resolved child item
    pub log_items: bool,
}

impl HarvestConfig {
    /// Create a new harvest config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Log each downloaded page
    #[must_use]
    pub fn with_page_logging(mut self, enabled: bool) -> Self {
        self.log_pages = enabled;
        self
    }

    /// Log each resolved item
    #[must_use]
    pub fn with_item_logging(mut self, enabled: bool) -> Self {
        self.log_items = enabled;
        self
    }
}

/// Statistics from a harvest operation
#[derive(Debug, Clone, Default)]
pub struct HarvestStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Raw records received
    pub records_fetched: usize,
    /// Flattened rows emitted
    pub rows_emitted: usize,
    /// Child items resolved
    pub items_resolved: usize,
    /// Retries performed
    pub retries: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl HarvestStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_fetched += count;
    }

    /// Add emitted rows
    pub fn add_rows(&mut self, count: usize) {
        self.rows_emitted += count;
    }

    /// Add a resolved item
    pub fn add_item(&mut self) {
        self.items_resolved += 1;
    }

    /// Add a retry
    pub fn add_retry(&mut self) {
        self.retries += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
