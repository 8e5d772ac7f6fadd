//! Harvesting loops
//!
//! # Overview
//!
//! The harvest module provides:
//! - `Harvester` - drives catalog pagination and parent resolution
//! - `HarvestConfig` - retry policy and per-page/per-item logging
//! - `HarvestStats` - counters for pages, records, rows and retries
//!
//! Both loops are strictly sequential: one outstanding request at a time,
//! with a loop-local accumulator that survives retries. The original
//! integration retried by re-invoking itself recursively with the in-progress
//! result list; here that is an explicit loop governed by
//! [`RetryPolicy`](crate::types::RetryPolicy).

mod types;

pub use types::{HarvestConfig, HarvestStats};

use crate::endpoint::{decode_id, encode_id, Cursor, EndpointBuilder};
use crate::error::{Error, Result};
use crate::flatten::{flatten_records, id_to_string, FlatRow, ResultTable};
use crate::http::{ApiClient, FetchOutcome};
use crate::types::{Environment, ResourceKind};
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

/// Drives catalog pagination and parent resolution against one API client
pub struct Harvester {
    /// HTTP client
    client: ApiClient,
    /// Endpoint URL builder
    endpoints: EndpointBuilder,
    /// Harvest configuration
    config: HarvestConfig,
    /// Statistics
    stats: HarvestStats,
}

impl Harvester {
    /// Create a harvester with default configuration
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            endpoints: EndpointBuilder::new(),
            config: HarvestConfig::default(),
            stats: HarvestStats::default(),
        }
    }

    /// Set harvest configuration
    #[must_use]
    pub fn with_config(mut self, config: HarvestConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the endpoint builder (tests point this at a mock server)
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: EndpointBuilder) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &HarvestStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = HarvestStats::default();
    }

    /// Download the whole catalog (or everything updated since `since_date`)
    /// as one flattened table.
    ///
    /// Pages are fetched one at a time, flattened, and concatenated in fetch
    /// order. A 404 terminates the loop normally; any other non-200 status
    /// re-fetches the same page under the configured retry policy with the
    /// accumulator intact. Zero successful pages yield an empty table.
    pub async fn products(
        &mut self,
        env: Environment,
        resource: ResourceKind,
        since_date: Option<&str>,
        start_cursor: Option<Cursor>,
    ) -> Result<ResultTable> {
        let start = Instant::now();
        let since_date = since_date.filter(|d| !d.is_empty());

        match (since_date, resource) {
            (Some(date), _) => info!("Downloading all products updated since {date}"),
            (None, ResourceKind::Channel) => info!("Downloading product data from the Channel"),
            (None, ResourceKind::Product) => info!("Downloading all product data"),
        }

        let mut page: u32 = 1;
        let mut cursor = start_cursor;
        let mut attempts: u32 = 0;
        let mut batches: Vec<Vec<FlatRow>> = Vec::new();

        loop {
            if self.config.log_pages {
                info!(
                    "Downloading page {page} | sinceId = {}",
                    cursor.as_ref().map_or("", Cursor::as_str)
                );
            }

            let url = self
                .endpoints
                .products(page, cursor.as_ref(), resource, env, since_date)?;

            match self.client.fetch_page(&url).await? {
                FetchOutcome::Success {
                    records,
                    next_cursor,
                } => {
                    // Catalog pages always carry maxId; a 200 without one
                    // would loop on the same page forever
                    let next = next_cursor.ok_or_else(|| {
                        Error::malformed("200 page without 'maxId' during catalog pagination")
                    })?;

                    self.stats.add_page();
                    self.stats.add_records(records.len());

                    let rows = flatten_records(&records);
                    self.stats.add_rows(rows.len());
                    batches.push(rows);

                    cursor = Some(next);
                    page += 1;
                    attempts = 0;
                }
                FetchOutcome::EndOfCollection => break,
                FetchOutcome::TransientError { status } => {
                    self.back_off(status, &mut attempts, &format!("page {page}"))
                        .await?;
                }
            }
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Completed catalog download: {} records over {} pages",
            self.stats.records_fetched, self.stats.pages_fetched
        );

        Ok(ResultTable::from_batches(batches))
    }

    /// Resolve the parent product(s) for each child identifier.
    ///
    /// Identifiers are normalized to strings and percent-encoded into the
    /// lookup path. Every resulting row is stamped with the originating
    /// (decoded) child identifier. Any non-200 response, 404 included,
    /// re-fetches the current item under the retry policy; results
    /// accumulated so far are preserved.
    pub async fn parents(
        &mut self,
        env: Environment,
        child_ids: &[Value],
        id_only: bool,
    ) -> Result<ResultTable> {
        let start = Instant::now();
        let ids: Vec<String> = child_ids.iter().map(id_to_string).collect();
        let total = ids.len();

        info!("Resolving parents for {total} child products");

        let mut batches: Vec<Vec<FlatRow>> = Vec::new();

        for (index, id) in ids.iter().enumerate() {
            let encoded = encode_id(id);
            let url = self.endpoints.parents(&encoded, env, id_only)?;
            let item_id = decode_id(&encoded);
            let mut attempts: u32 = 0;

            loop {
                match self.client.fetch_page(&url).await? {
                    FetchOutcome::Success { records, .. } => {
                        if self.config.log_items {
                            info!("{} of {total} | {id} | Status: 200", index + 1);
                        }

                        self.stats.add_page();
                        self.stats.add_records(records.len());

                        let rows: Vec<FlatRow> = flatten_records(&records)
                            .into_iter()
                            .map(|row| row.with_item_id(item_id.clone()))
                            .collect();
                        self.stats.add_rows(rows.len());
                        batches.push(rows);
                        break;
                    }
                    FetchOutcome::EndOfCollection => {
                        // 404 has no end-of-collection meaning for a single
                        // item lookup; it is just another non-200
                        if self.config.log_items {
                            info!("{} of {total} | {id} | Status: 404", index + 1);
                        }
                        self.back_off(404, &mut attempts, &format!("item {id}"))
                            .await?;
                    }
                    FetchOutcome::TransientError { status } => {
                        if self.config.log_items {
                            info!("{} of {total} | {id} | Status: {status}", index + 1);
                        }
                        self.back_off(status, &mut attempts, &format!("item {id}"))
                            .await?;
                    }
                }
            }

            self.stats.add_item();
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Completed parent resolution: {} of {total} items",
            self.stats.items_resolved
        );

        Ok(ResultTable::from_batches(batches))
    }

    /// Record a failed attempt and wait out the backoff, or bail once the
    /// policy is spent
    async fn back_off(&mut self, status: u16, attempts: &mut u32, what: &str) -> Result<()> {
        *attempts += 1;

        if !self.config.retry.allows(*attempts) {
            return Err(Error::RetriesExhausted {
                attempts: *attempts,
                status,
            });
        }
        self.stats.add_retry();

        let delay = self.config.retry.delay_for(*attempts - 1);
        warn!("API error ({status}) on {what}, retrying in {delay:?}");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}
