//! CLI runner
//!
//! Wires credentials, client, and harvester together for each subcommand.

use super::commands::{Cli, Commands};
use super::console;
use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::flatten::ResultTable;
use crate::harvest::{HarvestConfig, Harvester};
use crate::http::{ApiClient, ApiClientConfig};
use crate::types::RetryPolicy;
use serde_json::Value;
use std::time::Duration;

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the requested command
    pub async fn run(&self) -> Result<()> {
        let credentials = Credentials::load(&self.cli.config)?;

        let retry = match self.cli.max_attempts {
            Some(max) => RetryPolicy::bounded(max, Duration::from_millis(500)),
            None => RetryPolicy::legacy(),
        };

        let client = ApiClient::with_config(
            ApiClientConfig::builder().token(&credentials.token).build(),
        );

        match &self.cli.command {
            Commands::Products {
                log_pages,
                since_date,
            } => {
                console::header("Getting Products");

                let config = HarvestConfig::new()
                    .with_retry(retry)
                    .with_page_logging(*log_pages);
                let mut harvester = Harvester::new(client).with_config(config);

                let since = since_date.as_deref().or_else(|| credentials.since_date());
                let table = harvester
                    .products(credentials.env, credentials.api, since, credentials.start_cursor())
                    .await?;

                console::sub_header(&format!(
                    "Downloaded {} rows from {} pages",
                    table.len(),
                    harvester.stats().pages_fetched
                ));
                self.print_table(&table);
            }
            Commands::Parents {
                id_only,
                ids,
                log_items,
            } => {
                console::header("Getting Parent Products");

                let items: Vec<Value> = match ids {
                    Some(list) => list
                        .split(',')
                        .map(|s| Value::String(s.trim().to_string()))
                        .collect(),
                    None => credentials.items.clone(),
                };
                if items.is_empty() {
                    return Err(Error::config(
                        "no child ids: pass --ids or set 'items' in the credentials file",
                    ));
                }

                let config = HarvestConfig::new()
                    .with_retry(retry)
                    .with_item_logging(*log_items);
                let mut harvester = Harvester::new(client).with_config(config);

                let table = harvester
                    .parents(credentials.env, &items, *id_only)
                    .await?;

                console::sub_header(&format!(
                    "Resolved {} items into {} rows",
                    harvester.stats().items_resolved,
                    table.len()
                ));
                self.print_table(&table);
            }
        }

        Ok(())
    }

    /// Print the table, honoring the `--limit` flag
    fn print_table(&self, table: &ResultTable) {
        let limit = if self.cli.limit == 0 {
            table.len()
        } else {
            self.cli.limit
        };

        println!("{:<28} {:<40} {:<20} value", "primaryId", "attribute", "itemId");
        for row in table.rows().iter().take(limit) {
            println!(
                "{:<28} {:<40} {:<20} {}",
                row.primary_id,
                row.attribute,
                row.item_id.as_deref().unwrap_or("-"),
                row.value
            );
        }
        if limit < table.len() {
            console::message(&format!("... {} more rows", table.len() - limit));
        }
    }
}
