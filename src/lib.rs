// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Pimberly Harvest
//!
//! Client-side harvesting of Pimberly product data into flat tabular rows.
//!
//! ## Features
//!
//! - **Catalog pagination**: walk the Channel or Product endpoint page by
//!   page via the `sinceId` cursor until the API signals end-of-collection
//! - **Date-filtered sync**: only fetch products updated since a given date
//! - **Record flattening**: nested JSON records become long-format
//!   (`primaryId`, attribute, value) rows
//! - **Parent resolution**: look up the parent product(s) for a list of
//!   child identifiers
//! - **Configurable retries**: faithful retry-forever legacy mode, or a
//!   bounded policy with backoff
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pimberly_harvest::{
//!     ApiClient, ApiClientConfig, Environment, Harvester, ResourceKind, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::with_config(
//!         ApiClientConfig::builder().token("your-api-token").build(),
//!     );
//!
//!     let mut harvester = Harvester::new(client);
//!     let table = harvester
//!         .products(Environment::Production, ResourceKind::Product, None, None)
//!         .await?;
//!
//!     for row in table.rows() {
//!         println!("{} | {} | {}", row.primary_id, row.attribute, row.value);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Harvester                         │
//! │  products() → ResultTable     parents() → ResultTable   │
//! └─────────────────────────────────────────────────────────┘
//!                │
//! ┌──────────────┬───────┴────────┬────────────────────────┐
//! │   Endpoint   │      Http      │        Flatten         │
//! ├──────────────┼────────────────┼────────────────────────┤
//! │ Channel      │ GET + token    │ Nested → dotted paths  │
//! │ Product      │ 200/404/other  │ Wide → long pivot      │
//! │ Date filter  │ Timeout        │ primaryId to string    │
//! │ Parents      │                │                        │
//! └──────────────┴────────────────┴────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document error variants before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Endpoint URL construction
pub mod endpoint;

/// HTTP client and page fetching
pub mod http;

/// Record flattening into long-format rows
pub mod flatten;

/// Catalog pagination and parent resolution
pub mod harvest;

/// Credentials file loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use endpoint::{Cursor, EndpointBuilder};
pub use flatten::{flatten_records, FlatRow, ResultTable};
pub use harvest::{HarvestConfig, HarvestStats, Harvester};
pub use http::{ApiClient, ApiClientConfig, FetchOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
