/// Catalog Service Library
///
/// Owns the website catalog: website records with their device, category and
/// region-exclusion lists, per-region popularity and trending metrics, and
/// the synchronization of every successful write into the search index.
///
/// # Modules
///
/// - `handlers`: Website HTTP request handlers
/// - `models`: Website and metric data structures
/// - `services`: Business logic layer (catalog + index sync)
/// - `db`: Database access layer and repositories
/// - `search`: Search-index client and the indexer seam
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod search;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
