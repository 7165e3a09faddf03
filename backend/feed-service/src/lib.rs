/// Feed Service Library
///
/// Handles the curated marketplace feed: per-region ordered feed items, the
/// feed builder (atomic per-region rebuild), and the feed collections
/// (highlighted apps, brands, curated collections) editors assemble.
///
/// # Modules
///
/// - `handlers`: Feed-related HTTP request handlers
/// - `models`: Data structures for feed items and feed collections
/// - `services`: Business logic layer (builder, collection manager)
/// - `db`: Database access layer and repositories
/// - `regions`: Canonical marketplace region table
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod regions;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
