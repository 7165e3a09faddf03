/// Search-index synchronization for the website catalog
pub mod indexer;

pub use indexer::{ElasticsearchIndexer, IndexerError, WebsiteDocument, WebsiteIndexer};
