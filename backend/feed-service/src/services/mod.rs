/// Business logic layer for feed-service
pub mod builder;
pub mod collections;

pub use builder::{FeedBuilderService, RebuildSummary};
pub use collections::CollectionService;
