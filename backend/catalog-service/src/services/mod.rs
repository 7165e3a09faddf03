/// Business logic layer for catalog-service
pub mod websites;

pub use websites::WebsiteService;
