/// HTTP handlers for website catalog endpoints
///
/// Reads are public; writes require the curator grant carried in the JWT.
pub mod websites;

// Re-export handler functions at module level
pub use websites::{
    create_website, delete_website, get_metrics, get_website, list_websites, set_metric,
    update_website,
};

use actix_auth::middleware::Groups;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Grant required for every write endpoint in this service.
pub const WEBSITES_CURATE: &str = "websites:curate";

/// Reject callers whose token does not carry the curator grant.
pub(crate) fn require_curator(groups: &Groups) -> Result<()> {
    if groups.has(WEBSITES_CURATE) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Missing required permission: {}",
            WEBSITES_CURATE
        )))
    }
}

/// List query parameters for the website collection.
#[derive(Debug, Deserialize)]
pub struct WebsiteFilter {
    pub status: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl WebsiteFilter {
    pub(crate) fn limit(&self) -> i64 {
        self.limit.unwrap_or(25).clamp(1, 100)
    }

    pub(crate) fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curator_grant_is_required() {
        let curator = Groups(vec![WEBSITES_CURATE.to_string()]);
        assert!(require_curator(&curator).is_ok());

        let other = Groups(vec!["feed:curate".to_string()]);
        assert!(require_curator(&other).is_err());
    }
}
