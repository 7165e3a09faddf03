/// Data models for catalog-service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review lifecycle of a website. The numeric codes are part of the wire
/// format and match the marketplace's shared status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebsiteStatus {
    Incomplete,
    Pending,
    Public,
    Disabled,
    Rejected,
}

impl WebsiteStatus {
    pub fn code(self) -> i32 {
        match self {
            WebsiteStatus::Incomplete => 0,
            WebsiteStatus::Pending => 2,
            WebsiteStatus::Public => 4,
            WebsiteStatus::Disabled => 5,
            WebsiteStatus::Rejected => 12,
        }
    }

    pub fn from_code(code: i32) -> Option<WebsiteStatus> {
        match code {
            0 => Some(WebsiteStatus::Incomplete),
            2 => Some(WebsiteStatus::Pending),
            4 => Some(WebsiteStatus::Public),
            5 => Some(WebsiteStatus::Disabled),
            12 => Some(WebsiteStatus::Rejected),
            _ => None,
        }
    }
}

impl Default for WebsiteStatus {
    fn default() -> Self {
        WebsiteStatus::Incomplete
    }
}

/// A catalog website. Text fields hold the default-locale value; translation
/// storage lives with another collaborator.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Website {
    pub id: i64,
    pub default_locale: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub description: Option<String>,
    /// Device type ids this website supports
    pub devices: Vec<i32>,
    /// Category slugs
    pub categories: Vec<String>,
    /// Region ids the website is excluded from
    pub region_exclusions: Vec<i32>,
    pub icon_type: String,
    pub icon_hash: String,
    /// Numeric status code (see `WebsiteStatus`)
    pub status: i32,
    pub is_disabled: bool,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request body for website create.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WebsitePayload {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub devices: Vec<i32>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub region_exclusions: Vec<i32>,
    #[serde(default)]
    pub icon_type: String,
    #[serde(default)]
    pub icon_hash: String,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub is_disabled: bool,
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Request body for website update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WebsiteUpdate {
    #[serde(default)]
    pub default_locale: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub devices: Option<Vec<i32>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub region_exclusions: Option<Vec<i32>>,
    #[serde(default)]
    pub icon_type: Option<String>,
    #[serde(default)]
    pub icon_hash: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub is_disabled: Option<bool>,
}

/// A per-region popularity or trending value. Region 0 aggregates across
/// all regions.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct WebsiteMetric {
    pub website_id: i64,
    pub value: f64,
    pub region: i32,
}

/// Request body for metric upserts.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MetricPayload {
    pub value: f64,
    /// Region id; 0 means "across all regions"
    #[serde(default)]
    pub region: i32,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Offset-paginated list envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub objects: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_roundtrip() {
        for status in [
            WebsiteStatus::Incomplete,
            WebsiteStatus::Pending,
            WebsiteStatus::Public,
            WebsiteStatus::Disabled,
            WebsiteStatus::Rejected,
        ] {
            assert_eq!(WebsiteStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn unknown_status_code_is_rejected() {
        assert_eq!(WebsiteStatus::from_code(99), None);
        assert_eq!(WebsiteStatus::from_code(-1), None);
    }
}
