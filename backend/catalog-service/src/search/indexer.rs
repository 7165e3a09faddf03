/// Website search-index synchronization
///
/// The catalog row is the source of truth; the search index is a derived
/// copy kept in sync by explicit calls after each successful write. The
/// `WebsiteIndexer` trait is the seam: production uses Elasticsearch, tests
/// substitute a recording fake.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use elasticsearch::{
    http::transport::{BuildError, SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    DeleteParts, Elasticsearch, IndexParts,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::models::Website;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("invalid Elasticsearch URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build transport: {0}")]
    TransportBuild(#[from] BuildError),
    #[error("transport error: {0}")]
    Transport(#[from] elasticsearch::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The document shape stored in the websites index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteDocument {
    pub id: i64,
    pub url: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub devices: Vec<i32>,
    pub region_exclusions: Vec<i32>,
    pub status: i32,
    pub is_disabled: bool,
    pub last_updated: DateTime<Utc>,
}

impl From<&Website> for WebsiteDocument {
    fn from(site: &Website) -> Self {
        WebsiteDocument {
            id: site.id,
            url: site.url.clone(),
            title: site.title.clone(),
            short_title: site.short_title.clone(),
            description: site.description.clone(),
            categories: site.categories.clone(),
            devices: site.devices.clone(),
            region_exclusions: site.region_exclusions.clone(),
            status: site.status,
            is_disabled: site.is_disabled,
            last_updated: site.last_updated,
        }
    }
}

/// Seam between the catalog and its search index.
#[async_trait]
pub trait WebsiteIndexer: Send + Sync {
    /// Write (or overwrite) the document for a website.
    async fn index(&self, site: &Website) -> Result<(), IndexerError>;

    /// Remove the document for a deleted website.
    async fn unindex(&self, website_id: i64) -> Result<(), IndexerError>;
}

#[derive(Clone)]
pub struct ElasticsearchIndexer {
    client: Elasticsearch,
    website_index: String,
}

impl ElasticsearchIndexer {
    pub async fn new(url: &str, website_index: &str) -> Result<Self, IndexerError> {
        let parsed = Url::parse(url)?;
        let pool = SingleNodeConnectionPool::new(parsed);
        let transport = TransportBuilder::new(pool).build()?;
        let client = Elasticsearch::new(transport);

        let instance = Self {
            client,
            website_index: website_index.to_string(),
        };

        instance.ensure_website_index().await?;

        Ok(instance)
    }

    async fn ensure_website_index(&self) -> Result<(), IndexerError> {
        let exists_response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.website_index.as_str()]))
            .send()
            .await?;

        if exists_response.status_code().is_success() {
            return Ok(());
        }

        let body = json!({
            "mappings": {
                "properties": {
                    "id": { "type": "long" },
                    "url": { "type": "keyword" },
                    "title": {
                        "type": "text",
                        "analyzer": "english"
                    },
                    "short_title": {
                        "type": "text",
                        "analyzer": "english"
                    },
                    "description": {
                        "type": "text",
                        "analyzer": "english"
                    },
                    "categories": { "type": "keyword" },
                    "devices": { "type": "integer" },
                    "region_exclusions": { "type": "integer" },
                    "status": { "type": "integer" },
                    "is_disabled": { "type": "boolean" },
                    "last_updated": { "type": "date" }
                }
            }
        });

        self.client
            .indices()
            .create(IndicesCreateParts::Index(&self.website_index))
            .body(body)
            .send()
            .await?;

        Ok(())
    }
}

#[async_trait]
impl WebsiteIndexer for ElasticsearchIndexer {
    async fn index(&self, site: &Website) -> Result<(), IndexerError> {
        let doc = WebsiteDocument::from(site);
        self.client
            .index(IndexParts::IndexId(
                &self.website_index,
                doc.id.to_string().as_str(),
            ))
            .body(&doc)
            .send()
            .await?;
        Ok(())
    }

    async fn unindex(&self, website_id: i64) -> Result<(), IndexerError> {
        self.client
            .delete(DeleteParts::IndexId(
                &self.website_index,
                website_id.to_string().as_str(),
            ))
            .send()
            .await?;
        Ok(())
    }
}
