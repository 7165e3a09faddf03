/// OpenAPI documentation for Marketplace Catalog Service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace Catalog Service API",
        version = "1.0.0",
        description = "Website catalog service for the app marketplace. Manages website records, per-region popularity and trending metrics, and keeps the search index in sync with every successful write.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8085", description = "Development server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "websites", description = "Website catalog CRUD"),
        (name = "metrics", description = "Per-region popularity and trending values"),
    ),
    components(schemas(
        models::Website,
        models::WebsitePayload,
        models::WebsiteUpdate,
        models::WebsiteMetric,
        models::MetricPayload,
        models::PageMeta,
    )),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token with curation grants"))
                        .build(),
                ),
            )
        }
    }
}
