/// OpenAPI documentation for Marketplace Feed Service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace Feed Service API",
        version = "1.0.0",
        description = "Curated feed service for the app marketplace. Manages the editorially curated per-region feed (apps, brands, and collections), the atomic feed builder used by the curation tools, and individual feed slot edits.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8084", description = "Development server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "builder", description = "Atomic per-region feed rebuild"),
        (name = "collections", description = "Feed apps, brands, and curated collections"),
        (name = "items", description = "Individual feed slot management"),
    ),
    components(schemas(
        models::FeedItemResponse,
        models::FeedItemPayload,
        models::CollectionPayload,
        models::CollectionUpdate,
        models::CollectionResponse,
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
