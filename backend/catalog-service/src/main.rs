use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use catalog_service::handlers;
use catalog_service::openapi::ApiDoc;
use catalog_service::search::{ElasticsearchIndexer, WebsiteIndexer};
use chrono::Utc;
use db_pool::{create_pool as create_pg_pool, DbConfig as DbPoolConfig};
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "catalog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "catalog-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut ready = true;

    let start = Instant::now();
    let pg_result = state.check_postgres().await;
    let pg_latency = Some(start.elapsed().as_millis() as u64);
    let postgres_check = match pg_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms: pg_latency,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("PostgreSQL connection failed: {}", e),
                latency_ms: pg_latency,
            }
        }
    };
    checks.insert("postgresql".to_string(), postgres_check);

    let status = if ready {
        ComponentStatus::Healthy
    } else {
        ComponentStatus::Unhealthy
    };

    let response = ReadinessResponse {
        ready,
        status,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// Catalog Service
///
/// Serves the marketplace website catalog: website CRUD, per-region
/// popularity and trending metrics, and search-index synchronization.
///
/// # Routes
///
/// - `/api/v1/websites/*` - Website CRUD
/// - `/api/v1/websites/{id}/{popularity,trending}` - Metric upserts
///
/// Reads are anonymous; writes require a JWT carrying the
/// `websites:curate` grant.
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match catalog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting catalog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    match std::env::var("JWT_PUBLIC_KEY_PEM") {
        Ok(public_key) => {
            if let Err(err) = actix_auth::jwt::initialize_validation_only(&public_key) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT keys: {err}"),
                ));
            }
        }
        Err(_) => {
            tracing::warn!(
                "JWT_PUBLIC_KEY_PEM not configured; authenticated requests will be rejected"
            );
        }
    }

    // Initialize database connection pool
    let db_cfg = match DbPoolConfig::from_env("catalog-service") {
        Ok(cfg) => cfg,
        Err(_) => {
            let mut cfg = DbPoolConfig::for_service("catalog-service");
            cfg.database_url = config.database.url.clone();
            cfg
        }
    };

    db_cfg.log_config();
    let db_pool = match create_pg_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = catalog_service::db::run_migrations(&db_pool).await {
        tracing::error!("Database migration failed: {}", e);
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("Migration failed: {e}"),
        ));
    }

    tracing::info!("Connected to database and applied migrations");

    // Initialize the search indexer (ensures the websites index exists)
    let indexer: Arc<dyn WebsiteIndexer> = Arc::new(
        ElasticsearchIndexer::new(&config.search.url, &config.search.website_index)
            .await
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize search indexer: {e}"),
                )
            })?,
    );
    let indexer_data = web::Data::new(indexer);

    tracing::info!(
        index = %config.search.website_index,
        "Search indexer initialized"
    );

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api/v1/openapi.json", openapi_doc.clone()),
            )
            .route("/api/v1/openapi.json", web::get().to(openapi_json))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(indexer_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1/websites")
                    .wrap(actix_auth::middleware::JwtAuthMiddleware)
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::list_websites))
                            .route(web::post().to(handlers::create_website)),
                    )
                    .service(
                        web::resource("/{website_id}")
                            .route(web::get().to(handlers::get_website))
                            .route(web::patch().to(handlers::update_website))
                            .route(web::put().to(handlers::update_website))
                            .route(web::delete().to(handlers::delete_website)),
                    )
                    .service(
                        web::resource("/{website_id}/{metric}")
                            .route(web::get().to(handlers::get_metrics))
                            .route(web::put().to(handlers::set_metric)),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
