// src/bin/api_server.rs

use produtos_api::infra::logging::init_logging;
use produtos_api::transport;
use produtos_api::{AppConfig, CatalogService, PgExecutor};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(config.log_format);

    // --- Store Initialization ---
    info!(max_connections = config.max_connections, "connecting to database");
    let executor = PgExecutor::connect(&config.database_url, config.max_connections).await?;
    if config.bootstrap_schema {
        executor.ensure_schema().await?;
        info!("produtos table ready");
    } else if !executor.table_exists().await? {
        warn!("produtos table is missing; every request will fail until it is created");
    }

    let app_state = transport::http::AppState::new(
        CatalogService::new(Arc::new(executor)),
        config.error_mapping,
    );
    info!(error_mapping = ?config.error_mapping, "catalog service initialized");

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    info!("Swagger UI available at http://{}/swagger-ui", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
