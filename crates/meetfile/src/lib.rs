pub mod aggregator;
pub mod assembler;
pub mod codes;
pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod records;
pub mod store;

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    assembler::MeetFileExporter,
    config::{ExportOptions, ServerConfig},
    database::Database,
    handlers::{create_export, export_meet_file, export_summary, health_check},
    store::MeetDataSource,
};

pub fn create_router(source: Arc<dyn MeetDataSource>, options: ExportOptions) -> Router {
    let exporter = MeetFileExporter::new(source, options);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any)
        .expose_headers([header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/health", get(health_check))
        // Export routes
        .route("/meets/{id}/export", get(export_meet_file))
        .route("/meets/{id}/export/summary", get(export_summary))
        .route("/exports", post(create_export))
        .layer(Extension(exporter))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

pub async fn run_server(pool: PgPool, config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(Arc::new(Database::new(pool)), config.export);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
