//! Server setup and initialization
//!
//! Wires the configured storage backend into a service context and runs the
//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use forum_common::{AppConfig, AppError, StorageBackend};
use forum_core::SnowflakeGenerator;
use forum_db::{create_pool, InMemoryStore};
use forum_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
///
/// API routes are rate limited; health probes are not.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize the configured storage backend and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory store; data is lost on restart");
            create_memory_state(config, Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let db = config.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&forum_db::DatabaseConfig::from(db))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            forum_db::schema::apply(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            let service_context = ServiceContextBuilder::new()
                .postgres(pool)
                .snowflake_generator(Arc::new(snowflake_generator(&config)?))
                .feed_config(config.feed.clone())
                .build()
                .map_err(|e| AppError::Config(e.to_string()))?;

            Ok(AppState::new(service_context, config))
        }
    }
}

/// AppState over a caller-supplied in-memory store
pub fn create_memory_state(
    config: AppConfig,
    store: Arc<InMemoryStore>,
) -> Result<AppState, AppError> {
    let service_context = ServiceContextBuilder::new()
        .memory(store)
        .snowflake_generator(Arc::new(snowflake_generator(&config)?))
        .feed_config(config.feed.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

fn snowflake_generator(config: &AppConfig) -> Result<SnowflakeGenerator, AppError> {
    let worker_id = config.snowflake.worker_id;
    if worker_id >= 1024 {
        return Err(AppError::Config(format!("WORKER_ID must be < 1024, got {worker_id}")));
    }
    Ok(SnowflakeGenerator::new(worker_id))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {}", e)))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address {}: {}", config.api.address(), e)))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    run_server(app, listener).await
}
