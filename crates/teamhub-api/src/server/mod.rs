//! Server setup and initialization
//!
//! Wires PostgreSQL repositories, the Redis publisher and the HTTP stack.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use teamhub_cache::{create_shared_pool, Publisher, RedisPoolConfig};
use teamhub_common::{AppConfig, AppError, JwtService};
use teamhub_core::SnowflakeGenerator;
use teamhub_db::{
    create_pool, run_migrations, PgJoinRequestRepository, PgMemberRepository,
    PgParticipantRepository, PgTeamEventRepository, PgTeamRepository, PoolConfig,
};
use teamhub_service::{NotificationDispatcher, ServiceContext};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, MiddlewareConfig};
use crate::routes::{create_router, health_routes};
use crate::state::{AppState, Backends};

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    let middleware = MiddlewareConfig {
        rate_limit: &config.rate_limit,
        cors: &config.cors,
        is_production: config.app.env.is_production(),
        request_timeout: Duration::from_secs(config.api.request_timeout_secs),
    };

    apply_middleware(create_router(), &middleware)
        .merge(health_routes())
        .with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if let Some(dir) = &config.database.migrations_dir {
        run_migrations(&pool, dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!(dir = %dir, "Migrations applied");
    }

    let redis = create_shared_pool(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;

    let publisher = Publisher::new(redis.as_ref().clone());
    let notifier = NotificationDispatcher::new(Arc::new(publisher));

    let service_context = ServiceContext::builder()
        .team_repo(Arc::new(PgTeamRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .join_request_repo(Arc::new(PgJoinRequestRepository::new(pool.clone())))
        .event_repo(Arc::new(PgTeamEventRepository::new(pool.clone())))
        .participant_repo(Arc::new(PgParticipantRepository::new(pool.clone())))
        .notifier(notifier)
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

    Ok(AppState::new(service_context, jwt_service).with_backends(Backends { pool, redis }))
}

/// Serve `app` until Ctrl-C
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}: {e}", config.api.address())))?;

    let state = create_app_state(&config).await?;
    let app = create_app(state, &config);

    run_server(app, addr).await
}
