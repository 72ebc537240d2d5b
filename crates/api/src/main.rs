use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use jobrelay_api::config::ServerConfig;
use jobrelay_api::router::build_app_router;
use jobrelay_api::state::AppState;
use jobrelay_engine::{EngineConfig, JobEngine, JobStore, MemoryJobStore, PgJobStore};
use jobrelay_events::WebhookDelivery;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jobrelay_api=debug,jobrelay_engine=debug,jobrelay_events=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let engine_config = EngineConfig::from_env();
    match &engine_config.webhook_url {
        Some(url) => tracing::info!(%url, "Completion webhook configured"),
        None => tracing::warn!("WEBHOOK_URL not set, completed jobs will not be announced"),
    }

    // --- Job store ---
    let store: Arc<dyn JobStore> = match &config.database_url {
        Some(database_url) => {
            let pool = jobrelay_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            jobrelay_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            jobrelay_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgJobStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, jobs are kept in memory only");
            Arc::new(MemoryJobStore::new())
        }
    };

    // --- Engine ---
    let notifier = Arc::new(WebhookDelivery::with_timeout(engine_config.webhook_timeout));
    let engine = JobEngine::new(store, notifier, engine_config);

    let state = AppState { engine: engine.clone() };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown drain ---
    let in_flight = engine.in_flight();
    tracing::info!(in_flight, "Server stopped accepting connections, draining job completions");

    if engine
        .drain(Duration::from_secs(config.shutdown_timeout_secs))
        .await
    {
        tracing::info!("Graceful shutdown complete");
    } else {
        tracing::warn!(
            remaining = engine.in_flight(),
            "Shutdown timeout elapsed with job completions still pending",
        );
    }
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
