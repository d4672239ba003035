use anyhow::Context;
use dotenvy::dotenv;
use todo_api::logging::init_tracing;
use todo_api::metrics::init_metrics;
use todo_api::router::init_router;
use todo_api::state::init_app_state;
use todo_config::{DatabaseConfig, ObservabilityConfig, ServerConfig};
use todo_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let observability = ObservabilityConfig::from_env();
    let _log_guard = init_tracing(&observability)?;

    let database = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let mut state = init_app_state(pool);
    if observability.metrics_enabled {
        state = state.with_metrics(init_metrics()?);
        tracing::info!("Prometheus metrics enabled at /metrics");
    }

    let app = init_router(state);

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", server.bind_address()))?;

    tracing::info!(address = %server.bind_address(), "🚀 Server running");
    tracing::info!("📚 Swagger UI available at /swagger-ui");
    tracing::info!("📖 Scalar UI available at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
