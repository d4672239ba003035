//! # Todo DB
//!
//! Connection pool initialization and schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use todo_config::DatabaseConfig;
//! use todo_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! ```

use sqlx::postgres::PgPoolOptions;
use todo_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool sized from the configuration.
///
/// The returned pool is cheaply cloneable and meant to be created once at
/// startup and shared through the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
