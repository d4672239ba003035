//! # Todo Config
//!
//! Configuration types for the Todo API.
//!
//! Every structure is loaded from environment variables through `from_env()`,
//! falling back to development defaults:
//!
//! - [`jwt`]: bearer token verification
//! - [`cors`]: allowed origins
//! - [`database`]: connection string and pool size
//! - [`server`]: bind address
//! - [`observability`]: log level, log files and metrics
//!
//! # Example
//!
//! ```ignore
//! use todo_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod observability;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use observability::ObservabilityConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, falling back to `default`.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Interprets `false`/`0` as disabled; anything else (or unset) uses `default`.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(default)
}
