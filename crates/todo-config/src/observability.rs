//! Logging and metrics settings.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: default level when `RUST_LOG` is unset (default: `info`)
//! - `LOG_TO_FILE`: write daily-rolling JSON logs (default: `true`)
//! - `LOG_DIR`: directory for log files (default: `storage/logs`)
//! - `METRICS_ENABLED`: expose `/metrics` and record HTTP metrics (default: `true`)

use std::env;

use crate::env_flag;

#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_dir: String,
    pub metrics_enabled: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_to_file: env_flag("LOG_TO_FILE", true),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string()),
            metrics_enabled: env_flag("METRICS_ENABLED", true),
        }
    }
}
