use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use todo_config::{CorsConfig, JwtConfig};
use todo_db::PgPool;

use crate::modules::todos::{PgTodoRepository, TodoRepository, TodoService};

#[derive(Clone)]
pub struct AppState {
    pub todo_service: TodoService,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    /// Present when metrics are enabled; serves `/metrics`.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            todo_service: TodoService::new(repository),
            jwt_config,
            cors_config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

/// State backed by PostgreSQL, configured from the environment.
pub fn init_app_state(db: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgTodoRepository::new(db)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    )
}
