use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::modules::todos::init_todos_router;
use crate::state::AppState;
use anyhow::anyhow;
use axum::http::{HeaderValue, Method, Uri, header};
use axum::{Router, middleware};
use todo_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/todo", init_todos_router())
        .fallback(route_not_found)
        .with_state(state.clone());

    if let Some(handle) = state.metrics_handle.clone() {
        // scrapes are served outside the measured routes
        router = router
            .layer(middleware::from_fn(metrics_middleware))
            .merge(metrics_app(handle));
    }

    router
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(anyhow!("No route for {}", uri.path()))
}
