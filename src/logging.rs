use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use todo_config::ObservabilityConfig;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}

/// Installs the global subscriber: a compact console layer and, when enabled,
/// a daily-rolling JSON file in `config.log_dir`.
///
/// `RUST_LOG` overrides `config.log_level`. The returned guard flushes the
/// file writer on drop and must be held for the lifetime of the process.
pub fn init_tracing(config: &ObservabilityConfig) -> anyhow::Result<Option<WorkerGuard>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let default_directives = format!(
        "{}={level},todo_core={level},todo_db={level},tower_http=warn,axum::rejection=trace",
        env!("CARGO_CRATE_NAME"),
        level = config.log_level
    );
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_directives))
    };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(filter());

    if !config.log_to_file {
        tracing_subscriber::registry().with(console_layer).try_init()?;
        return Ok(None);
    }

    std::fs::create_dir_all(&config.log_dir)?;
    let json_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "todo-api.json");
    let (writer, guard) = tracing_appender::non_blocking(json_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()?;

    Ok(Some(guard))
}
