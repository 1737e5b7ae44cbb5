use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

fn incoming_request_id(req: &Request) -> Option<String> {
    req.headers()
        .get(&REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_owned)
}

/// Logs every request with a request id, reusing the caller's `x-request-id`
/// when present. The id is forwarded upstream and echoed on the response.
///
/// Only the path is logged; query strings and headers stay out of the logs.
pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let request_id = match incoming_request_id(&req) {
        Some(id) => id,
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(REQUEST_ID.clone(), value);
            }
            id
        }
    };

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path
    );

    info!(parent: &span, "Incoming request");

    let mut response = next.run(req).instrument(span.clone()).await;
    let latency = start.elapsed();
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(parent: &span, status = %status, latency_ms = %latency.as_millis(), "Client error"),
        500..=599 => error!(parent: &span, status = %status, latency_ms = %latency.as_millis(), "Server error"),
        _ => info!(parent: &span, status = %status, latency_ms = %latency.as_millis(), "Request completed"),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID.clone(), value);
    }

    response
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(format!(
            "{}={level},squadgate_auth={level},squadgate_config={level},tower_http=warn,hyper=info,hyper_util=info",
            env!("CARGO_CRATE_NAME")
        ))
    })
}

/// Installs the global subscriber: compact console output, an error log and
/// a JSON log, both rolled daily under `storage/logs/<service>.*`.
pub fn init_tracing(service: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let log_dir = "storage/logs";
    fs::create_dir_all(log_dir).context("Failed to create logs directory")?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter());

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{service}.log"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{service}.json"));

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
