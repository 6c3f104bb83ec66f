//! Request tracing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs every request with method, path, status, and latency, leveled by
/// response class.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency_ms,
            "Request rejected"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency_ms,
            "Request completed"
        );
    }

    response
}
