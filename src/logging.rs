//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};

/// The number of body bytes to include in an info-level log line before
/// truncating. Longer bodies are logged in full at the debug level.
const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level. If a body is
/// longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and the full
/// body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    log_payload("Received request", &format!("{parts:#?}"), &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    log_payload("Sending response", &format!("{parts:#?}"), &body_text);

    Response::from_parts(parts, body_text.into())
}

fn log_payload(direction: &str, headers: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "{direction}: {headers}\nbody: {}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{direction}: {headers}\nbody: {body:?}");
    }
}
