use axum::http::{HeaderValue, Request as HttpRequest};
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensures every request carries an `x-request-id`, generating one when the caller didn't,
/// and echoes it back on the response.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let header_value = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = header_value.clone() {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let mut response = next.run(req).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span<B>(request: &HttpRequest<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}
