//! Request ID propagation.
//!
//! Every request runs inside a span carrying a request ID, and the same
//! ID is echoed in the response so report consumers can quote it when
//! filing problems.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the caller-supplied request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID stored in request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    #[allow(dead_code)] // Handlers read the id through the extension
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Middleware that assigns each request an ID.
///
/// Honors an `X-Request-ID` header from the caller, otherwise generates
/// a UUID. The ID lands in request extensions, in the `request` tracing
/// span and in the `x-request-id` response header.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id =
        incoming_request_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let _guard = span.enter();

    let start = std::time::Instant::now();
    let mut response = next.run(req).await;

    tracing::info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }

    response
}
