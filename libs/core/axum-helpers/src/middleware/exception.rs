//! Exception handling middleware.
//!
//! Installed outermost around the application routes. Each request gets a
//! correlation id (the inbound `x-request-id` when it is usable, otherwise a
//! fresh UUID v4). Any error response produced further in, whether an
//! `AppError`, a framework status such as 405, or a caught panic, is rewritten
//! to the standard body:
//!
//! ```json
//! { "statusCode": 400, "message": "...", "correlationId": "..." }
//! ```

use crate::errors::{AppError, ErrorDetails};
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_CORRELATION_ID_LEN: usize = 128;

/// Per-request trace token, available to handlers as a request extension
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    fn from_request(request: &Request) -> Self {
        request
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty() && value.len() <= MAX_CORRELATION_ID_LEN)
            .map(|value| Self(value.to_string()))
            .unwrap_or_else(|| Self(Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub async fn exception_handling(mut request: Request, next: Next) -> Response {
    let correlation_id = CorrelationId::from_request(&request);
    request.extensions_mut().insert(correlation_id.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = tracing::info_span!("request", correlation_id = %correlation_id.as_str());

    let response = next.run(request).instrument(span.clone()).await;
    let mut response =
        span.in_scope(|| render_error(response, &correlation_id, &method, &path));

    if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}

fn render_error(
    mut response: Response,
    correlation_id: &CorrelationId,
    method: &Method,
    path: &str,
) -> Response {
    let details = match response.extensions_mut().remove::<ErrorDetails>() {
        Some(details) => details,
        None if is_bare_error(&response) => ErrorDetails::from_status(response.status()),
        None => return response,
    };

    log_error(&details, method, path);

    let body = details.to_body(Some(correlation_id.as_str().to_string()));
    let bytes = serde_json::to_vec(&body).unwrap_or_default();

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_ENCODING);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Error statuses that nobody rendered as JSON (empty 405, 408 from a timeout)
fn is_bare_error(response: &Response) -> bool {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return false;
    }

    !response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn log_error(details: &ErrorDetails, method: &Method, path: &str) {
    let status = details.status.as_u16();
    let source = details.source.as_deref().unwrap_or_default();

    if details.status.is_server_error() {
        tracing::error!(status, %method, path, source, "Request failed: {}", details.message);
    } else {
        tracing::warn!(status, %method, path, "Request rejected: {}", details.message);
    }
}
