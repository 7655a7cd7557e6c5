//! Cross-cutting HTTP middleware

use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::app_error::AppError;
use crate::error::response::ErrorResponse;

/// Fill in the `path` of any error envelope produced further down the stack
///
/// Must be the outermost envelope-producing layer so that errors from the
/// auth pipeline and from handlers are both covered.
pub async fn stamp_error_path(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;

    let Some(body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    let body = body.with_path(path);
    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize error envelope");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(bytes))
}

/// Abort requests that run longer than the configured deadline
///
/// Dropping the handler future releases pooled connections and rolls back
/// any open transaction.
pub async fn enforce_deadline(
    State(deadline): State<Duration>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match tokio::time::timeout(deadline, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                deadline_ms = deadline.as_millis() as u64,
                "Request exceeded deadline"
            );
            AppError::service_unavailable("Request timed out").into_response()
        }
    }
}

/// Router fallback for unmatched routes
pub async fn not_found_fallback(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("No handler found for {} {}", method, uri.path()))
}
