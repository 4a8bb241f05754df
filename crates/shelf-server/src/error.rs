//! Error types for the HTTP server.

use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Body for every path that cannot be browsed ("path does not exist").
pub(crate) const NOT_FOUND_BODY: &str = "目录不存在";

/// Body for every non-GET request.
pub(crate) const METHOD_NOT_ALLOWED_BODY: &str = "404 not found";

/// Server error type.
///
/// Responses carry a fixed plain-text body with status 200, which existing
/// clients match on; the underlying cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Path did not resolve or its node failed to render.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request method other than GET.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(Method),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::NotFound(_) => NOT_FOUND_BODY,
            Self::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_BODY,
        };

        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
