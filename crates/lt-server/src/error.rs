//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`lt_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on core results directly.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: lt_core::Error,
}

impl AppError {
    pub fn new(inner: lt_core::Error) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &lt_core::Error {
        &self.inner
    }
}

impl From<lt_core::Error> for AppError {
    fn from(e: lt_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side failures are logged in full but never echoed to clients.
        let reason = if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
            "Internal server error".to_string()
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request rejected");
            self.inner.to_string()
        };

        let mut response = (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            reason,
        )
            .into_response();

        if let lt_core::Error::RangeNotSatisfiable { total } = self.inner {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{total}")) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
        }

        response
    }
}
