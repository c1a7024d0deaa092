//! Per-request correlation IDs.
//!
//! A client-supplied `x-request-id` is reused when it is short visible
//! ASCII; otherwise a fresh v4 UUID is minted. The handler runs inside a
//! `request` span carrying the ID, method and path, so every log line of the
//! request (including 5xx reports from `AppError`) can be correlated, and
//! the ID is echoed back on the response.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied ID that is reused verbatim.
pub const MAX_REQUEST_ID_LEN: usize = 128;

pub async fn tag_request(request: Request<Body>, next: Next) -> Response {
    let id = incoming_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }
    response
}

fn incoming_id(headers: &HeaderMap) -> Option<String> {
    let id = headers.get(&X_REQUEST_ID)?.to_str().ok()?.trim();
    let usable = !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    usable.then(|| id.to_owned())
}
