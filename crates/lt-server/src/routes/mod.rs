//! Route handlers for the HTTP API.

pub mod courses;
pub mod health;
pub mod stream;
pub mod streaming_helpers;
pub mod subtitles;

use axum::extract::OriginalUri;

use crate::error::AppError;

/// Fallback for unknown `/api` paths, including media URLs with too few or
/// too many segments.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    lt_core::Error::not_found("route", uri.path()).into()
}
