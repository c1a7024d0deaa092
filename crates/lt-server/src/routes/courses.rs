//! Catalog listing route.

use axum::extract::State;
use axum::Json;
use lt_core::Catalog;

use crate::context::AppContext;
use crate::error::AppError;

/// GET /api/courses
///
/// Rescans the media root on every request. The walk is blocking filesystem
/// work, so it runs on the blocking pool.
pub async fn list_courses(State(ctx): State<AppContext>) -> Result<Json<Catalog>, AppError> {
    let scanner = ctx.scanner.clone();
    let courses = tokio::task::spawn_blocking(move || scanner.scan())
        .await
        .map_err(|e| lt_core::Error::Internal(format!("catalog scan task failed: {e}")))?;

    let catalog = Catalog::new(courses);
    tracing::debug!(
        courses = catalog.courses.len(),
        videos = catalog.video_count(),
        "Catalog scanned"
    );

    Ok(Json(catalog))
}
