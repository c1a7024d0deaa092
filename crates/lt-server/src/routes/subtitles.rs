//! Subtitle file route.

use axum::extract::{Path, State};
use axum::response::Response;
use lt_core::{MediaKind, MediaPath};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::streaming_helpers::{open_media, stream_whole};

/// GET /api/subtitles/{course}/{module}/{filename}
///
/// Serves the `.srt` file as-is. `Range` headers are ignored.
pub async fn get_subtitle(
    State(ctx): State<AppContext>,
    Path((course, module, filename)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    let media = MediaPath::new(course, module, filename);
    let file_path = media.resolve(ctx.courses_root(), MediaKind::Subtitle)?;

    let (file, total) = open_media(&file_path, MediaKind::Subtitle, &media).await?;
    tracing::debug!(path = %media, total, "Serving subtitle");

    Ok(stream_whole(file, total, MediaKind::Subtitle.content_type()))
}
