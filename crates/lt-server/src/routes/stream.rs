//! Video streaming with HTTP range request support.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use lt_core::{range, MediaKind, MediaPath, RangeParsing};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::streaming_helpers::{open_media, stream_range};

/// GET /api/video/{course}/{module}/{filename}
pub async fn stream_video(
    State(ctx): State<AppContext>,
    Path((course, module, filename)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let media = MediaPath::new(course, module, filename);
    let file_path = media.resolve(ctx.courses_root(), MediaKind::Video)?;

    let mode = ctx.range_parsing();
    let range_header = range_header(&headers, mode)?;

    let (file, total) = open_media(&file_path, MediaKind::Video, &media).await?;
    let range = range::resolve(range_header, total, mode).map_err(lt_core::Error::from)?;

    tracing::debug!(path = %media, total, ?range, "Streaming video");

    Ok(stream_range(file, total, range, MediaKind::Video.content_type()).await?)
}

/// Extract the `Range` header as text.
///
/// A value that is not visible ASCII is malformed in strict mode and treated
/// as absent in lenient mode.
fn range_header(headers: &HeaderMap, mode: RangeParsing) -> Result<Option<&str>, lt_core::Error> {
    let Some(value) = headers.get(header::RANGE) else {
        return Ok(None);
    };

    match (value.to_str(), mode) {
        (Ok(text), _) => Ok(Some(text)),
        (Err(_), RangeParsing::Lenient) => Ok(None),
        (Err(_), RangeParsing::Strict) => Err(lt_core::Error::BadRequest(
            "malformed range header: not valid ASCII".into(),
        )),
    }
}
