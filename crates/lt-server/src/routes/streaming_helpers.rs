//! Shared streaming helpers: opening media files and writing them to the
//! client as chunked bodies via `ReaderStream`.
//!
//! Reads are done in 64KB chunks so memory stays bounded regardless of file
//! size. The reader is owned by the response body, so it is released as soon
//! as the body finishes, fails, or is dropped because the client went away.

use std::io::SeekFrom;
use std::path::Path;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use lt_core::range::ByteRange;
use lt_core::{Error, MediaKind, MediaPath, ResolvedRange};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// Chunk size for streamed bodies.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Open a validated media path and return the handle with its length.
///
/// Missing files and anything that is not a regular file become
/// [`Error::NotFound`]; other failures stay I/O errors.
pub async fn open_media(
    file_path: &Path,
    kind: MediaKind,
    media: &MediaPath,
) -> Result<(File, u64), Error> {
    let file = File::open(file_path)
        .await
        .map_err(|e| Error::from_open(kind.entity(), media, e))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| Error::from_open(kind.entity(), media, e))?;

    if !metadata.is_file() {
        return Err(Error::not_found(kind.entity(), media));
    }

    Ok((file, metadata.len()))
}

/// Stream a whole resource with 200 and an exact `Content-Length`.
pub fn stream_whole<R>(reader: R, total: u64, content_type: &'static str) -> Response
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let body = Body::from_stream(ReaderStream::with_capacity(reader, STREAM_CHUNK_SIZE));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, total.to_string()),
        ],
        body,
    )
        .into_response()
}

/// Stream a resource according to a resolved range.
///
/// `Full` yields 200 with `Accept-Ranges: bytes`; `Partial` seeks to the
/// span start and yields 206 with exactly `span.len()` bytes.
pub async fn stream_range<R>(
    reader: R,
    total: u64,
    range: ResolvedRange,
    content_type: &'static str,
) -> Result<Response, Error>
where
    R: AsyncRead + AsyncSeek + Send + Unpin + 'static,
{
    match range {
        ResolvedRange::Full => {
            let mut response = stream_whole(reader, total, content_type);
            response.headers_mut().insert(
                header::ACCEPT_RANGES,
                header::HeaderValue::from_static("bytes"),
            );
            Ok(response)
        }
        ResolvedRange::Partial(span) => stream_span(reader, span, content_type).await,
    }
}

async fn stream_span<R>(
    mut reader: R,
    span: ByteRange,
    content_type: &'static str,
) -> Result<Response, Error>
where
    R: AsyncRead + AsyncSeek + Send + Unpin + 'static,
{
    reader.seek(SeekFrom::Start(span.start)).await?;

    // Wrap in a Take to limit reads to exactly the span length.
    let limited = reader.take(span.len());
    let body = Body::from_stream(ReaderStream::with_capacity(limited, STREAM_CHUNK_SIZE));

    Ok((
        StatusCode::PARTIAL_CONTENT,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_RANGE, span.content_range()),
            (header::CONTENT_LENGTH, span.len().to_string()),
            (header::ACCEPT_RANGES, "bytes".to_string()),
        ],
        body,
    )
        .into_response())
}
