//! HTTP `Range` header resolution (single byte ranges only).
//!
//! Supported forms:
//! - `bytes=0-499`
//! - `bytes=500-` (to end of file)
//! - `bytes=-500` (last 500 bytes, strict mode only)
//!
//! A resolved span always satisfies `start <= end < total`. Requests that
//! reach past the end of the resource are unsatisfiable rather than clamped.

use serde::{Deserialize, Serialize};

use crate::Error;

/// How tolerant the resolver is of malformed headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeParsing {
    /// Malformed headers and multi-range requests are rejected with 400.
    #[default]
    Strict,
    /// Unparseable positions become `0`, the `bytes=` unit is optional and
    /// only the first of several ranges is used. Bounds are still checked.
    Lenient,
}

impl std::str::FromStr for RangeParsing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(RangeParsing::Strict),
            "lenient" => Ok(RangeParsing::Lenient),
            other => Err(format!("unknown range parsing mode '{other}' (expected strict or lenient)")),
        }
    }
}

/// An inclusive byte span within a resource of length `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ByteRange {
    /// Number of bytes in the span.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Content-Range` response header.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Outcome of resolving a request against a resource length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRange {
    /// No `Range` header: serve the whole resource with 200.
    Full,
    /// Serve exactly this span with 206.
    Partial(ByteRange),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("malformed range header: {0}")]
    Malformed(String),
    #[error("range not satisfiable for length {total}")]
    Unsatisfiable { total: u64 },
}

impl From<RangeError> for Error {
    fn from(e: RangeError) -> Self {
        match e {
            RangeError::Malformed(msg) => Error::BadRequest(format!("malformed range header: {msg}")),
            RangeError::Unsatisfiable { total } => Error::RangeNotSatisfiable { total },
        }
    }
}

/// A parsed but not yet bounds-checked range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeSpec {
    FromTo { start: u64, end: Option<u64> },
    Suffix(u64),
}

/// Resolve an optional `Range` header value against a resource of `total` bytes.
pub fn resolve(
    header: Option<&str>,
    total: u64,
    mode: RangeParsing,
) -> Result<ResolvedRange, RangeError> {
    let Some(value) = header else {
        return Ok(ResolvedRange::Full);
    };

    let spec = match mode {
        RangeParsing::Strict => parse_strict(value)?,
        RangeParsing::Lenient => parse_lenient(value),
    };

    bound(spec, total).map(ResolvedRange::Partial)
}

fn strip_unit(value: &str) -> Option<&str> {
    let unit = value.get(..6)?;
    unit.eq_ignore_ascii_case("bytes=").then(|| &value[6..])
}

fn parse_strict(value: &str) -> Result<RangeSpec, RangeError> {
    let value = value.trim();
    let ranges = strip_unit(value)
        .ok_or_else(|| RangeError::Malformed(format!("expected 'bytes=' unit in '{value}'")))?;

    if ranges.contains(',') {
        return Err(RangeError::Malformed("multiple ranges are not supported".into()));
    }

    let (start, end) = ranges
        .split_once('-')
        .ok_or_else(|| RangeError::Malformed(format!("missing '-' in '{value}'")))?;
    let (start, end) = (start.trim(), end.trim());

    match (start.is_empty(), end.is_empty()) {
        (true, true) => Err(RangeError::Malformed("empty range".into())),
        (true, false) => Ok(RangeSpec::Suffix(parse_position(end)?)),
        (false, true) => Ok(RangeSpec::FromTo {
            start: parse_position(start)?,
            end: None,
        }),
        (false, false) => Ok(RangeSpec::FromTo {
            start: parse_position(start)?,
            end: Some(parse_position(end)?),
        }),
    }
}

fn parse_position(s: &str) -> Result<u64, RangeError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::Malformed(format!("'{s}' is not a byte position")));
    }
    s.parse()
        .map_err(|_| RangeError::Malformed(format!("'{s}' is out of range")))
}

fn parse_lenient(value: &str) -> RangeSpec {
    let value = value.trim();
    let ranges = strip_unit(value).unwrap_or(value);
    let first = ranges.split(',').next().unwrap_or_default();
    // Only the first '-' separates: in "-5-10" the end field is "5-10", which reads as 0.
    let (start, end) = first.split_once('-').unwrap_or((first, ""));

    let start = start.trim().parse().unwrap_or(0);
    let end = end.trim();
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse().unwrap_or(0))
    };

    RangeSpec::FromTo { start, end }
}

fn bound(spec: RangeSpec, total: u64) -> Result<ByteRange, RangeError> {
    let unsatisfiable = RangeError::Unsatisfiable { total };
    if total == 0 {
        return Err(unsatisfiable);
    }
    let last = total - 1;

    let (start, end) = match spec {
        RangeSpec::FromTo { start, end } => (start, end.unwrap_or(last)),
        RangeSpec::Suffix(0) => return Err(unsatisfiable),
        RangeSpec::Suffix(len) => (total.saturating_sub(len), last),
    };

    if start > end || end > last {
        return Err(unsatisfiable);
    }

    Ok(ByteRange { start, end, total })
}
