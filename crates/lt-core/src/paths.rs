//! Validation of untrusted `{course}/{module}/{filename}` triples.
//!
//! Segments arrive already percent-decoded (the router decodes each path
//! parameter exactly once). Nothing in here decodes again, and nothing
//! touches the filesystem: [`MediaPath::resolve`] only produces a candidate
//! path under the media root once every check has passed.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The kinds of file the API serves, each bound to one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Subtitle,
}

impl MediaKind {
    /// The accepted extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            MediaKind::Video => "mp4",
            MediaKind::Subtitle => "srt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            MediaKind::Video => "video/mp4",
            MediaKind::Subtitle => "text/plain; charset=utf-8",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Subtitle => "subtitle",
        }
    }

    /// Case-insensitive extension check on a file name.
    pub fn matches(self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(self.extension()))
    }
}

/// A catalog-relative file reference taken from request path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPath {
    pub course: String,
    pub module: String,
    pub filename: String,
}

impl MediaPath {
    pub fn new(
        course: impl Into<String>,
        module: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            module: module.into(),
            filename: filename.into(),
        }
    }

    /// Reject traversal attempts and hidden files.
    pub fn validate(&self) -> Result<()> {
        for segment in [&self.course, &self.module, &self.filename] {
            if segment.is_empty() {
                return Err(Error::BadRequest("empty path segment".into()));
            }
            if segment.contains("..") {
                return Err(Error::BadRequest("invalid path".into()));
            }
            if segment.contains(&['/', '\\', '\0'][..]) {
                return Err(Error::BadRequest("invalid character in path segment".into()));
            }
        }

        if self.filename.starts_with('.') {
            return Err(Error::BadRequest("access denied".into()));
        }

        Ok(())
    }

    /// Validate, check the extension for `kind`, and join onto `root`.
    pub fn resolve(&self, root: &Path, kind: MediaKind) -> Result<PathBuf> {
        self.validate()?;

        if !kind.matches(&self.filename) {
            return Err(Error::BadRequest(format!(
                "invalid file type: expected .{}",
                kind.extension()
            )));
        }

        Ok(root.join(&self.course).join(&self.module).join(&self.filename))
    }
}

impl std::fmt::Display for MediaPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.course, self.module, self.filename)
    }
}
