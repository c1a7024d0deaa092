//! Course catalog types.
//!
//! A catalog is a plain ordered tree: [`Course`] → [`Module`] → [`Video`].
//! It is produced by value on every scan and never shared or mutated
//! afterwards.

use serde::{Deserialize, Serialize};

/// A single playable lesson file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Base name on disk, e.g. `01 Intro.mp4`.
    pub filename: String,
    /// Filename without its extension.
    pub title: String,
    /// Whether a sibling `<title>.srt` exists.
    #[serde(rename = "hasSubtitles")]
    pub has_subtitles: bool,
    /// `course/module/filename`, always slash-separated.
    pub path: String,
}

/// A directory of videos inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    /// `course/module`.
    pub path: String,
    pub videos: Vec<Video>,
}

/// A top-level directory of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub path: String,
    pub modules: Vec<Module>,
}

/// Response envelope for `GET /api/courses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Total number of videos across all courses.
    pub fn video_count(&self) -> usize {
        self.videos().count()
    }

    /// Iterate over every video in catalog order.
    pub fn videos(&self) -> impl Iterator<Item = &Video> {
        self.courses
            .iter()
            .flat_map(|c| c.modules.iter())
            .flat_map(|m| m.videos.iter())
    }
}

/// Join catalog path components with `/`, independent of the host separator.
pub fn join_catalog_path(parts: &[&str]) -> String {
    parts.join("/")
}
