//! Course catalog scanner.
//!
//! Walks a three-level tree (`course/module/video`) under the media root and
//! produces an ordered, pruned [`Course`] list. The scan never fails the
//! caller:
//!
//! - a missing or unreadable root yields an empty catalog;
//! - a course or module directory that cannot be listed is skipped and
//!   recorded in [`ScanOutcome::skipped`], the rest of the scan continues;
//! - modules without videos and courses without modules are pruned.
//!
//! Nothing is cached. Every call re-reads the directory tree, so concurrent
//! scans may see different states of a changing tree, but each result is
//! built from its own listings and is internally consistent.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::catalog::{join_catalog_path, Course, Module, Video};
use crate::ordering::SortOrder;

/// Extensions (lowercase, no dot) that qualify a file as a video.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Extension of sidecar subtitle files.
pub const SUBTITLE_EXTENSION: &str = "srt";

/// What a directory entry points at, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

/// A single named entry from a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Source of directory listings.
///
/// The production implementation is [`FsSource`]; tests substitute fakes to
/// exercise failures that are hard to provoke on a real filesystem.
pub trait EntrySource: Send + Sync {
    /// List the immediate children of `dir`, in any order.
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>>;
}

/// Lists directories on the local filesystem, following symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl EntrySource for FsSource {
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match result {
                Ok(entry) => entry,
                // Failing to read `dir` itself fails the whole listing.
                Err(err) if err.depth() == 0 || err.path() == Some(dir) => {
                    return Err(io::Error::from(err));
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str() else {
                tracing::debug!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
                continue;
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            entries.push(Entry::new(name, kind));
        }

        Ok(entries)
    }
}

/// Which level of the tree a skipped subtree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtreeLevel {
    Course,
    Module,
}

/// A course or module directory omitted because it could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSubtree {
    /// Catalog-relative path (`course` or `course/module`).
    pub path: String,
    pub level: SubtreeLevel,
    pub reason: String,
}

/// Result of a scan: the catalog plus any subtrees that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub courses: Vec<Course>,
    pub skipped: Vec<SkippedSubtree>,
}

/// Builds catalog snapshots for one fixed media root.
#[derive(Debug, Clone)]
pub struct CatalogScanner<S = FsSource> {
    root: PathBuf,
    order: SortOrder,
    source: S,
}

impl CatalogScanner<FsSource> {
    pub fn new(root: impl Into<PathBuf>, order: SortOrder) -> Self {
        Self::with_source(root, order, FsSource)
    }
}

impl<S: EntrySource> CatalogScanner<S> {
    pub fn with_source(root: impl Into<PathBuf>, order: SortOrder, source: S) -> Self {
        Self {
            root: root.into(),
            order,
            source,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Scan the media root and return the ordered catalog.
    pub fn scan(&self) -> Vec<Course> {
        self.scan_with_report().courses
    }

    /// Scan the media root, also reporting which subtrees were skipped.
    pub fn scan_with_report(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        let entries = match self.source.list(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(root = %self.root.display(), "Courses root does not exist");
                return outcome;
            }
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "Failed to list courses root");
                return outcome;
            }
        };

        for course in self.visible(&entries, EntryKind::Dir) {
            if let Some(course) = self.scan_course(course, &mut outcome.skipped) {
                outcome.courses.push(course);
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            courses = outcome.courses.len(),
            skipped = outcome.skipped.len(),
            "Catalog scan complete"
        );

        outcome
    }

    fn scan_course(&self, course: &str, skipped: &mut Vec<SkippedSubtree>) -> Option<Course> {
        let dir = self.root.join(course);
        let entries = self.list_or_skip(&dir, course, SubtreeLevel::Course, skipped)?;

        let modules: Vec<Module> = self
            .visible(&entries, EntryKind::Dir)
            .into_iter()
            .filter_map(|module| self.scan_module(course, module, skipped))
            .collect();

        if modules.is_empty() {
            return None;
        }

        Some(Course {
            name: course.to_owned(),
            path: course.to_owned(),
            modules,
        })
    }

    fn scan_module(
        &self,
        course: &str,
        module: &str,
        skipped: &mut Vec<SkippedSubtree>,
    ) -> Option<Module> {
        let dir = self.root.join(course).join(module);
        let module_path = join_catalog_path(&[course, module]);
        let entries = self.list_or_skip(&dir, &module_path, SubtreeLevel::Module, skipped)?;

        let files = self.visible(&entries, EntryKind::File);
        let names: HashSet<&str> = files.iter().copied().collect();

        let videos: Vec<Video> = files
            .iter()
            .filter_map(|filename| {
                let title = video_title(filename)?;
                let subtitle = format!("{title}.{SUBTITLE_EXTENSION}");
                Some(Video {
                    filename: (*filename).to_owned(),
                    title: title.to_owned(),
                    has_subtitles: names.contains(subtitle.as_str()),
                    path: join_catalog_path(&[course, module, filename]),
                })
            })
            .collect();

        if videos.is_empty() {
            return None;
        }

        Some(Module {
            name: module.to_owned(),
            path: module_path,
            videos,
        })
    }

    /// List a subtree, recording and logging it as skipped on failure.
    fn list_or_skip(
        &self,
        dir: &Path,
        catalog_path: &str,
        level: SubtreeLevel,
        skipped: &mut Vec<SkippedSubtree>,
    ) -> Option<Vec<Entry>> {
        match self.source.list(dir) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(path = %catalog_path, ?level, error = %e, "Skipping unreadable subtree");
                skipped.push(SkippedSubtree {
                    path: catalog_path.to_owned(),
                    level,
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    /// Names of non-hidden entries of `kind`, in the configured order.
    fn visible<'a>(&self, entries: &'a [Entry], kind: EntryKind) -> Vec<&'a str> {
        let mut names: Vec<&str> = entries
            .iter()
            .filter(|e| e.kind == kind && !e.is_hidden())
            .map(|e| e.name.as_str())
            .collect();
        names.sort_by(|a, b| self.order.compare(a, b));
        names
    }
}

/// The title of a video file, or `None` if the extension is not allow-listed.
fn video_title(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    VIDEO_EXTENSIONS.contains(&ext.as_str()).then_some(stem)
}
