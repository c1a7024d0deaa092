//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates a temporary media root, a config
//! pointing at it, and the full [`AppContext`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use lt_core::config::Config;
use lt_server::context::AppContext;
use lt_server::router::build_router;
use tempfile::TempDir;

/// Test harness wrapping an [`AppContext`] backed by a temporary library.
pub struct TestHarness {
    pub ctx: AppContext,
    pub media: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a new harness, letting the caller adjust the configuration
    /// after the media root has been filled in.
    pub fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let media = tempfile::tempdir().expect("failed to create media root");

        let mut config = Config::default();
        config.library.courses_path = media.path().to_path_buf();
        config.server.static_dir = None;
        configure(&mut config);

        Self {
            ctx: AppContext::new(config),
            media,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(|_| {}).await
    }

    /// Start an Axum server with an adjusted config on a random port.
    pub async fn with_server_config(configure: impl FnOnce(&mut Config)) -> (Self, SocketAddr) {
        let harness = Self::with_config(configure);
        let app = build_router(harness.ctx.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn root(&self) -> &Path {
        self.media.path()
    }

    /// Write a file under the media root, creating parent directories.
    pub fn add_file(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(&path, contents).expect("failed to write fixture file");
        path
    }

    /// Write a video of `len` patterned bytes and return its contents.
    pub fn add_video(&self, course: &str, module: &str, filename: &str, len: usize) -> Vec<u8> {
        let data = patterned(len);
        self.add_file(&format!("{course}/{module}/{filename}"), &data);
        data
    }

    pub fn add_dir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(&path).expect("failed to create dir");
        path
    }
}

/// Bytes whose value depends on their offset, so slices are distinguishable.
pub fn patterned(len: usize) -> Vec<u8> {
    (0..=255u8).cycle().take(len).collect()
}

/// Percent-encode the characters that appear in fixture names.
pub fn encode(segment: &str) -> String {
    segment.replace('%', "%25").replace(' ', "%20").replace('#', "%23")
}

/// Build a URL for a media endpoint (`video` or `subtitles`).
pub fn media_url(addr: SocketAddr, endpoint: &str, course: &str, module: &str, file: &str) -> String {
    format!(
        "http://{addr}/api/{endpoint}/{}/{}/{}",
        encode(course),
        encode(module),
        encode(file)
    )
}
