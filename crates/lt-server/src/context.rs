//! Application context shared by all route handlers via Axum state.
//!
//! Everything in here is fixed at startup and read-only afterwards, so the
//! context is cheaply cloneable and needs no locking.

use std::path::Path;
use std::sync::Arc;

use lt_core::config::Config;
use lt_core::{CatalogScanner, RangeParsing};

#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Scanner bound to the configured media root.
    pub scanner: Arc<CatalogScanner>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let scanner = CatalogScanner::new(
            config.library.courses_path.clone(),
            config.library.sort_order,
        );
        Self {
            config: Arc::new(config),
            scanner: Arc::new(scanner),
        }
    }

    /// The media root every request path is joined onto.
    pub fn courses_root(&self) -> &Path {
        self.scanner.root()
    }

    pub fn range_parsing(&self) -> RangeParsing {
        self.config.library.range_parsing
    }
}
