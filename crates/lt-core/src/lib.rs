//! lt-core: catalog model, scanner, range resolution, path sanitizing,
//! errors and configuration.
//!
//! This crate has no HTTP dependencies. Everything that decides *what* to
//! serve lives here; `lt-server` only decides *how* to write it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ordering;
pub mod paths;
pub mod range;
pub mod scanner;

// Re-export the most commonly used items at the crate root.
pub use catalog::{Catalog, Course, Module, Video};
pub use error::{Error, Result};
pub use ordering::SortOrder;
pub use paths::{MediaKind, MediaPath};
pub use range::{RangeError, RangeParsing, ResolvedRange};
pub use scanner::{CatalogScanner, ScanOutcome};
