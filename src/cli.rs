use clap::{Parser, Subcommand};
use lt_core::{RangeParsing, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(author, version, about = "Read-only HTTP server for a local video course library")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Root directory of the course library
        #[arg(long, env = "COURSES_PATH")]
        courses_path: Option<PathBuf>,

        /// Directory with the built frontend
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Ordering of courses, modules and videos (lexical or natural)
        #[arg(long)]
        sort_order: Option<SortOrder>,

        /// Range header handling (strict or lenient)
        #[arg(long)]
        range_parsing: Option<RangeParsing>,
    },

    /// Scan a course library and print the catalog
    Scan {
        /// Library root (defaults to the configured courses path)
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Use digit-aware ordering
        #[arg(long)]
        natural: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
