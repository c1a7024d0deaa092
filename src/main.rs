mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use lt_core::config::Config;
use lt_core::scanner::SubtreeLevel;
use lt_core::{Catalog, CatalogScanner, SortOrder};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise use defaults based on the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "lectern=trace,lt_core=trace,lt_server=trace,tower_http=debug".to_string()
        } else {
            "lectern=debug,lt_core=debug,lt_server=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            courses_path,
            static_dir,
            sort_order,
            range_parsing,
        } => {
            let mut config = Config::load_or_default(cli.config.as_deref());

            // CLI flags and environment variables override the file.
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(path) = courses_path {
                config.library.courses_path = path;
            }
            if let Some(dir) = static_dir {
                config.server.static_dir = Some(dir);
            }
            if let Some(order) = sort_order {
                config.library.sort_order = order;
            }
            if let Some(mode) = range_parsing {
                config.library.range_parsing = mode;
            }

            tracing::info!("Starting lectern {}", env!("CARGO_PKG_VERSION"));
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(lt_server::start(config))?;
            Ok(())
        }
        Commands::Scan {
            path,
            json,
            natural,
        } => {
            let config = Config::load_or_default(cli.config.as_deref());
            let root = path.unwrap_or(config.library.courses_path);
            let order = if natural {
                SortOrder::Natural
            } else {
                config.library.sort_order
            };
            scan_library(&root, order, json)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("lectern {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn scan_library(root: &Path, order: SortOrder, json: bool) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("Library root is not a directory: {}", root.display());
    }

    let outcome = CatalogScanner::new(root, order).scan_with_report();
    let catalog = Catalog::new(outcome.courses);

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        println!("Library: {}", root.display());
        for course in &catalog.courses {
            println!("{}", course.name);
            for module in &course.modules {
                println!("  {}", module.name);
                for video in &module.videos {
                    let marker = if video.has_subtitles { " [srt]" } else { "" };
                    println!("    {}{marker}", video.filename);
                }
            }
        }
        println!(
            "\n{} courses, {} videos",
            catalog.courses.len(),
            catalog.video_count()
        );
    }

    for skipped in &outcome.skipped {
        let level = match skipped.level {
            SubtreeLevel::Course => "course",
            SubtreeLevel::Module => "module",
        };
        eprintln!("Skipped {level} {}: {}", skipped.path, skipped.reason);
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Courses path: {}",
        config.library.courses_path.display()
    );
    println!(
        "  Static dir: {}",
        config
            .server
            .static_dir
            .as_deref()
            .map(Path::display)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(none)".into())
    );
    println!("  Sort order: {:?}", config.library.sort_order);
    println!("  Range parsing: {:?}", config.library.range_parsing);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No warnings");
    } else {
        for warning in &warnings {
            println!("⚠ {warning}");
        }
    }

    Ok(())
}
