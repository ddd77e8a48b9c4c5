//! catalog-search: rank a product catalog against search queries.

use anyhow::Context;
use catalog_search::{load_catalog_json, Product, SearchConfig, SearchEngine};
use catalog_telemetry::{TelemetryConfig, Timer};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod output;

use output::Status;

/// Search a product catalog by code or description
#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Search configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more queries against a catalog
    Search {
        /// Queries to run
        #[arg(required = true)]
        queries: Vec<String>,

        /// Catalog file (JSON array of products)
        #[arg(long)]
        catalog: PathBuf,

        /// Maximum results per query (overrides the config file)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read queries from stdin, one per line
    Repl {
        /// Catalog file (JSON array of products)
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        catalog_telemetry::init_with_config(TelemetryConfig::verbose())
    } else {
        catalog_telemetry::init()
    };
    if let Err(e) = telemetry {
        Status::warning(e);
    }

    let result = match cli.command {
        Commands::Search { queries, catalog, limit, json } => {
            run_search(&queries, &catalog, cli.config.as_deref(), limit, json)
        }
        Commands::Repl { catalog } => run_repl(&catalog, cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn load_catalog(path: &Path) -> anyhow::Result<Vec<Product>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = load_catalog_json(&content)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

fn build_engine(
    catalog: &Path,
    config: Option<&Path>,
    limit: Option<usize>,
) -> anyhow::Result<SearchEngine<Product>> {
    let mut config = SearchConfig::load(config).context("Failed to load search configuration")?;
    if let Some(limit) = limit {
        config.max_results = limit;
    }
    Ok(SearchEngine::new(load_catalog(catalog)?, config))
}

fn run_search(
    queries: &[String],
    catalog: &Path,
    config: Option<&Path>,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let mut engine = build_engine(catalog, config, limit)?;

    if json {
        let mut report = serde_json::Map::new();
        for query in queries {
            let results = engine.search(query);
            report.insert(query.clone(), serde_json::to_value(&results)?);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for query in queries {
        let timer = Timer::start("search");
        let results = engine.search(query);
        output::print_results(query, &results, timer.stop());
    }
    Ok(())
}

fn run_repl(catalog: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let mut engine = build_engine(catalog, config, None)?;
    Status::catalog_loaded(engine.catalog().len());
    Status::info("Type a query, :clear, :reload or :quit");

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":clear" => {
                engine.clear_cache();
                Status::cache_cleared();
            }
            ":reload" => match load_catalog(catalog) {
                Ok(products) => {
                    engine.replace_catalog(products);
                    Status::catalog_loaded(engine.catalog().len());
                }
                Err(e) => Status::error(format!("{e:#}")),
            },
            query => {
                let timer = Timer::start("search");
                let results = engine.search(query);
                output::print_results(query, &results, timer.stop());
            }
        }
    }
    Ok(())
}
