//! Minnow main entry point
//!
//! Command-line interface for the Minnow search engine: crawl pages into
//! the document store, query them, get autocomplete suggestions, or patch
//! a stored document.

use clap::{Parser, Subcommand};
use minnow::config::{load_config, Config};
use minnow::rank::SqliteRankBackend;
use minnow::search::{DocumentPatch, SearchEngine, SearchService};
use minnow::storage::SqliteStore;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Minnow: a minimal crawl-and-serve web search engine
#[derive(Parser, Debug)]
#[command(name = "minnow")]
#[command(version = "1.0.0")]
#[command(about = "A minimal crawl-and-serve web search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl pages starting from a seed URL
    Crawl {
        /// The URL to start crawling from
        seed_url: String,

        /// Page budget for this run (configured default when omitted)
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Search stored documents
    Search {
        /// The query text
        query: String,
    },

    /// Suggest document titles for a prefix
    Autocomplete {
        /// The title prefix
        prefix: String,

        /// Maximum number of suggestions (configured default when omitted)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Update fields of a stored document
    Update {
        /// The document's URL key
        url: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New snippet
        #[arg(long)]
        snippet: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// New score
        #[arg(long)]
        score: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let db_path = config.storage.database_path.clone();
    let store = SqliteStore::new(Path::new(&db_path))?;
    let rank_backend = SqliteRankBackend::new(Path::new(&db_path))?;

    let service = SearchService::new(config, Arc::new(Mutex::new(store)), rank_backend);

    match cli.command {
        Command::Crawl {
            seed_url,
            max_pages,
        } => {
            let outcome = service.crawl(&seed_url, max_pages).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Search { query } => {
            service.warm_up();
            let response = service.search(&query).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Autocomplete { prefix, limit } => {
            service.warm_up();
            let response = service.autocomplete(&prefix, limit.unwrap_or(0)).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Update {
            url,
            title,
            snippet,
            content,
            score,
        } => {
            let patch = DocumentPatch {
                title,
                snippet,
                content,
                score,
            };
            let field_mask = patch_field_mask(&patch);
            let updated = service.update_document(&url, &patch, &field_mask).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
    }

    Ok(())
}

/// Derives the field mask from the fields actually present in a patch
fn patch_field_mask(patch: &DocumentPatch) -> Vec<String> {
    let mut mask = Vec::new();
    if patch.title.is_some() {
        mask.push("title".to_string());
    }
    if patch.snippet.is_some() {
        mask.push("snippet".to_string());
    }
    if patch.content.is_some() {
        mask.push("content".to_string());
    }
    if patch.score.is_some() {
        mask.push("score".to_string());
    }
    mask
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("minnow=info,warn"),
            1 => EnvFilter::new("minnow=debug,info"),
            2 => EnvFilter::new("minnow=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
