//! Configuration module for Minnow
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use minnow::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("minnow.toml")).unwrap();
//! println!("Crawler identity: {}", config.crawler.user_agent);
//! ```

mod parser;
mod types;

// Re-export types
pub use types::{Config, CrawlerConfig, SearchConfig, StorageConfig};

// Re-export parser functions
pub use parser::{load_config, validate_config};
