//! Configuration module for Link-Spider
//!
//! This module handles loading, parsing, and validating the TOML configuration
//! file and the seed list it points to.
//!
//! # Example
//!
//! ```no_run
//! use link_spider::config::{load_config, load_seeds};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! let seeds = load_seeds(&config.seed_file_path().unwrap()).unwrap();
//! println!("Crawling from {} seeds", seeds.len());
//! ```

mod parser;
mod seeds;
mod types;
mod validation;

// Re-export types
pub use types::{Config, Credentials, FetcherConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, expand_tilde, load_config, load_config_with_hash};
pub use seeds::{load_seeds, parse_seeds};
