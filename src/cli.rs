//! Command-line arguments shared by blog-insert and blog-select

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::config::Config;

/// Where to find the store and its configuration
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Path to the SQLite store (overrides the config file)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Read configuration from this TOML file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl StoreArgs {
    /// Load the config file and apply command-line overrides
    pub fn resolve(&self) -> Result<Config> {
        let config = Config::load(self.config.as_deref())?;
        Ok(config.with_store_path(self.db.clone()))
    }
}

/// How blog-select prints posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<id> | <author> | <title>` line per post
    #[default]
    Text,
    /// A JSON array with every column of every post
    Json,
}
