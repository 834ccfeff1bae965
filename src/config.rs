//! Configuration management for blogdb
//!
//! Resolves where the blog store lives and how the tools log. Values come
//! from an optional TOML file and can be overridden on the command line.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this configuration was read from, if any (not deserialized)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Blog store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// How long to wait on a locked database before failing (milliseconds)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_store_path() -> PathBuf {
    PathBuf::from("./blog.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl StoreConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Config {
    /// Default location of the config file in the platform config directory
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "blogdb", "blogdb")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// config file is read when present; otherwise built-in defaults apply.
    /// Nothing is ever written to disk.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.config_path = Some(path.to_path_buf());
        debug!("Configuration read from {:?}", path);
        Ok(config)
    }

    /// Override the store path (e.g. from `--db`)
    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store.path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_blog_db() {
        let config = Config::default();
        assert_eq!(config.store.path, PathBuf::from("./blog.db"));
        assert_eq!(config.store.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "warn");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store]\npath = \"/srv/blog/posts.db\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/srv/blog/posts.db"));
        assert_eq!(config.store.busy_timeout_ms, 5000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store\npath = 3").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn command_line_path_overrides_file() {
        let config = Config::default().with_store_path(Some(PathBuf::from("other.db")));
        assert_eq!(config.store.path, PathBuf::from("other.db"));

        let config = config.with_store_path(None);
        assert_eq!(config.store.path, PathBuf::from("other.db"));
    }
}
