//! Global CLI options shared across all commands

use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.sheltermap/config.yaml)
    pub config: Option<PathBuf>,

    /// Shelter directory source override
    pub directory: Option<String>,

    /// Geocoding API key override
    pub api_key: Option<String>,

    /// Geocoding service host override
    pub api_host: Option<String>,

    /// Coordinate cache directory override
    pub cache_dir: Option<PathBuf>,

    /// Use a process-local cache instead of the durable one
    pub no_cache: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.as_ref().map(PathBuf::from),
            directory: cli.directory.clone(),
            api_key: cli.api_key.clone(),
            api_host: cli.api_host.clone(),
            cache_dir: cli.cache_dir.as_ref().map(PathBuf::from),
            no_cache: cli.no_cache,
        }
    }

    /// Get config path as `Option<&Path>`.
    pub fn config_ref(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Get cache directory override as `Option<&Path>`.
    pub fn cache_dir_ref(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }
}
