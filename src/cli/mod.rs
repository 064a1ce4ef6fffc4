//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod completions;
pub mod context;
pub mod geocode;
pub mod init;
pub mod resolve;
pub mod shelters;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// sheltermap - place homeless-shelter directory records on a map
#[derive(Parser, Debug)]
#[command(name = "sheltermap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json, geojson)
    #[arg(
        long,
        global = true,
        env = "SHELTERMAP_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SHELTERMAP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Shelter directory: JSON file path or http(s) URL
    #[arg(long, global = true, env = "SHELTERMAP_DIRECTORY", hide_env = true)]
    pub directory: Option<String>,

    /// Geocoding API key
    #[arg(long, global = true, env = "SHELTERMAP_API_KEY", hide_env = true)]
    pub api_key: Option<String>,

    /// Geocoding service host (for testing against a local server)
    #[arg(long, global = true, env = "SHELTERMAP_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Coordinate cache directory
    #[arg(long, global = true, env = "SHELTERMAP_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<String>,

    /// Use an in-memory coordinate cache for this run
    #[arg(long, global = true, env = "SHELTERMAP_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "SHELTERMAP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize sheltermap configuration
    Init,

    /// Show configuration, directory and cache status
    Status,

    /// Display version information
    Version,

    /// List shelters in the directory
    Shelters,

    /// Resolve coordinates for every shelter in the directory
    Resolve {
        /// Ignore cached coordinates and resolve every address again
        #[arg(long)]
        refresh: bool,
    },

    /// Resolve a single address
    Geocode {
        /// Street address, as it appears in the directory
        address: String,

        /// Ignore a cached coordinate for this address
        #[arg(long)]
        refresh: bool,
    },

    /// Manage the coordinate cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   sheltermap completion bash > /etc/bash_completion.d/sheltermap
  zsh:    sheltermap completion zsh > \"${fpath[1]}/_sheltermap\"
  fish:   sheltermap completion fish > ~/.config/fish/completions/sheltermap.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// List cached coordinates
    List,
    /// Clear all cached coordinates
    Clear,
    /// Print cache directory path
    Path,
    /// Remove entries for addresses no longer in the directory
    Prune,
}
