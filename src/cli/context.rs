//! Command execution context
//!
//! The composition root: merges CLI/env overrides into the loaded config and
//! builds the directory, cache, geocoder and resolver a command needs.

use std::path::PathBuf;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::{CoordinateCache, MemoryCoordinateCache, SqliteCoordinateCache};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{GeocodingClient, Throttle};
use crate::config::Config;
use crate::directory::{ShelterDirectory, open_directory};
use crate::error::{DirectoryError, Result};
use crate::resolver::ShelterResolver;

/// Context for command execution containing merged config and runtime options.
pub struct CommandContext {
    /// Config file contents with CLI/env overrides applied
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    /// Coordinate cache directory override
    cache_dir: Option<PathBuf>,
    /// Use a process-local cache
    no_cache: bool,
}

impl CommandContext {
    /// Load config (defaults if the file is missing) and apply overrides.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid values.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default_at(opts.config_ref())?;
        Ok(Self::with_config(config, opts))
    }

    /// Apply overrides to an already loaded config
    pub fn with_config(mut config: Config, opts: &GlobalOptions) -> Self {
        if let Some(key) = &opts.api_key {
            config.geocoding.api_key = Some(key.clone());
        }
        if let Some(host) = &opts.api_host {
            config.geocoding.api_host = Some(host.clone());
        }
        if let Some(source) = &opts.directory {
            config.directory.source = Some(source.clone());
        }

        Self {
            config,
            format: opts.format,
            cache_dir: opts.cache_dir.clone(),
            no_cache: opts.no_cache,
        }
    }

    /// The configured shelter directory
    pub fn directory(&self) -> Result<Box<dyn ShelterDirectory>> {
        let source = self
            .config
            .directory
            .source
            .as_deref()
            .ok_or(DirectoryError::NotConfigured)?;

        Ok(open_directory(source, self.config.geocoding.timeout())?)
    }

    /// Coordinate cache directory (override or platform default)
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(SqliteCoordinateCache::cache_dir()?),
        }
    }

    /// Open the durable cache, regardless of `--no-cache`
    pub fn sqlite_cache(&self) -> Result<SqliteCoordinateCache> {
        Ok(SqliteCoordinateCache::open_at(&self.cache_dir()?)?)
    }

    /// Cache adapter for a resolution pass
    pub fn coordinate_cache(&self) -> Result<Arc<dyn CoordinateCache>> {
        if self.no_cache {
            log::debug!("Using in-memory coordinate cache");
            return Ok(Arc::new(MemoryCoordinateCache::new()));
        }
        Ok(Arc::new(self.sqlite_cache()?))
    }

    /// Geocoding client built from the merged config
    pub fn geocoder(&self) -> Result<GeocodingClient> {
        let geocoding = &self.config.geocoding;
        GeocodingClient::new(
            geocoding.api_key.clone(),
            geocoding.api_host.as_deref(),
            geocoding.timeout(),
        )
    }

    /// Fully wired resolver
    pub fn resolver(&self) -> Result<ShelterResolver> {
        let geocoding = &self.config.geocoding;

        Ok(
            ShelterResolver::new(self.coordinate_cache()?, Arc::new(self.geocoder()?))
                .with_throttle(Throttle::new(geocoding.min_interval()))
                .with_heuristics(self.config.heuristic_table())
                .with_region_suffix(geocoding.region_suffix.clone())
                .with_progress(progress_bar()),
        )
    }
}

/// Progress bar for live resolutions; indicatif hides it when stderr is not
/// a terminal.
fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
        .map(|style| style.progress_chars("━╸━"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let bar = ProgressBar::new(0).with_style(style);
    bar.set_prefix("Geocoding");
    bar
}
