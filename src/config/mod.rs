//! Configuration management for sheltermap

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::models::GeoCoordinates;
use crate::resolver::{DEFAULT_REGION_SUFFIX, HeuristicTable, Neighborhood};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding service settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Where shelter records are read from
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Offline fallback table
    #[serde(default, skip_serializing_if = "FallbackConfig::is_builtin")]
    pub fallback: FallbackConfig,
}

/// Geocoding service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Service host override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Appended to every address before lookup
    #[serde(default = "default_region_suffix")]
    pub region_suffix: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum spacing between service calls (0 disables throttling)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_region_suffix() -> String {
    DEFAULT_REGION_SUFFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_interval_ms() -> u64 {
    1000
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: None,
            region_suffix: default_region_suffix(),
            timeout_secs: default_timeout_secs(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl GeocodingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Shelter directory settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// JSON file path or `http(s)://` collection URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Offline fallback overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Coordinate used when no neighborhood matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<GeoCoordinates>,

    /// Ordered table replacing the built-in one when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighborhoods: Vec<Neighborhood>,
}

impl FallbackConfig {
    fn is_builtin(&self) -> bool {
        self.default.is_none() && self.neighborhoods.is_empty()
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".sheltermap").join("config.yaml"))
    }

    /// The override if given, otherwise the default path
    pub fn path_or_default(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration; a missing file is an error.
    pub fn load_at(path: Option<&Path>) -> Result<Self> {
        Self::load_from(&Self::path_or_default(path)?)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default_at(path: Option<&Path>) -> Result<Self> {
        let path = Self::path_or_default(path)?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the override or default path
    pub fn save_at(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = Self::path_or_default(path)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Carries an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Reject values the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.geocoding.timeout_secs == 0 {
            return Err(ConfigError::Invalid("geocoding.timeout_secs must be > 0".to_string()).into());
        }

        if let Some(default) = &self.fallback.default
            && !default.is_valid()
        {
            return Err(ConfigError::Invalid(format!(
                "fallback.default is out of range: {}",
                default
            ))
            .into());
        }

        if let Some(bad) = self
            .fallback
            .neighborhoods
            .iter()
            .find(|n| !n.coordinates.is_valid())
        {
            return Err(ConfigError::Invalid(format!(
                "fallback neighborhood {:?} is out of range",
                bad.name
            ))
            .into());
        }

        Ok(())
    }

    /// The heuristic table described by the `fallback` section
    pub fn heuristic_table(&self) -> HeuristicTable {
        let builtin = HeuristicTable::montreal();
        let default = self
            .fallback
            .default
            .unwrap_or_else(|| builtin.default_coordinates());

        if self.fallback.neighborhoods.is_empty() {
            HeuristicTable::new(builtin.neighborhoods().to_vec(), default)
        } else {
            HeuristicTable::new(self.fallback.neighborhoods.clone(), default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.geocoding.api_key.is_none());
        assert_eq!(config.geocoding.region_suffix, "Montreal, QC, Canada");
        assert_eq!(config.geocoding.timeout(), Duration::from_secs(10));
        assert_eq!(config.geocoding.min_interval(), Duration::from_secs(1));
        assert!(config.directory.source.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
geocoding:
  api_key: abc123
directory:
  source: ./shelters.json
"#,
        )
        .unwrap();

        assert_eq!(config.geocoding.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.geocoding.min_interval_ms, 1000);
        assert_eq!(config.directory.source.as_deref(), Some("./shelters.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip_with_permissions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.geocoding.api_key = Some("secret".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(Config::load_at(Some(&path)).is_err());
        assert_eq!(Config::load_or_default_at(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_unparseable_file_is_error_even_with_default_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "geocoding: [not, a, map]").unwrap();

        assert!(Config::load_or_default_at(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_fallback_rejected() {
        let mut config = Config::default();
        config.fallback.default = Some(GeoCoordinates::fixed(95.0, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_neighborhoods_replace_builtin() {
        let config: Config = serde_yaml::from_str(
            r#"
fallback:
  default: { latitude: 45.56, longitude: -73.71 }
  neighborhoods:
    - { name: Chomedey, latitude: 45.54, longitude: -73.75 }
"#,
        )
        .unwrap();

        let table = config.heuristic_table();
        assert_eq!(table.neighborhoods().len(), 1);
        assert!(table.lookup("Boulevard Chomedey").is_some());
        assert!(table.lookup("Verdun").is_none());
        assert_eq!(table.default_coordinates(), GeoCoordinates::fixed(45.56, -73.71));
    }

    #[test]
    fn test_builtin_table_when_unset() {
        let table = Config::default().heuristic_table();
        assert!(table.lookup("Verdun").is_some());
    }
}
