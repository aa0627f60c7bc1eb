//! Configuration for deskctl
//!
//! Settings are layered: built-in defaults, then an optional TOML file in
//! the user's config directory (or an explicit `--config` path), then
//! `DESKCTL_*` environment variables. Example file:
//!
//! ```toml
//! [api]
//! base_url = "https://helpdesk.example.com/api/"
//! timeout_secs = 30
//! ```

use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration, layering file and environment over defaults
    ///
    /// A missing file is fine unless the path was given explicitly.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url.clone())
            .map_err(|e| DeskError::Config(e.to_string()))?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)
            .map_err(|e| DeskError::Config(e.to_string()))?;

        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(DeskError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        } else if let Some(default_path) = Self::default_path() {
            builder = builder.add_source(config::File::from(default_path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DESKCTL")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| DeskError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| DeskError::Config(e.to_string()))
    }

    /// Load from the default locations, falling back to defaults on a
    /// missing file
    pub fn load_or_default() -> Result<Self> {
        Self::load(None)
    }

    /// Default config file location under the user's config directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "deskctl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://desk.example.com/api/\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://desk.example.com/api/");
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 10\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(config.api.timeout_secs, 10);
    }
}
