//! # CLI Configuration
//!
//! Where the catalog lives, where the cart is kept, and search/paging knobs.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_API_URL=http://localhost:3000/api/v1                     │
//! │     SHOPFRONT_DATA_DIR=/tmp/shopfront                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.shopfront/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     public catalog, platform data dir, 15 per page, 500 ms debounce    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! api_url = "https://api.escuelajs.co/api/v1"
//! data_dir = "/home/me/.local/share/shopfront"
//! page_size = 15
//! search_debounce_ms = 500
//! http_timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use shopfront_api::{ApiConfig, Debouncer, DEFAULT_API_URL};
use shopfront_core::validation::{validate_delay_ms, validate_page_size};
use shopfront_core::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS};
use shopfront_store::StoreConfig;

use crate::error::{CliError, CliResult};

const CONFIG_FILE_NAME: &str = "shopfront.toml";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog REST root.
    pub api_url: String,

    /// Cart snapshot directory. `None` uses the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Products per page.
    pub page_size: u32,

    /// Quiet period before a search query is sent.
    pub search_debounce_ms: i64,

    /// Whole-request HTTP timeout.
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS as i64,
            http_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and the process environment.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Loads configuration with an explicit environment lookup.
    ///
    /// An explicit `config_path` must exist; the default location may be
    /// absent.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    AppConfig::default()
                }
                None => AppConfig::default(),
            },
        };

        config.apply_env_overrides(env);
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
    }

    /// Applies `SHOPFRONT_*` overrides. Unparseable numbers are ignored with
    /// a warning.
    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("SHOPFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api_url = url;
        }

        if let Some(dir) = env("SHOPFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(value) = env("SHOPFRONT_PAGE_SIZE") {
            match value.parse() {
                Ok(size) => self.page_size = size,
                Err(_) => warn!(value = %value, "Ignoring invalid SHOPFRONT_PAGE_SIZE"),
            }
        }

        if let Some(value) = env("SHOPFRONT_SEARCH_DEBOUNCE_MS") {
            match value.parse() {
                Ok(ms) => self.search_debounce_ms = ms,
                Err(_) => warn!(value = %value, "Ignoring invalid SHOPFRONT_SEARCH_DEBOUNCE_MS"),
            }
        }

        if let Some(value) = env("SHOPFRONT_HTTP_TIMEOUT_SECS") {
            match value.parse() {
                Ok(secs) => self.http_timeout_secs = secs,
                Err(_) => warn!(value = %value, "Ignoring invalid SHOPFRONT_HTTP_TIMEOUT_SECS"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        ApiConfig::new(&self.api_url)?;
        validate_page_size(self.page_size)?;
        validate_delay_ms(self.search_debounce_ms)?;

        if self.http_timeout_secs == 0 {
            return Err(CliError::config("http_timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    // =========================================================================
    // Derived Configs
    // =========================================================================

    pub fn api_config(&self) -> CliResult<ApiConfig> {
        Ok(ApiConfig::new(&self.api_url)?.timeout(Duration::from_secs(self.http_timeout_secs)))
    }

    /// Store config rooted at `data_dir` or the platform data directory.
    pub fn store_config(&self) -> CliResult<StoreConfig> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| CliError::config("Could not determine app data directory"))?,
        };
        Ok(StoreConfig::new(data_dir))
    }

    pub fn debouncer(&self) -> CliResult<Debouncer> {
        Ok(Debouncer::from_millis(self.search_debounce_ms)?)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shopfront", "shopfront")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("shopfront.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_url, "https://api.escuelajs.co/api/v1");
        assert_eq!(config.page_size, 15);
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[test]
    fn test_file_then_env_precedence() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
                api_url = "http://file.example/api/v1"
                page_size = 20
                search_debounce_ms = 250
            "#,
        );

        let config = AppConfig::load_with(
            Some(path),
            env_of(&[
                ("SHOPFRONT_API_URL", "http://env.example/api/v1"),
                ("SHOPFRONT_DATA_DIR", "/tmp/shopfront-test"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_url, "http://env.example/api/v1");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/shopfront-test")));
    }

    #[test]
    fn test_invalid_env_numbers_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let config = AppConfig::load_with(
            Some(path),
            env_of(&[("SHOPFRONT_PAGE_SIZE", "lots"), ("SHOPFRONT_HTTP_TIMEOUT_SECS", "3")]),
        )
        .unwrap();

        assert_eq!(config.page_size, 15);
        assert_eq!(config.http_timeout_secs, 3);
    }

    #[test]
    fn test_negative_debounce_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "search_debounce_ms = -5");

        let err = AppConfig::load_with(Some(path), env_of(&[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_bad_url_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"api_url = "not a url""#);

        let err = AppConfig::load_with(Some(path), env_of(&[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err =
            AppConfig::load_with(Some(dir.path().join("nope.toml")), env_of(&[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_store_config_uses_data_dir() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/cart")),
            ..AppConfig::default()
        };
        let store = config.store_config().unwrap();
        assert_eq!(store.snapshot_path(), PathBuf::from("/srv/cart/cart.json"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("api_url"));
        assert_eq!(toml::from_str::<AppConfig>(&text).unwrap(), config);
    }
}
