//! # Configuration
//!
//! Application configuration, loaded from an optional YAML file and then
//! overridden from the environment.
//!
//! ## YAML Format
//!
//! ```yaml
//! api:
//!   base_url: "http://192.168.0.243:8000/api"
//!   timeout_ms: 10000
//! list:
//!   page_size: 20
//!   max_pages: 10
//! category_overrides:
//!   - name: "ocio"
//!     icon: gamepad-2
//!     color: fuchsia500
//! ```
//!
//! Every section is optional; missing keys take the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::services::category_theme::CategoryPresentationEntry;

pub const BASE_URL_ENV: &str = "EXPENSY_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "EXPENSY_API_TIMEOUT_MS";

const DEFAULT_BASE_URL: &str = "http://192.168.0.243:8000/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid EXPENSY_API_TIMEOUT_MS value '{0}': expected milliseconds")]
    InvalidTimeout(String),
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout enforced by the transport
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "Expensy".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

/// Transaction list paging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: usize,
    /// Page ceiling after which no more pages are loaded
    pub max_pages: u32,
    /// Simulated latency of the mock page source
    pub load_delay_ms: u64,
    /// Distance from the bottom (px) at which the next page is requested
    pub scroll_threshold_px: f64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_pages: 10,
            load_delay_ms: 1000,
            scroll_threshold_px: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub app: AppInfo,
    pub list: ListConfig,
    /// Extra or replacement category presentation entries
    pub category_overrides: Vec<CategoryPresentationEntry>,
}

impl AppConfig {
    /// Load config from a YAML file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml_content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn apply_overrides(&mut self, base_url: Option<String>, timeout: Option<String>) -> Result<(), ConfigError> {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = base_url.trim().to_string();
        }
        if let Some(timeout) = timeout {
            self.api.timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
        }
        Ok(())
    }
}
