//! Runtime configuration - backend URLs and timings
//!
//! Read once at startup from `~/.contact-tui/config.yaml`. Every key is
//! optional; missing keys fall back to the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONTACT_PATH, DEFAULT_NODE_URL, DEFAULT_PYTHON_URL, DEFAULT_REQUEST_TIMEOUT_MS,
    DEFAULT_STATUS_TTL_MS,
};
use crate::models::Backend;

const CONFIG_DIR: &str = ".contact-tui";
const CONFIG_FILE: &str = "config.yaml";

/// Base URLs of the two interchangeable backends
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendUrls {
    pub node: String,
    pub python: String,
}

impl Default for BackendUrls {
    fn default() -> Self {
        BackendUrls {
            node: String::from(DEFAULT_NODE_URL),
            python: String::from(DEFAULT_PYTHON_URL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backends: BackendUrls,
    pub request_timeout_ms: u64,
    pub status_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backends: BackendUrls::default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            status_ttl_ms: DEFAULT_STATUS_TTL_MS,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location, or defaults if no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a struct
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn base_url(&self, backend: Backend) -> &str {
        match backend {
            Backend::Node => &self.backends.node,
            Backend::Python => &self.backends.python,
        }
    }

    /// Full contact endpoint for the given backend
    pub fn endpoint(&self, backend: Backend) -> String {
        format!(
            "{}{}",
            self.base_url(backend).trim_end_matches('/'),
            CONTACT_PATH
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }
}
