//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API location, request timeout, which token store to
//! use, and the last email that signed in.
//!
//! Configuration is stored at `~/.config/signin/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for config/data directory paths
pub const APP_NAME: &str = "signin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://reqres.in";

/// Default path of the login endpoint, appended to the API host.
pub const DEFAULT_LOGIN_PATH: &str = "/api/login";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variables that override the file configuration
pub const ENV_API_URL: &str = "SIGNIN_API_URL";
pub const ENV_LOGIN_PATH: &str = "SIGNIN_LOGIN_PATH";
pub const ENV_EMAIL: &str = "SIGNIN_EMAIL";

/// Where the auth token is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// JSON files in the data directory
    #[default]
    File,
    /// OS keychain
    Keyring,
    /// Process memory only; nothing survives exit
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub login_path: String,
    pub request_timeout_secs: u64,
    pub token_store: TokenStoreKind,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token_store: TokenStoreKind::default(),
            last_email: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path, falling back to defaults when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let mut config: Self = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            if config.request_timeout_secs == 0 {
                warn!("request_timeout_secs must be positive, using the default");
                config.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
            }
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(path) = lookup(ENV_LOGIN_PATH) {
            self.login_path = path;
        }
        if let Some(email) = lookup(ENV_EMAIL) {
            self.last_email = Some(email);
        }
    }

    /// Full URL of the login endpoint
    pub fn login_url(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        if self.login_path.starts_with('/') {
            format!("{}{}", base, self.login_path)
        } else {
            format!("{}/{}", base, self.login_path)
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for persisted tokens and log files
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

// ============================================================================
// Tests
// ============================================================================
