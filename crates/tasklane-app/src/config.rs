use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use tasklane_core::ViewPreferences;
use tasklane_store_rest::RestConfig;

const CONFIG_DIR: &str = ".tasklane";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_TABLE: &str = "todos";

/// Top-level configuration loaded from `.tasklane/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Remote store connection, if configured.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
    /// Initial sort/filter preferences.
    #[serde(default)]
    pub view: ViewPreferences,
}

impl ProjectConfig {
    /// Path of the configuration file under `dir`.
    pub fn path_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `dir`, falling back to defaults when the file is absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let config_path = Self::path_in(dir);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", config_path.display()))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error for malformed TOML or invalid values.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Remote settings, required by commands that talk to the store.
    ///
    /// # Errors
    /// Returns an error if no `[remote]` section is configured.
    pub fn remote(&self) -> Result<&RemoteConfig> {
        self.remote
            .as_ref()
            .ok_or_else(|| anyhow!("no [remote] section in {CONFIG_DIR}/{CONFIG_FILE}"))
    }

    fn validate(&self) -> Result<()> {
        self.remote.as_ref().map_or(Ok(()), RemoteConfig::validate)
    }
}

/// `[remote]` block.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Project base URL.
    pub url: String,
    /// Public API key.
    pub api_key: String,
    /// Session token of the signed-in user.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Table holding task rows.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_owned()
}

impl RemoteConfig {
    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            bail!("remote.url must not be empty");
        }
        if self.api_key.trim().is_empty() {
            bail!("remote.api_key must not be empty");
        }
        if self.table.trim().is_empty() {
            bail!("remote.table must not be empty");
        }
        Ok(())
    }

    /// Convert into store connection settings.
    #[must_use]
    pub fn to_rest_config(&self) -> RestConfig {
        RestConfig {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
            table: self.table.clone(),
        }
    }
}
