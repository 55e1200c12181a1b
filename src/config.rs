use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::chart::SizeHints;

const APP_NAME: &str = "wakachart";

/// Environment variable that overrides `wakatime.api_key`
pub const API_KEY_ENV: &str = "WAKATIME_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wakatime: WakatimeConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chart: ChartDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakatimeConfig {
    pub api_key: Option<String>,
    pub username: String,
    pub base_url: String,
}

impl Default for WakatimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            username: "current".to_string(),
            base_url: "https://wakatime.com/api/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// JSON registry of `{ "Language": { "color": "#hex" } }`
    pub colors_url: String,
    /// Languages the registry lacks
    pub extra_colors: BTreeMap<String, String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        let mut extra_colors = BTreeMap::new();
        extra_colors.insert("Vue.js".to_string(), "#41b883".to_string());
        extra_colors.insert("Bash".to_string(), "#89e051".to_string());
        Self {
            colors_url: "https://raw.githubusercontent.com/ozh/github-colors/master/colors.json"
                .to_string(),
            extra_colors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("~/.wakachart"),
        }
    }
}

impl StorageConfig {
    /// Storage path with `~` and env vars expanded
    pub fn resolved_path(&self) -> PathBuf {
        let raw = self.path.to_string_lossy();
        match shellexpand::full(&raw) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => self.path.clone(),
        }
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.resolved_path().join("charts")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

/// Applied when a request carries no size of its own
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChartDefaults {
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl ChartDefaults {
    pub fn size(&self) -> SizeHints {
        SizeHints {
            height: self.height,
            width: self.width,
        }
    }
}

impl Config {
    /// API key from the environment, falling back to the config file
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.wakatime.api_key.clone())
    }
}

pub fn load_config() -> Result<Config> {
    confy::load(APP_NAME, None).context("Failed to load configuration")
}

pub fn save_config(config: &Config) -> Result<()> {
    confy::store(APP_NAME, None, config).context("Failed to save configuration")
}

pub fn config_path() -> Result<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).context("Failed to locate configuration")
}
