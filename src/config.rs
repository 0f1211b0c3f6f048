// ABOUTME: Configuration structures and parsing for credential file location and registry settings
// ABOUTME: Keeps the netrc path an explicit setting so callers never depend on ambient home lookups

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub netrc: NetrcConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NetrcConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RegistryConfig {
    pub host: String,
    #[serde(default = "default_downloads_path")]
    pub downloads_path: String,
    #[serde(default = "default_platform")]
    pub platform: String,
}

fn default_downloads_path() -> String {
    "downloads/v2".to_string()
}

fn default_platform() -> String {
    "ios".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            host: "api.mapbox.com".to_string(),
            downloads_path: default_downloads_path(),
            platform: default_platform(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            netrc: NetrcConfig {
                path: "~/.netrc".to_string(),
            },
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    pub fn default_config_content() -> &'static str {
        r#"# netrc-token configuration

[netrc]
# Credentials file holding "machine <host> login <user> password <token>" entries
path = "~/.netrc"

[registry]
# Host whose netrc password is used as the download access token
host = "api.mapbox.com"
downloads_path = "downloads/v2"
platform = "ios"
"#
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join("netrc-token").join("config.toml"))
    }

    pub fn expand_path(&mut self) -> Result<()> {
        self.netrc.path = expand_tilde(&self.netrc.path)?;
        Ok(())
    }

    /// Credentials path ready for the loader, with `~/` resolved against the home directory.
    pub fn netrc_path(&self) -> Result<PathBuf> {
        expand_tilde(&self.netrc.path).map(PathBuf::from)
    }

    pub fn validate(&self) -> Result<()> {
        if self.netrc.path.is_empty() {
            anyhow::bail!("netrc path cannot be empty");
        }

        if self.registry.host.is_empty() {
            anyhow::bail!("Registry host cannot be empty");
        }

        if self
            .registry
            .host
            .chars()
            .any(|c| c == '/' || c.is_whitespace())
        {
            anyhow::bail!("Registry host must be a bare host name: {}", self.registry.host);
        }

        Ok(())
    }

    pub fn save_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write default config to: {}", path.display()))?;

        Ok(())
    }
}

fn expand_tilde(path: &str) -> Result<String> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(rest).to_string_lossy().into_owned())
    } else {
        Ok(path.to_string())
    }
}
