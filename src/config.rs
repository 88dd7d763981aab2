use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::tag::{TagScheme, DEFAULT_VERSION, DEFAULT_VERSION_PREFIX};
use crate::error::{AffirmError, Result};
use crate::publish::github::DEFAULT_API_URL;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "affirm.toml";

/// Represents the complete configuration for affirm.
///
/// Contains the tag naming scheme, the git remote to synchronize with and the
/// hosting provider endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

fn default_version_prefix() -> String {
    DEFAULT_VERSION_PREFIX.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Tag naming configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,

    #[serde(default = "default_version")]
    pub default_version: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            version_prefix: default_version_prefix(),
            default_version: default_version(),
        }
    }
}

/// Git remote used to synchronize tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
        }
    }
}

/// GitHub REST API settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
        }
    }
}

impl Config {
    /// Tag scheme described by the `[versioning]` section
    pub fn tag_scheme(&self) -> TagScheme {
        TagScheme::new(
            self.versioning.version_prefix.clone(),
            self.versioning.default_version.clone(),
        )
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        self.tag_scheme().validate()?;
        if self.git.remote.trim().is_empty() {
            return Err(AffirmError::config("git.remote must not be empty"));
        }
        if self.github.api_url.trim().is_empty() {
            return Err(AffirmError::config("github.api_url must not be empty"));
        }
        Ok(())
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| AffirmError::config(format!("Invalid TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `affirm.toml` in current directory
/// 3. `.affirm.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| AffirmError::config(format!("Cannot read '{}': {}", path, e)))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
