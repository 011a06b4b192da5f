use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "utility.toml";

/// Name of the per-user configuration file inside the user config directory.
pub const USER_CONFIG_FILE: &str = ".utility.toml";

/// Represents the complete configuration for utility.
///
/// Contains the AWS connection settings used by the pipeline commands and the
/// chart update options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub charts: ChartsConfig,
}

/// Connection settings for the pipeline service.
///
/// Credentials are never read from here; they come from the environment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AwsConfig {
    /// Fallback region when the environment does not provide one.
    #[serde(default)]
    pub region: Option<String>,

    /// Override for the service endpoint, e.g. a local emulator.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_update_app_version() -> bool {
    true
}

/// Configuration for `update-charts`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChartsConfig {
    #[serde(default = "default_update_app_version")]
    pub update_app_version: bool,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        ChartsConfig {
            update_app_version: default_update_app_version(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `utility.toml` in current directory
/// 3. `.utility.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
