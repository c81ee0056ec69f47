//! Typed configuration for the username chooser, deserialized from YAML.

use std::path::PathBuf;

use handle_core::DEFAULT_MAX_NAME_LEN;
use serde::{Deserialize, Serialize};

/// Default account server.
pub const DEFAULT_SERVER_URL: &str = "https://cloud.charm.sh";

/// Default request timeout for the naming service.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandleConfig {
    pub server: ServerConfig,
    pub theme: ThemeConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

/// Naming service connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Screen colors and text. Colors are `#RRGGBB`, an ANSI index, or a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub accent: String,
    pub inactive: String,
    pub prompt: String,
    pub placeholder: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#EE6FF8".to_string(),
            inactive: "238".to_string(),
            prompt: "> ".to_string(),
            placeholder: "divagurl2000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub max_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling log file. Defaults to `<config dir>/logs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
