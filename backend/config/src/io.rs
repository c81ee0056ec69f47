//! Locating and reading the config file.

use crate::schema::HandleConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the config directory.
/// Priority: `HANDLE_CONFIG_DIR` env > `~/.handle/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HANDLE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".handle"),
        None => PathBuf::from(".handle"),
    }
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<HandleConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(HandleConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: HandleConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("handle-config-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = scratch_dir("missing");
        let config = load_config(&config_file_path(&dir)).await.unwrap();
        assert_eq!(config, HandleConfig::default());
    }

    #[tokio::test]
    async fn test_reads_yaml_file() {
        let dir = scratch_dir("read");
        let path = config_file_path(&dir);
        std::fs::write(&path, "theme:\n  accent: \"#00FF00\"\n").unwrap();
        let config = load_config(&path).await.unwrap();
        assert_eq!(config.theme.accent, "#00FF00");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_invalid_yaml_reports_path() {
        let dir = scratch_dir("invalid");
        let path = config_file_path(&dir);
        std::fs::write(&path, "server: [unclosed").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config YAML"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
