//! `handle-config` — configuration for the username chooser.
//!
//! Provides:
//! - Typed config schema (server, theme, validation, logging)
//! - YAML loading with defaults for a missing file
//! - `${ENV_VAR}` substitution and `HANDLE_*` overrides
//! - Validation and secret redaction

pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{apply_env_overrides_with, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::redact;
pub use schema::{HandleConfig, LoggingConfig, ServerConfig, ThemeConfig, ValidationConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load a config file, resolve env references and apply `HANDLE_*` overrides.
///
/// Does not validate. Callers apply their own overrides and then run
/// [`check_config`] once logging is up.
pub async fn load_resolved(path: &Path) -> Result<HandleConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, &env).context("Failed to resolve env vars in config")?;
    let config: HandleConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    Ok(apply_env_overrides_with(config, &env))
}

/// Validate the final config, logging every finding.
///
/// Fails on the first error. Otherwise returns the report so callers can
/// inspect the warnings.
pub fn check_config(config: &HandleConfig) -> Result<ValidationReport> {
    let mut report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.errors.is_empty() {
        return Err(report.errors.swap_remove(0).into());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, yaml: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("handle-config-lib-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_resolved_does_not_validate() {
        let path = temp_config("unvalidated", "server:\n  url: ftp://example.test\n");
        let config = load_resolved(&path).await.unwrap();
        assert_eq!(config.server.url, "ftp://example.test");
        assert!(check_config(&config).is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_check_config_sees_late_url_change() {
        let mut config = HandleConfig::default();
        assert!(check_config(&config).is_ok());
        config.server.url = "ftp://x".into();
        let err = check_config(&config).unwrap_err();
        assert!(err.to_string().contains("server.url"));
    }

    #[test]
    fn test_check_config_returns_warnings() {
        let mut config = HandleConfig::default();
        config.server.url = "http://localhost:8080".into();
        config.server.token = Some("secret".into());
        let report = check_config(&config).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "server.url");
    }
}
