use crate::schema::HandleConfig;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Check field values serde cannot check for us.
pub fn validate(config: &HandleConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    let url = config.server.url.trim();
    if url.is_empty() {
        report.error("server.url", "Server URL is empty");
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        report.error("server.url", format!("Unsupported scheme in {:?}", url));
    } else if url.starts_with("http://") && config.server.token.is_some() {
        report.warn("server.url", "Token will be sent over plain HTTP");
    }

    if config.server.timeout_secs == 0 {
        report.error("server.timeoutSecs", "Timeout must be at least one second");
    }
    if config.validation.max_len == 0 {
        report.error("validation.maxLen", "Maximum name length must be positive");
    }
    if config.theme.prompt.is_empty() {
        report.warn("theme.prompt", "Empty prompt; the input line will have no marker");
    }

    report
}
