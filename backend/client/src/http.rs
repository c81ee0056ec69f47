use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use handle_core::{NamingClient, NamingError};

/// Naming client backed by the account server's HTTP API.
pub struct HttpNamingClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpNamingClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/bio/name", self.base_url)
    }
}

#[derive(Serialize)]
struct SetNameRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct SetNameResponse {
    name: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[async_trait]
impl NamingClient for HttpNamingClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn set_name(&self, name: &str) -> Result<String, NamingError> {
        let start = Instant::now();
        debug!(url = %self.endpoint(), "Sending set-name request");

        let mut request = self.client.post(self.endpoint()).json(&SetNameRequest { name });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NamingError::Other(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NamingError::Other(format!("failed to read response: {}", e)))?;

        debug!(
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Set-name response received"
        );

        classify_response(status, name, &body)
    }
}

/// Map a set-name response onto the naming error taxonomy.
pub(crate) fn classify_response(
    status: StatusCode,
    requested: &str,
    body: &str,
) -> Result<String, NamingError> {
    match status {
        StatusCode::OK | StatusCode::CREATED => {
            let parsed: SetNameResponse = serde_json::from_str(body).map_err(|e| {
                NamingError::Assertion(format!("undecodable set-name response: {}", e))
            })?;
            if parsed.name != requested {
                return Err(NamingError::Assertion(format!(
                    "server recorded {:?} instead of {:?}",
                    parsed.name, requested
                )));
            }
            Ok(parsed.name)
        }
        StatusCode::CONFLICT => Err(NamingError::NameTaken),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(NamingError::InvalidName(error_message(status, body)))
        }
        _ => Err(NamingError::Other(format!(
            "server returned {}: {}",
            status.as_u16(),
            error_message(status, body)
        ))),
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_returns_recorded_name() {
        let result = classify_response(StatusCode::OK, "alice", r#"{"name":"alice"}"#);
        assert_eq!(result, Ok("alice".to_string()));
    }

    #[test]
    fn test_conflict_is_name_taken() {
        let result = classify_response(StatusCode::CONFLICT, "alice", "");
        assert_eq!(result, Err(NamingError::NameTaken));
    }

    #[test]
    fn test_unprocessable_is_invalid_with_server_message() {
        let result = classify_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "a",
            r#"{"error":"name too short"}"#,
        );
        assert_eq!(result, Err(NamingError::InvalidName("name too short".into())));
    }

    #[test]
    fn test_bad_request_without_body_uses_reason() {
        let result = classify_response(StatusCode::BAD_REQUEST, "a", "  ");
        assert_eq!(result, Err(NamingError::InvalidName("Bad Request".into())));
    }

    #[test]
    fn test_server_error_is_other() {
        let result = classify_response(StatusCode::INTERNAL_SERVER_ERROR, "alice", "boom");
        assert_eq!(
            result,
            Err(NamingError::Other("server returned 500: boom".into()))
        );
    }

    #[test]
    fn test_malformed_ok_body_is_assertion() {
        let result = classify_response(StatusCode::OK, "alice", "not json");
        assert!(matches!(result, Err(NamingError::Assertion(_))));
    }

    #[test]
    fn test_mismatched_name_is_assertion() {
        let result = classify_response(StatusCode::OK, "alice", r#"{"name":"bob"}"#);
        assert!(matches!(result, Err(NamingError::Assertion(_))));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client =
            HttpNamingClient::new("https://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/v1/bio/name");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_other() {
        let client =
            HttpNamingClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        let result = client.set_name("alice").await;
        assert!(matches!(result, Err(NamingError::Other(_))));
    }
}
