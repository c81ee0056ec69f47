use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use handle_client::{HttpNamingClient, MemoryNamingClient};
use handle_config::ServerConfig;
use handle_core::NamingClient;

/// Names the offline registry treats as belonging to someone else.
const RESERVED_NAMES: &[&str] = &["admin", "root", "charm", "support"];

/// Simulated round trip for the offline registry.
const OFFLINE_LATENCY: Duration = Duration::from_millis(300);

/// Build the naming client for this run.
pub fn build_client(server: &ServerConfig, offline: bool) -> Result<Arc<dyn NamingClient>> {
    if offline {
        info!("Using offline naming registry");
        let client = MemoryNamingClient::new()
            .with_taken(RESERVED_NAMES.iter().copied())
            .with_latency(OFFLINE_LATENCY);
        return Ok(Arc::new(client));
    }

    let mut client =
        HttpNamingClient::new(server.url.as_str(), Duration::from_secs(server.timeout_secs))?;
    if let Some(token) = &server.token {
        client = client.with_token(token.as_str());
    }
    info!(url = %server.url, "Using naming server");
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use handle_core::NamingError;

    #[tokio::test]
    async fn test_offline_client_reserves_names() {
        let client = build_client(&ServerConfig::default(), true).unwrap();
        assert_eq!(client.name(), "memory");
        assert_eq!(client.set_name("admin").await, Err(NamingError::NameTaken));
        assert_eq!(client.set_name("alice").await, Ok("alice".to_string()));
    }

    #[test]
    fn test_online_client_uses_http() {
        let client = build_client(&ServerConfig::default(), false).unwrap();
        assert_eq!(client.name(), "http");
    }
}
