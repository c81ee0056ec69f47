use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use handle_core::{NamingClient, NamingError};

/// In-memory naming registry.
///
/// Names passed to `with_taken` belong to other accounts. A successful claim
/// releases the name this account held before.
pub struct MemoryNamingClient {
    registry: Mutex<Registry>,
    latency: Duration,
    fail_with: Option<NamingError>,
}

#[derive(Default)]
struct Registry {
    taken: HashSet<String>,
    current: Option<String>,
}

impl MemoryNamingClient {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            latency: Duration::ZERO,
            fail_with: None,
        }
    }

    pub fn with_taken<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let taken = names.into_iter().map(Into::into).collect();
        Self {
            registry: Mutex::new(Registry {
                taken,
                current: None,
            }),
            ..self
        }
    }

    /// Delay every call, to make the in-flight state observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every call with `error`.
    pub fn failing_with(mut self, error: NamingError) -> Self {
        self.fail_with = Some(error);
        self
    }

    pub async fn current(&self) -> Option<String> {
        self.registry.lock().await.current.clone()
    }
}

impl Default for MemoryNamingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NamingClient for MemoryNamingClient {
    fn name(&self) -> &str {
        "memory"
    }

    async fn set_name(&self, name: &str) -> Result<String, NamingError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        let mut registry = self.registry.lock().await;
        if registry.current.as_deref() == Some(name) {
            return Ok(name.to_string());
        }
        if registry.taken.contains(name) {
            debug!(name = %name, "Name already claimed");
            return Err(NamingError::NameTaken);
        }

        if let Some(previous) = registry.current.take() {
            registry.taken.remove(&previous);
        }
        registry.taken.insert(name.to_string());
        registry.current = Some(name.to_string());
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_claims_free_name() {
        let client = MemoryNamingClient::new();
        assert_eq!(client.set_name("alice").await, Ok("alice".to_string()));
        assert_eq!(client.current().await.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_taken_name_rejected() {
        let client = MemoryNamingClient::new().with_taken(["alice"]);
        assert_eq!(client.set_name("alice").await, Err(NamingError::NameTaken));
        assert!(client.current().await.is_none());
    }

    #[tokio::test]
    async fn test_reclaiming_own_name_succeeds() {
        let client = MemoryNamingClient::new();
        client.set_name("alice").await.unwrap();
        assert_eq!(client.set_name("alice").await, Ok("alice".to_string()));
    }

    #[tokio::test]
    async fn test_rename_releases_previous() {
        let client = MemoryNamingClient::new();
        client.set_name("alice").await.unwrap();
        client.set_name("bob").await.unwrap();
        assert_eq!(client.current().await.as_deref(), Some("bob"));
        // "alice" is free again
        client.set_name("alice").await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = MemoryNamingClient::new().failing_with(NamingError::Other("down".into()));
        assert_eq!(
            client.set_name("alice").await,
            Err(NamingError::Other("down".into()))
        );
    }
}
