use async_trait::async_trait;

use crate::error::NamingError;

/// Remote service that owns account usernames.
///
/// Implementations are called from a detached task, so they must be shareable
/// across threads. Timeouts are the implementation's concern.
#[async_trait]
pub trait NamingClient: Send + Sync {
    /// Backend name for logs (e.g., "http", "memory").
    fn name(&self) -> &str;

    /// Claim `name` for the current account and return the name now on record.
    async fn set_name(&self, name: &str) -> Result<String, NamingError>;
}
