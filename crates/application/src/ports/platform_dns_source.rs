use async_trait::async_trait;
use hostdns_domain::{DomainError, PlatformResolver};

/// Host facility reporting split DNS resolvers (e.g. `scutil --dns` on macOS).
#[async_trait]
pub trait PlatformDnsSource: Send + Sync {
    /// Returns `PlatformUnavailable` when the host has no such facility.
    async fn read_resolvers(&self) -> Result<Vec<PlatformResolver>, DomainError>;

    /// Prefix for the labels of groups built from this source.
    fn source_name(&self) -> &str {
        "platform"
    }
}
