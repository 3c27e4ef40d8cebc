use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid name server address: {0}")]
    InvalidNameServer(String),

    #[error("Invalid resolver file {path}: {reason}")]
    InvalidResolvConf { path: String, reason: String },

    #[error("Platform split DNS unavailable: {0}")]
    PlatformUnavailable(String),

    #[error("Resolver group '{0}' has no name servers")]
    EmptyResolverGroup(String),

    #[error("Resolver configuration discovery failed: {0}")]
    ConfigDiscoveryFailure(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Upstream {server} unreachable: {reason}")]
    UpstreamUnreachable { server: String, reason: String },

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,

    #[error("No working resolver for query")]
    NoWorkingResolver,

    #[error("Failed to bind {transport} listener on {addr}: {reason}")]
    ListenerBindFailure {
        transport: &'static str,
        addr: String,
        reason: String,
    },

    #[error("{transport} listener failed: {reason}")]
    ListenerFailure {
        transport: &'static str,
        reason: String,
    },
}
