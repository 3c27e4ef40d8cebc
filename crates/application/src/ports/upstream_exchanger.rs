use async_trait::async_trait;
use bytes::Bytes;
use hostdns_domain::{DnsProtocol, DomainError, ResolverGroup};
use std::net::SocketAddr;

/// Raw upstream response plus the server and transport that produced it.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub bytes: Bytes,
    pub server: SocketAddr,
    pub protocol: DnsProtocol,
}

impl UpstreamReply {
    pub fn new(bytes: impl Into<Bytes>, server: SocketAddr, protocol: DnsProtocol) -> Self {
        Self {
            bytes: bytes.into(),
            server,
            protocol,
        }
    }
}

#[async_trait]
pub trait UpstreamExchanger: Send + Sync {
    /// Forwards `message` to the servers of `group` and returns the first
    /// reply that arrives without a transport error.
    ///
    /// A DNS-level error code in the reply (NXDOMAIN, REFUSED, ...) is still
    /// a success here.
    async fn exchange(
        &self,
        message: &[u8],
        group: &ResolverGroup,
    ) -> Result<UpstreamReply, DomainError>;
}
