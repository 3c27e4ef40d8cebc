pub mod tcp;
pub mod udp;

use bytes::Bytes;
use hostdns_domain::{DnsProtocol, DomainError};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Largest DNS message either transport can carry.
pub const MAX_DNS_MESSAGE_SIZE: usize = 65535;

/// One query, one response, against a single upstream address.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Bytes, DomainError> {
        match self {
            Self::Udp(t) => t.send(message_bytes, timeout).await,
            Self::Tcp(t) => t.send(message_bytes, timeout).await,
        }
    }
}

pub fn create_transport(protocol: DnsProtocol, server_addr: SocketAddr) -> Transport {
    match protocol {
        DnsProtocol::Udp => Transport::Udp(udp::UdpTransport::new(server_addr)),
        DnsProtocol::Tcp => Transport::Tcp(tcp::TcpTransport::new(server_addr)),
    }
}

pub(crate) fn upstream_io_error(server: SocketAddr, e: io::Error) -> DomainError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server.to_string(),
        },
        _ => DomainError::UpstreamUnreachable {
            server: server.to_string(),
            reason: e.to_string(),
        },
    }
}

pub(crate) fn upstream_timeout(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}
