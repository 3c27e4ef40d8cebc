//! UDP transport for upstream queries (RFC 1035 §4.2.1).
//!
//! Each attempt uses a fresh connected socket on an ephemeral port. Replies
//! whose transaction ID differs from the query are discarded and reading
//! continues until the attempt deadline.

use super::{upstream_io_error, upstream_timeout, MAX_DNS_MESSAGE_SIZE};
use bytes::Bytes;
use hostdns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Bytes, DomainError> {
        let response = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| upstream_timeout(self.server_addr))??;

        debug!(
            server = %self.server_addr,
            bytes_received = response.len(),
            "UDP response received"
        );

        Ok(Bytes::from(response))
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr;
        let bind_addr = if server.is_ipv4() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
        } else {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
        socket
            .connect(server)
            .await
            .map_err(|e| upstream_io_error(server, e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| upstream_io_error(server, e))?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let expected_id = message_bytes.get(0..2);
        let mut recv_buf = vec![0u8; MAX_DNS_MESSAGE_SIZE];

        loop {
            let len = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| upstream_io_error(server, e))?;

            if len >= 2 && expected_id.is_some_and(|id| id == &recv_buf[..2]) {
                recv_buf.truncate(len);
                return Ok(recv_buf);
            }

            debug!(server = %server, len, "Ignoring UDP reply with mismatched ID");
        }
    }
}
