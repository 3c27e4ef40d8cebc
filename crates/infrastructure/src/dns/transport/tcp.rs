//! TCP transport for upstream queries (RFC 1035 §4.2.2, RFC 7766).
//!
//! Messages carry a 2-byte big-endian length prefix. Every attempt opens a
//! fresh connection.

use super::{upstream_io_error, upstream_timeout, MAX_DNS_MESSAGE_SIZE};
use bytes::Bytes;
use hostdns_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Bytes, DomainError> {
        let response = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| upstream_timeout(self.server_addr))??;

        debug!(
            server = %self.server_addr,
            response_len = response.len(),
            "TCP response received"
        );

        Ok(Bytes::from(response))
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr;

        let mut stream = TcpStream::connect(server)
            .await
            .map_err(|e| upstream_io_error(server, e))?;
        stream
            .set_nodelay(true)
            .map_err(|e| upstream_io_error(server, e))?;

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| upstream_io_error(server, e))?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| upstream_io_error(server, e))?
            .ok_or_else(|| DomainError::UpstreamUnreachable {
                server: server.to_string(),
                reason: "connection closed before response".to_string(),
            })
    }
}

/// Writes one length-prefixed DNS message.
pub async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    if message_bytes.len() > MAX_DNS_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("DNS message too large: {} bytes", message_bytes.len()),
        ));
    }
    let length = message_bytes.len() as u16;

    let mut frame = Vec::with_capacity(2 + message_bytes.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message_bytes);

    stream.write_all(&frame).await?;
    stream.flush().await
}

/// Reads one length-prefixed DNS message; `None` when the peer closed the
/// stream cleanly before a new length prefix.
pub async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Option<Vec<u8>>>
where
    S: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;
    Ok(Some(message))
}
