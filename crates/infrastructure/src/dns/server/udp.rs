use super::handler::DnsServerHandler;
use crate::dns::transport::MAX_DNS_MESSAGE_SIZE;
use hostdns_domain::{DnsProtocol, DomainError};
use std::io;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Receives datagrams until cancelled; each query is handled on its own task.
pub(super) async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    let mut recv_buf = vec![0u8; MAX_DNS_MESSAGE_SIZE];

    loop {
        let (len, peer) = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) if is_transient(&e) => {
                    debug!(error = %e, "Transient UDP receive error");
                    continue;
                }
                Err(e) => {
                    return Err(DomainError::ListenerFailure {
                        transport: "UDP",
                        reason: e.to_string(),
                    });
                }
            },
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);
        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw(&query, DnsProtocol::Udp).await {
                if let Err(e) = socket.send_to(&response, peer).await {
                    warn!(peer = %peer, error = %e, "Failed to send UDP response");
                }
            }
        });
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}
