use super::handler::DnsServerHandler;
use crate::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use hostdns_domain::{DnsProtocol, DomainError};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepts connections until cancelled; each connection runs on its own task.
pub(super) async fn run_tcp_listener(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            result = listener.accept() => match result {
                Ok(accepted) => accepted,
                Err(e) if is_transient(&e) => {
                    debug!(error = %e, "Transient TCP accept error");
                    continue;
                }
                Err(e) => {
                    return Err(DomainError::ListenerFailure {
                        transport: "TCP",
                        reason: e.to_string(),
                    });
                }
            },
        };

        let handler = Arc::clone(&handler);
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            serve_connection(stream, peer, handler, shutdown).await;
        });
    }
}

/// Answers length-prefixed queries in order until the peer closes, the
/// connection idles out, or the listener shuts down.
async fn serve_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    loop {
        let read = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = tokio::time::timeout(TCP_IDLE_TIMEOUT, read_with_length_prefix(&mut stream)) => read,
        };

        let query = match read {
            Ok(Ok(Some(query))) => query,
            Ok(Ok(None)) => break,
            Ok(Err(e)) => {
                debug!(peer = %peer, error = %e, "TCP read failed");
                break;
            }
            Err(_) => {
                debug!(peer = %peer, "Closing idle TCP connection");
                break;
            }
        };

        let Some(response) = handler.handle_raw(&query, DnsProtocol::Tcp).await else {
            continue;
        };

        if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
            warn!(peer = %peer, error = %e, "Failed to send TCP response");
            break;
        }
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}
