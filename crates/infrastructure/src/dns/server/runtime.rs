use super::handler::DnsServerHandler;
use super::tcp::run_tcp_listener;
use super::udp::run_udp_listener;
use hostdns_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Configures which listeners a [`DnsServer`] binds.
pub struct DnsServerBuilder {
    handler: DnsServerHandler,
    udp_addr: Option<SocketAddr>,
    tcp_addr: Option<SocketAddr>,
}

impl DnsServerBuilder {
    pub fn new(handler: DnsServerHandler) -> Self {
        Self {
            handler,
            udp_addr: None,
            tcp_addr: None,
        }
    }

    /// Port 0 binds an ephemeral port; read it back with [`DnsServer::udp_addr`].
    pub fn udp(mut self, addr: SocketAddr) -> Self {
        self.udp_addr = Some(addr);
        self
    }

    pub fn tcp(mut self, addr: SocketAddr) -> Self {
        self.tcp_addr = Some(addr);
        self
    }

    /// Binds every configured listener, then starts serving. Nothing is left
    /// running when a bind fails.
    pub async fn start(self) -> Result<DnsServer, DomainError> {
        let udp_socket = match self.udp_addr {
            Some(addr) => Some(UdpSocket::bind(addr).await.map_err(|e| {
                DomainError::ListenerBindFailure {
                    transport: "UDP",
                    addr: addr.to_string(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        let tcp_listener = match self.tcp_addr {
            Some(addr) => Some(TcpListener::bind(addr).await.map_err(|e| {
                DomainError::ListenerBindFailure {
                    transport: "TCP",
                    addr: addr.to_string(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        let handler = Arc::new(self.handler);
        let shutdown = CancellationToken::new();
        let mut tasks = JoinSet::new();
        let mut server_udp_addr = None;
        let mut server_tcp_addr = None;

        if let Some(socket) = udp_socket {
            let addr = local_addr("UDP", socket.local_addr())?;
            info!(bind_address = %addr, "UDP DNS listener started");
            server_udp_addr = Some(addr);
            tasks.spawn(run_udp_listener(
                Arc::new(socket),
                Arc::clone(&handler),
                shutdown.clone(),
            ));
        }

        if let Some(listener) = tcp_listener {
            let addr = local_addr("TCP", listener.local_addr())?;
            info!(bind_address = %addr, "TCP DNS listener started");
            server_tcp_addr = Some(addr);
            tasks.spawn(run_tcp_listener(
                listener,
                Arc::clone(&handler),
                shutdown.clone(),
            ));
        }

        Ok(DnsServer {
            udp_addr: server_udp_addr,
            tcp_addr: server_tcp_addr,
            shutdown,
            tasks,
        })
    }
}

fn local_addr(
    transport: &'static str,
    result: std::io::Result<SocketAddr>,
) -> Result<SocketAddr, DomainError> {
    result.map_err(|e| DomainError::ListenerBindFailure {
        transport,
        addr: "<unknown>".to_string(),
        reason: e.to_string(),
    })
}

/// Running UDP/TCP listeners sharing one handler.
pub struct DnsServer {
    udp_addr: Option<SocketAddr>,
    tcp_addr: Option<SocketAddr>,
    shutdown: CancellationToken,
    tasks: JoinSet<Result<(), DomainError>>,
}

impl DnsServer {
    /// Binds `bind_ip:udp_port` and `bind_ip:tcp_port`; a port of 0 leaves
    /// that transport disabled.
    pub async fn start(
        handler: DnsServerHandler,
        bind_ip: IpAddr,
        udp_port: u16,
        tcp_port: u16,
    ) -> Result<Self, DomainError> {
        let mut builder = DnsServerBuilder::new(handler);
        if udp_port > 0 {
            builder = builder.udp(SocketAddr::new(bind_ip, udp_port));
        }
        if tcp_port > 0 {
            builder = builder.tcp(SocketAddr::new(bind_ip, tcp_port));
        }
        builder.start().await
    }

    pub fn builder(handler: DnsServerHandler) -> DnsServerBuilder {
        DnsServerBuilder::new(handler)
    }

    pub fn udp_addr(&self) -> Option<SocketAddr> {
        self.udp_addr
    }

    pub fn tcp_addr(&self) -> Option<SocketAddr> {
        self.tcp_addr
    }

    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Resolves when a listener stops on its own. Returns the first listener
    /// failure, or `Ok(())` once no listener is left.
    pub async fn wait(&mut self) -> Result<(), DomainError> {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "DNS listener stopped");
                    return Err(e);
                }
                Err(e) => {
                    error!(error = %e, "DNS listener task panicked");
                    return Err(DomainError::ListenerFailure {
                        transport: "listener",
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Stops every listener that is still running. Safe to call repeatedly.
    pub async fn shutdown(&mut self) {
        if self.shutdown.is_cancelled() && self.tasks.is_empty() {
            return;
        }

        self.shutdown.cancel();
        while let Some(joined) = self.tasks.join_next().await {
            if let Ok(Err(e)) = joined {
                debug!(error = %e, "Listener error during shutdown");
            }
        }
        info!("DNS listeners stopped");
    }
}

impl Drop for DnsServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
