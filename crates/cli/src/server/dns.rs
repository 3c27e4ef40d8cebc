use hostdns_domain::Config;
use hostdns_infrastructure::dns::{DnsServer, DnsServerHandler};
use tracing::{error, info};

/// Serves until Ctrl+C or a listener failure, then shuts down.
pub async fn run_dns_server(config: &Config, handler: DnsServerHandler) -> anyhow::Result<()> {
    let bind_ip = config.bind_ip()?;
    let mut server = DnsServer::start(
        handler,
        bind_ip,
        config.server.udp_port,
        config.server.tcp_port,
    )
    .await?;

    if let Some(addr) = server.udp_addr() {
        println!("UDP: {}", addr);
    }
    if let Some(addr) = server.tcp_addr() {
        println!("TCP: {}", addr);
    }

    let result = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Received Ctrl+C, shutting down"),
                Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
            }
            Ok(())
        }
        result = server.wait() => result,
    };

    server.shutdown().await;
    result?;
    Ok(())
}
