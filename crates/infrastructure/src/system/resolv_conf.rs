use super::zone_index;
use async_trait::async_trait;
use hostdns_application::ports::ResolvConfSource;
use hostdns_domain::{DomainError, DEFAULT_DNS_PORT};
use resolv_conf::ScopedIp;
use std::net::{IpAddr, SocketAddr, SocketAddrV6};
use tokio::fs;
use tracing::debug;

/// Reads `nameserver` lines from a resolv.conf(5) style file.
pub struct ResolvConfFile {
    path: String,
}

impl ResolvConfFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ResolvConfFile {
    fn default() -> Self {
        Self::new("/etc/resolv.conf")
    }
}

#[async_trait]
impl ResolvConfSource for ResolvConfFile {
    async fn read_name_servers(&self) -> Result<Vec<SocketAddr>, DomainError> {
        let content = fs::read(&self.path)
            .await
            .map_err(|e| DomainError::InvalidResolvConf {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let servers = parse_resolv_conf(&self.path, &content)?;
        debug!(path = %self.path, servers = servers.len(), "Resolver file parsed");
        Ok(servers)
    }
}

/// Name servers in file order, on port 53. Link-local IPv6 entries keep
/// their zone as the socket scope id.
pub fn parse_resolv_conf(path: &str, content: &[u8]) -> Result<Vec<SocketAddr>, DomainError> {
    let invalid = |reason: String| DomainError::InvalidResolvConf {
        path: path.to_string(),
        reason,
    };

    let config = resolv_conf::Config::parse(content).map_err(|e| invalid(e.to_string()))?;

    config
        .nameservers
        .iter()
        .map(|ns| match ns {
            ScopedIp::V4(ip) => Ok(SocketAddr::new(IpAddr::V4(*ip), DEFAULT_DNS_PORT)),
            ScopedIp::V6(ip, None) => Ok(SocketAddr::new(IpAddr::V6(*ip), DEFAULT_DNS_PORT)),
            ScopedIp::V6(ip, Some(zone)) => zone_index(zone)
                .map(|scope_id| SocketAddr::V6(SocketAddrV6::new(*ip, DEFAULT_DNS_PORT, 0, scope_id)))
                .ok_or_else(|| invalid(format!("unknown interface '{}' for nameserver {}", zone, ip))),
        })
        .collect()
}
