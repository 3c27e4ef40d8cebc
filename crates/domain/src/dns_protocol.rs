use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr, SocketAddr, SocketAddrV6};

/// Port used for upstream name servers unless the discovered configuration
/// says otherwise.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Transport used for a single upstream exchange attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp,
    Tcp,
}

impl DnsProtocol {
    /// Order in which transports are tried for every resolver group.
    pub const EXCHANGE_ORDER: [DnsProtocol; 2] = [DnsProtocol::Udp, DnsProtocol::Tcp];

    pub fn protocol_name(&self) -> &'static str {
        match self {
            DnsProtocol::Udp => "UDP",
            DnsProtocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.protocol_name())
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        // A bare IPv6 address also contains colons; only treat the suffix as a
        // port when the host part has no colon of its own.
        if host.contains(':') {
            return None;
        }
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

/// Link-local IPv6 name servers carry a zone, which must already be an
/// interface index here (`fe80::1%4`).
fn parse_ip(host: &str, port: u16) -> Option<SocketAddr> {
    match host.split_once('%') {
        Some((ip, zone)) => {
            let ip = ip.parse::<Ipv6Addr>().ok()?;
            let scope_id = zone.parse::<u32>().ok()?;
            Some(SocketAddr::V6(SocketAddrV6::new(ip, port, 0, scope_id)))
        }
        None => host
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, port)),
    }
}

/// Parses a name server entry into a socket address.
///
/// Accepts a bare IP (`10.0.0.53`, `fe80::1%4`) which gets `default_port`,
/// or an address with an explicit port (`10.0.0.53:5353`, `[::1]:53`).
pub fn parse_name_server(s: &str, default_port: u16) -> Result<SocketAddr, DomainError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DomainError::InvalidNameServer("empty address".to_string()));
    }

    if let Some(addr) = parse_ip(s, default_port) {
        return Ok(addr);
    }

    if let Some((host, port)) = parse_host_port(s) {
        if let Some(addr) = parse_ip(host, port) {
            return Ok(addr);
        }
    }

    Err(DomainError::InvalidNameServer(format!(
        "'{}' is not an IP address",
        s
    )))
}
