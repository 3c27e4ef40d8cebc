use super::zone_index;
use async_trait::async_trait;
use hostdns_application::ports::PlatformDnsSource;
use hostdns_domain::{DomainError, PlatformResolver};
use tokio::process::Command;
use tracing::{debug, warn};

const SCOPED_SECTION: &str = "DNS configuration (for scoped queries)";

/// kSCNetworkReachabilityFlagsReachable
const REACHABLE_FLAG: u32 = 0x0000_0002;

/// macOS split DNS configuration from `scutil --dns`.
pub struct ScutilDnsSource {
    program: String,
}

impl ScutilDnsSource {
    pub fn new() -> Self {
        Self {
            program: "scutil".to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_program(program: String) -> Self {
        Self { program }
    }

    async fn run(&self) -> Result<String, DomainError> {
        let output = Command::new(&self.program)
            .arg("--dns")
            .output()
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(DomainError::IoError(format!(
                "{} --dns exited with {}",
                self.program, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for ScutilDnsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformDnsSource for ScutilDnsSource {
    async fn read_resolvers(&self) -> Result<Vec<PlatformResolver>, DomainError> {
        if !cfg!(target_os = "macos") {
            return Err(DomainError::PlatformUnavailable(format!(
                "scutil is not available on {}",
                std::env::consts::OS
            )));
        }

        let output = self.run().await?;
        let resolvers = parse_scutil_output(&output);
        debug!(resolvers = resolvers.len(), "scutil DNS configuration parsed");
        Ok(resolvers)
    }

    fn source_name(&self) -> &str {
        "scutil"
    }
}

/// Parses the unscoped section of `scutil --dns` output.
///
/// ```text
/// resolver #2
///   domain   : internal.corp
///   nameserver[0] : 10.0.0.53
///   port     : 5353
///   reach    : 0x00000002 (Reachable)
///   order    : 200000
/// ```
pub fn parse_scutil_output(output: &str) -> Vec<PlatformResolver> {
    let mut resolvers = Vec::new();
    let mut current: Option<PlatformResolver> = None;

    for line in output.lines() {
        let line = line.trim();

        if line.starts_with(SCOPED_SECTION) {
            break;
        }

        if let Some(index) = line.strip_prefix("resolver #") {
            resolvers.extend(current.take());
            let index = index.trim().parse().unwrap_or(resolvers.len() + 1);
            current = Some(PlatformResolver {
                index,
                ..PlatformResolver::default()
            });
            continue;
        }

        let (Some(resolver), Some((key, value))) = (current.as_mut(), line.split_once(':'))
        else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "domain" => resolver.domain = Some(value.to_string()),
            "port" => match value.parse() {
                Ok(port) => resolver.port = Some(port),
                Err(_) => warn!(index = resolver.index, value, "Invalid scutil port"),
            },
            "order" => match value.parse() {
                Ok(order) => resolver.order = order,
                Err(_) => warn!(index = resolver.index, value, "Invalid scutil order"),
            },
            "reach" => resolver.reachable = parse_reach(value),
            _ if key.starts_with("nameserver[") => {
                resolver.nameservers.push(scoped_nameserver(value))
            }
            _ => {}
        }
    }

    resolvers.extend(current);
    resolvers
}

/// Rewrites `fe80::1%en0` to `fe80::1%<index>` so the zone survives as a
/// socket scope id. Unknown interfaces are left as reported.
fn scoped_nameserver(value: &str) -> String {
    match value.split_once('%') {
        Some((ip, zone)) if zone.parse::<u32>().is_err() => match zone_index(zone) {
            Some(index) => format!("{}%{}", ip, index),
            None => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// `0x00020002 (Reachable,Directly Reachable Address)`
fn parse_reach(value: &str) -> bool {
    let mut parts = value.splitn(2, char::is_whitespace);
    let flags = parts
        .next()
        .and_then(|hex| hex.strip_prefix("0x"))
        .and_then(|hex| u32::from_str_radix(hex, 16).ok());

    match flags {
        Some(flags) => flags & REACHABLE_FLAG != 0,
        None => value.contains("Reachable") && !value.contains("Not Reachable"),
    }
}
