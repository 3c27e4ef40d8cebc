use crate::ports::{PlatformDnsSource, ResolvConfSource};
use hostdns_domain::{
    config::UpstreamConfig, parse_name_server, DomainError, DomainScope, PlatformResolver,
    ResolverGroup, ResolverTable, DEFAULT_DNS_PORT,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_LABEL: &str = "fallback";

#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    pub system_split_dns: bool,
    pub fallback_servers: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self::from(&UpstreamConfig::default())
    }
}

impl From<&UpstreamConfig> for DiscoverySettings {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            system_split_dns: config.system_split_dns,
            fallback_servers: config.fallback_servers.clone(),
        }
    }
}

/// Builds the resolver table from the host platform, then the resolver file,
/// then the static fallback servers, stopping at the first layer that yields
/// at least one group.
pub struct DiscoverResolversUseCase {
    platform: Arc<dyn PlatformDnsSource>,
    resolv_conf: Arc<dyn ResolvConfSource>,
    settings: DiscoverySettings,
}

impl DiscoverResolversUseCase {
    pub fn new(
        platform: Arc<dyn PlatformDnsSource>,
        resolv_conf: Arc<dyn ResolvConfSource>,
        settings: DiscoverySettings,
    ) -> Self {
        Self {
            platform,
            resolv_conf,
            settings,
        }
    }

    pub async fn execute(&self) -> Result<ResolverTable, DomainError> {
        if self.settings.system_split_dns {
            if let Some(table) = self.from_platform().await {
                info!(
                    scopes = table.scope_count(),
                    groups = table.group_count(),
                    source = self.platform.source_name(),
                    "Loaded platform DNS configuration"
                );
                return Ok(table);
            }
        } else {
            debug!("Platform split DNS disabled");
        }

        if let Some(table) = self.from_resolv_conf().await {
            info!(
                groups = table.group_count(),
                source = self.resolv_conf.source_name(),
                "Loaded resolver file"
            );
            return Ok(table);
        }

        let table = self.from_fallback()?;
        warn!(
            servers = ?self.settings.fallback_servers,
            "No usable host DNS configuration, using fallback servers"
        );
        Ok(table)
    }

    async fn from_platform(&self) -> Option<ResolverTable> {
        let resolvers = match self.platform.read_resolvers().await {
            Ok(resolvers) => resolvers,
            Err(DomainError::PlatformUnavailable(reason)) => {
                debug!(reason = %reason, "Platform DNS configuration unavailable");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read platform DNS configuration");
                return None;
            }
        };

        let table = build_platform_table(self.platform.source_name(), resolvers);
        if table.is_empty() {
            warn!("Platform DNS configuration has no usable resolver");
            return None;
        }
        Some(table)
    }

    async fn from_resolv_conf(&self) -> Option<ResolverTable> {
        match self.resolv_conf.read_name_servers().await {
            Ok(servers) if servers.is_empty() => {
                warn!("Resolver file lists no nameserver");
                None
            }
            Ok(servers) => ResolverGroup::new(self.resolv_conf.source_name(), servers)
                .ok()
                .map(|group| ResolverTable::with_defaults(vec![group])),
            Err(e) => {
                warn!(error = %e, "Failed to read resolver file");
                None
            }
        }
    }

    fn from_fallback(&self) -> Result<ResolverTable, DomainError> {
        let servers = self
            .settings
            .fallback_servers
            .iter()
            .map(|s| parse_name_server(s, DEFAULT_DNS_PORT))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::ConfigDiscoveryFailure(e.to_string()))?;

        let group = ResolverGroup::new(FALLBACK_LABEL, servers).map_err(|_| {
            DomainError::ConfigDiscoveryFailure("no fallback servers configured".to_string())
        })?;

        Ok(ResolverTable::with_defaults(vec![group]))
    }
}

/// Drops unreachable entries, orders scoped entries before unscoped ones
/// (each by ascending order hint, ties keep report order) and groups them.
pub fn build_platform_table(source: &str, mut resolvers: Vec<PlatformResolver>) -> ResolverTable {
    resolvers.retain(|r| {
        if !r.reachable {
            debug!(index = r.index, domain = ?r.domain, "Skipping unreachable resolver");
        }
        r.reachable
    });
    resolvers.sort_by_key(|r| (!r.has_domain(), r.order));

    let mut builder = ResolverTable::builder();
    for resolver in resolvers {
        let port = resolver.port.unwrap_or(DEFAULT_DNS_PORT);
        let servers: Vec<_> = resolver
            .nameservers
            .iter()
            .filter_map(|ns| match parse_name_server(ns, port) {
                Ok(addr) => Some(addr),
                Err(e) => {
                    warn!(index = resolver.index, error = %e, "Skipping nameserver");
                    None
                }
            })
            .collect();

        let label = format!("{}#{}", source, resolver.index);
        match ResolverGroup::new(label, servers) {
            Ok(group) => {
                let scope = resolver.domain.as_deref().and_then(DomainScope::new);
                builder.push(group.with_scope(scope));
            }
            Err(e) => debug!(error = %e, "Skipping resolver without nameservers"),
        }
    }
    builder.build()
}
