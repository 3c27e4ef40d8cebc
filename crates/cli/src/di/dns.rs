use hostdns_application::services::DomainRouter;
use hostdns_application::use_cases::{
    DiscoverResolversUseCase, DiscoverySettings, HandleDnsQueryUseCase,
};
use hostdns_domain::{Config, ResolverTable};
use hostdns_infrastructure::dns::{DnsServerHandler, UpstreamForwarder};
use hostdns_infrastructure::system::{ResolvConfFile, ScutilDnsSource};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub table: Arc<ResolverTable>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let table = Arc::new(Self::discover(config).await?);

        for (scope, groups) in table.scoped() {
            for group in groups {
                info!(scope = %scope, group = %group, "Domain resolver");
            }
        }
        for group in table.defaults() {
            info!(group = %group, "Default resolver");
        }

        let forwarder = Arc::new(UpstreamForwarder::new(config.upstream.query_timeout()));
        let router = DomainRouter::new(Arc::clone(&table));
        let use_case = Arc::new(HandleDnsQueryUseCase::new(router, forwarder));

        Ok(Self {
            table,
            handler: DnsServerHandler::new(use_case),
        })
    }

    async fn discover(config: &Config) -> anyhow::Result<ResolverTable> {
        let discovery = DiscoverResolversUseCase::new(
            Arc::new(ScutilDnsSource::new()),
            Arc::new(ResolvConfFile::new(config.upstream.resolv_conf.clone())),
            DiscoverySettings::from(&config.upstream),
        );
        Ok(discovery.execute().await?)
    }
}
