use crate::ports::{UpstreamExchanger, UpstreamReply};
use crate::services::DomainRouter;
use hostdns_domain::{DnsQuery, DomainError, ResolverGroup};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of handling one inbound query.
#[derive(Debug, Clone)]
pub enum DnsReply {
    /// Upstream response to relay verbatim.
    Forwarded(UpstreamReply),
    /// Every candidate group failed; the caller answers SERVFAIL.
    ServerFailure,
}

pub struct HandleDnsQueryUseCase {
    router: DomainRouter,
    exchanger: Arc<dyn UpstreamExchanger>,
}

impl HandleDnsQueryUseCase {
    pub fn new(router: DomainRouter, exchanger: Arc<dyn UpstreamExchanger>) -> Self {
        Self { router, exchanger }
    }

    pub async fn execute(&self, query: &DnsQuery, message: &[u8]) -> DnsReply {
        match self.resolve(query, message).await {
            Ok(reply) => DnsReply::Forwarded(reply),
            Err(e) => {
                warn!(
                    id = query.id,
                    name = query.first_name().unwrap_or("<none>"),
                    error = %e,
                    "Answering SERVFAIL"
                );
                DnsReply::ServerFailure
            }
        }
    }

    /// Scoped groups for each question first, then the default chain.
    pub async fn resolve(
        &self,
        query: &DnsQuery,
        message: &[u8],
    ) -> Result<UpstreamReply, DomainError> {
        if query.opcode.routes_by_domain() {
            for question in &query.questions {
                let candidates = self.router.route(&question.name);
                if candidates.is_empty() {
                    continue;
                }

                debug!(
                    id = query.id,
                    name = %question.name,
                    groups = candidates.len(),
                    "Trying domain-scoped resolvers"
                );

                if let Some(reply) = self.try_groups(query, message, candidates).await {
                    return Ok(reply);
                }
            }
        }

        let defaults: Vec<&ResolverGroup> = self.router.defaults().iter().collect();
        debug!(
            id = query.id,
            opcode = %query.opcode,
            groups = defaults.len(),
            "Trying default resolvers"
        );

        self.try_groups(query, message, defaults)
            .await
            .ok_or(DomainError::NoWorkingResolver)
    }

    async fn try_groups(
        &self,
        query: &DnsQuery,
        message: &[u8],
        groups: Vec<&ResolverGroup>,
    ) -> Option<UpstreamReply> {
        for group in groups {
            match self.exchanger.exchange(message, group).await {
                Ok(reply) => {
                    debug!(
                        id = query.id,
                        group = group.label(),
                        server = %reply.server,
                        protocol = %reply.protocol,
                        "Upstream answered"
                    );
                    return Some(reply);
                }
                Err(e) => {
                    warn!(id = query.id, group = %group, error = %e, "Resolver group failed");
                }
            }
        }
        None
    }
}
