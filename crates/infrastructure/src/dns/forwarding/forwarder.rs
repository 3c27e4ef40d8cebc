use crate::dns::transport::create_transport;
use async_trait::async_trait;
use hickory_proto::op::Message;
use hostdns_application::ports::{UpstreamExchanger, UpstreamReply};
use hostdns_domain::{DnsProtocol, DomainError, ResolverGroup};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, enabled, warn, Level};

/// Forwards raw queries to a resolver group.
///
/// UDP is tried against every server first, then TCP. Each attempt is a
/// single query bounded by `timeout`; there are no retries. The first reply
/// is returned whatever its RCODE.
pub struct UpstreamForwarder {
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

fn log_reply(group: &ResolverGroup, server: SocketAddr, protocol: DnsProtocol, reply: &[u8]) {
    match Message::from_vec(reply) {
        Ok(parsed) => debug!(
            group = group.label(),
            server = %server,
            protocol = %protocol,
            rcode = ?parsed.metadata.response_code,
            answers = parsed.answers.len(),
            "Upstream exchange succeeded"
        ),
        Err(e) => debug!(
            group = group.label(),
            server = %server,
            protocol = %protocol,
            error = %e,
            "Upstream reply does not decode, relaying as is"
        ),
    }
}

#[async_trait]
impl UpstreamExchanger for UpstreamForwarder {
    async fn exchange(
        &self,
        message: &[u8],
        group: &ResolverGroup,
    ) -> Result<UpstreamReply, DomainError> {
        for protocol in DnsProtocol::EXCHANGE_ORDER {
            for server in group.servers() {
                let transport = create_transport(protocol, *server);

                match transport.send(message, self.timeout).await {
                    Ok(bytes) => {
                        if enabled!(Level::DEBUG) {
                            log_reply(group, *server, protocol, &bytes);
                        }
                        return Ok(UpstreamReply::new(bytes, *server, protocol));
                    }
                    Err(e) => {
                        warn!(
                            group = group.label(),
                            server = %server,
                            protocol = %protocol,
                            error = %e,
                            "Upstream exchange failed"
                        );
                    }
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }
}
