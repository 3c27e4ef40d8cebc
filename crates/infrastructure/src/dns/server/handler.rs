use crate::dns::wire::{self, DecodedRequest};
use bytes::Bytes;
use hickory_proto::ProtoError;
use hostdns_application::use_cases::{DnsReply, HandleDnsQueryUseCase};
use hostdns_domain::DnsProtocol;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns one raw inbound message into the bytes to send back, if any.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_raw(&self, message: &[u8], transport: DnsProtocol) -> Option<Bytes> {
        let request = match wire::decode_request(message) {
            Some(DecodedRequest::Query(request)) => request,
            Some(DecodedRequest::Malformed { metadata, error }) => {
                debug!(id = metadata.id, %transport, error = %error, "Answering FORMERR");
                return encoded(wire::format_error(&metadata));
            }
            None => {
                debug!(len = message.len(), %transport, "Dropping message without a query header");
                return None;
            }
        };

        debug!(
            id = request.query.id,
            opcode = %request.query.opcode,
            name = request.query.first_name().unwrap_or("<none>"),
            qtype = ?request.query.questions.first().map(|q| q.record_type),
            %transport,
            "DNS query received"
        );

        match self.use_case.execute(&request.query, message).await {
            DnsReply::Forwarded(reply) => Some(reply.bytes),
            DnsReply::ServerFailure => encoded(wire::server_failure(&request.message)),
        }
    }
}

fn encoded(reply: Result<Vec<u8>, ProtoError>) -> Option<Bytes> {
    match reply {
        Ok(bytes) => Some(Bytes::from(bytes)),
        Err(e) => {
            warn!(error = %e, "Failed to encode local reply");
            None
        }
    }
}
