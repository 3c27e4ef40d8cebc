use hickory_proto::op::{Header, Message, MessageType, Metadata, Query};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, DecodeError};
use hostdns_domain::{DnsQuery, OpCode, Question};

/// A query that decoded completely.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub query: DnsQuery,
    pub message: Message,
}

#[derive(Debug)]
pub enum DecodedRequest {
    Query(InboundRequest),
    /// The header was readable, the rest of the message was not.
    Malformed {
        metadata: Metadata,
        error: DecodeError,
    },
}

/// Decodes an inbound message.
///
/// Returns `None` for buffers too short to hold a header and for messages
/// that already carry the QR (response) bit; neither gets an answer.
pub fn decode_request(buf: &[u8]) -> Option<DecodedRequest> {
    let header = Header::read(&mut BinDecoder::new(buf)).ok()?;
    if header.metadata.message_type == MessageType::Response {
        return None;
    }

    match Message::from_vec(buf) {
        Ok(message) => Some(DecodedRequest::Query(InboundRequest {
            query: to_dns_query(&message),
            message,
        })),
        Err(error) => Some(DecodedRequest::Malformed {
            metadata: header.metadata,
            error,
        }),
    }
}

fn to_dns_query(message: &Message) -> DnsQuery {
    let questions = message.queries.iter().map(to_question).collect();
    DnsQuery::new(
        message.metadata.id,
        OpCode::from_u8(u8::from(message.metadata.op_code)),
        questions,
    )
}

/// Question name in presentation form without the trailing dot, `"."` for
/// the root.
fn to_question(query: &Query) -> Question {
    let name = query.name().to_ascii();
    let name = match name.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        Some(_) => ".".to_string(),
        None => name,
    };
    Question::new(name, u16::from(query.query_type()))
}
