use hickory_proto::op::{Message, MessageType, Metadata, ResponseCode};
use hickory_proto::ProtoError;

/// SERVFAIL for `request`: same ID, opcode and RD bit, QR set, RA clear,
/// question section echoed.
pub fn server_failure(request: &Message) -> Result<Vec<u8>, ProtoError> {
    let mut reply = reply_to(&request.metadata, ResponseCode::ServFail);
    reply.add_queries(request.queries.iter().cloned());
    reply.to_vec()
}

/// Header-only FORMERR for a request whose body did not decode.
pub fn format_error(request: &Metadata) -> Result<Vec<u8>, ProtoError> {
    reply_to(request, ResponseCode::FormErr).to_vec()
}

fn reply_to(request: &Metadata, response_code: ResponseCode) -> Message {
    let mut reply = Message::new(request.id, MessageType::Response, request.op_code);
    reply.metadata = Metadata::response_from_request(request);
    reply.metadata.recursion_available = false;
    reply.metadata.response_code = response_code;
    reply
}
