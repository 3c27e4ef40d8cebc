//! Inbound message decoding and locally synthesized replies.
//!
//! Requests are decoded with hickory to route them; the original bytes are
//! what gets forwarded upstream.

pub mod request;
pub mod response;

pub use request::{decode_request, DecodedRequest, InboundRequest};
pub use response::{format_error, server_failure};
