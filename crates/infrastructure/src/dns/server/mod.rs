mod handler;
mod runtime;
mod tcp;
mod udp;

pub use handler::DnsServerHandler;
pub use runtime::{DnsServer, DnsServerBuilder};
