pub mod config;
pub mod dns;

pub use config::{DiscoverResolversUseCase, DiscoverySettings};
pub use dns::{DnsReply, HandleDnsQueryUseCase};
