mod platform_dns_source;
mod resolv_conf_source;
mod upstream_exchanger;

pub use platform_dns_source::PlatformDnsSource;
pub use resolv_conf_source::ResolvConfSource;
pub use upstream_exchanger::{UpstreamExchanger, UpstreamReply};
