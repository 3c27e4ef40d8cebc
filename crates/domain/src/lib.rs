//! hostdns domain layer
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod domain_scope;
pub mod errors;
pub mod platform_resolver;
pub mod resolver_group;
pub mod resolver_table;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{parse_name_server, DnsProtocol, DEFAULT_DNS_PORT};
pub use dns_query::{DnsQuery, OpCode, Question};
pub use domain_scope::DomainScope;
pub use errors::DomainError;
pub use platform_resolver::PlatformResolver;
pub use resolver_group::ResolverGroup;
pub use resolver_table::{ResolverTable, ResolverTableBuilder};
