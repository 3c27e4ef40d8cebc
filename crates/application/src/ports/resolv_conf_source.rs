use async_trait::async_trait;
use hostdns_domain::DomainError;
use std::net::SocketAddr;

#[async_trait]
pub trait ResolvConfSource: Send + Sync {
    async fn read_name_servers(&self) -> Result<Vec<SocketAddr>, DomainError>;

    fn source_name(&self) -> &str {
        "resolv.conf"
    }
}
