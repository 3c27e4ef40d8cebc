use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Per-attempt timeout for a single upstream exchange.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Last-resort name servers when neither the platform nor the resolver
    /// file yields a usable configuration.
    #[serde(default = "default_fallback_servers")]
    pub fallback_servers: Vec<String>,

    /// Ask the host platform for split DNS resolvers (`scutil --dns`).
    #[serde(default = "default_true")]
    pub system_split_dns: bool,
}

impl UpstreamConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            resolv_conf: default_resolv_conf(),
            fallback_servers: default_fallback_servers(),
            system_split_dns: true,
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_fallback_servers() -> Vec<String> {
    vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()]
}

fn default_true() -> bool {
    true
}
