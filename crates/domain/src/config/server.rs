use serde::{Deserialize, Serialize};

/// Local listeners. A port of 0 leaves that transport disabled.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub udp_port: u16,

    #[serde(default)]
    pub tcp_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl ServerConfig {
    pub fn any_enabled(&self) -> bool {
        self.udp_port > 0 || self.tcp_port > 0
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            udp_port: 0,
            tcp_port: 0,
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
