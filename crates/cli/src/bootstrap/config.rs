use hostdns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    if !config.server.any_enabled() {
        anyhow::bail!("at least one of the UDP or TCP ports must be greater than 0");
    }

    Ok(config)
}

/// Logged after the subscriber is installed.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        udp_port = config.server.udp_port,
        tcp_port = config.server.tcp_port,
        bind = %config.server.bind_address,
        timeout_ms = config.upstream.query_timeout_ms,
        system_split_dns = config.upstream.system_split_dns,
        "Configuration loaded"
    );
}

/// Ports at or below zero disable the transport.
pub fn listener_port(transport: &str, value: i64) -> anyhow::Result<u16> {
    if value <= 0 {
        return Ok(0);
    }
    u16::try_from(value)
        .map_err(|_| anyhow::anyhow!("{} port {} is out of range (1-65535)", transport, value))
}
