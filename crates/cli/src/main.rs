use clap::Parser;
use hostdns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "hostdns")]
#[command(version)]
#[command(about = "Loopback DNS forwarder honoring host split DNS")]
struct Cli {
    /// UDP listener port (0 or negative disables UDP)
    #[arg(allow_negative_numbers = true)]
    udp_port: i64,

    /// TCP listener port (0 or negative disables TCP)
    #[arg(allow_negative_numbers = true)]
    tcp_port: i64,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Per-attempt upstream timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Resolver file used when no platform split DNS is available
    #[arg(long, value_name = "FILE")]
    resolv_conf: Option<String>,

    /// Skip `scutil --dns` and read the resolver file directly
    #[arg(long)]
    no_system_split_dns: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        udp_port: Some(bootstrap::listener_port("UDP", cli.udp_port)?),
        tcp_port: Some(bootstrap::listener_port("TCP", cli.tcp_port)?),
        bind_address: cli.bind.clone(),
        query_timeout_ms: cli.timeout_ms,
        resolv_conf: cli.resolv_conf.clone(),
        disable_system_split_dns: cli.no_system_split_dns,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config)?;

    info!("Starting hostdns v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(cli.config.as_deref(), &config);

    let dns_services = di::DnsServices::new(&config).await?;
    info!(
        scopes = dns_services.table.scope_count(),
        groups = dns_services.table.group_count(),
        "Resolver table ready"
    );

    server::run_dns_server(&config, dns_services.handler).await?;

    info!("hostdns stopped");
    Ok(())
}
