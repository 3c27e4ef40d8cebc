use hostdns_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `logging.level`.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level)?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    if config.logging.is_json() {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(true).init();
    }

    info!("Logging initialized at level: {}", config.logging.level);
    Ok(())
}
