use dns_blocker_domain::Config;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `logging.level`. Logs go to stderr so decisions on
/// stdout stay machine-readable.
pub fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
