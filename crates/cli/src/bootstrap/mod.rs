mod logging;

pub use logging::init_logging;

use dns_blocker_domain::{CliOverrides, Config};
use tracing::error;

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    Ok(config)
}
