use clap::Parser;
use dns_blocker_application::ports::BLOCKER_REQUESTS_COUNTER;
use dns_blocker_domain::{CliOverrides, Config, UpdateMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "dns-blocker")]
#[command(version)]
#[command(about = "DNS blocklist decider for hosts files and ||domain^ filter lists")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Blocklist location: file path or http(s) URL
    #[arg(short = 'u', long, value_name = "URI")]
    uri: Option<String>,

    /// Refresh interval, e.g. 30m, 24h, 1h30m
    #[arg(short = 'i', long)]
    refresh_interval: Option<String>,

    /// Blocklist format (hosts, abp)
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// How refreshes are applied (cumulative, replace)
    #[arg(long)]
    update_mode: Option<UpdateMode>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Keep running and check domains read line by line from stdin
    #[arg(short = 'w', long)]
    watch: bool,

    /// Domains to check
    domains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        blocklist_uri: cli.uri.clone(),
        refresh_interval: cli.refresh_interval.clone(),
        format: cli.format.clone(),
        update_mode: cli.update_mode,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting DNS Blocker v{}", env!("CARGO_PKG_VERSION"));

    match cli.config.clone().or_else(Config::get_config_path) {
        Some(path) => info!(path = %path, "Loaded configuration file"),
        None => info!("No configuration file found; using defaults and flags"),
    }

    let services = di::BlockerServices::new(&config).await?;

    for domain in &cli.domains {
        println!("{}\t{}", domain, services.check_domain.execute(domain));
    }

    if cli.watch {
        watch_stdin(&services).await?;

        for (labels, count) in services.metrics.top_counters(BLOCKER_REQUESTS_COUNTER, 10) {
            info!(labels = ?labels, count, "Top blocker requests");
        }
    }

    services.shutdown()?;
    info!("Shutdown complete");
    Ok(())
}

async fn watch_stdin(services: &di::BlockerServices) -> anyhow::Result<()> {
    info!(
        uri = %services.resolver.source(),
        "Reading domains from stdin; Ctrl-C to stop"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let domain = line.trim();
                match domain {
                    "" => continue,
                    ":refresh" => {
                        if !services.resolver.schedule_immediate_update() {
                            warn!("Refresh already pending");
                        }
                    }
                    ":count" => println!("{}", services.engine.blocked_domain_count()),
                    _ => println!("{}\t{}", domain, services.check_domain.execute(domain)),
                }
            }
        }
    }

    Ok(())
}
