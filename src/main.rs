mod config;
mod error;
mod query_engine;
mod report;
mod switch;
mod switch_list;
mod version;

use anyhow::Result;
use clap::Parser;
use config::Config;
use query_engine::UdpBackend;
use std::{path::PathBuf, process::ExitCode, time::Instant};
use switch::SwitchManager;
use switch_list::{SwitchList, SwitchTarget};
use tracing::info;
use tracing_subscriber::EnvFilter;

const MISSING_TARGET: &str = "Must specify a device IP and a community.";

/// Polls switches over SNMP v2c and prints hostname, OS and interface rates.
#[derive(Parser, Debug)]
#[command(name = "swan", version, about, long_about = None)]
struct Cli {
    /// Device IP address or hostname
    host: Option<String>,

    /// SNMP v2c community string
    community: Option<String>,

    /// Poll every switch in a CSV file (ip_address,community) instead
    #[arg(long, conflicts_with_all = ["host", "community"])]
    inventory: Option<PathBuf>,

    /// TOML configuration file, used only if it exists
    #[arg(long, env = "SWAN_CONFIG", default_value = "swan.toml")]
    config: PathBuf,
}

impl Cli {
    /// The single device to poll, if both positionals were given.
    fn target(&self) -> Option<SwitchTarget> {
        match (&self.host, &self.community) {
            (Some(host), Some(community)) => Some(SwitchTarget {
                ip_address: host.clone(),
                community: community.clone(),
            }),
            _ => None,
        }
    }
}

fn exit_status(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    info!("swan {} is starting", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &cli.inventory {
        return poll_inventory(path, &config).await;
    }

    let Some(target) = cli.target() else {
        println!("{MISSING_TARGET}");
        return Ok(ExitCode::from(2));
    };

    let manager = SwitchManager::new(target, config);
    match manager.poll().await {
        Ok(switch_report) => {
            print!("{}", report::render(&switch_report));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print!("{}", report::render_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn poll_inventory(path: &std::path::Path, config: &Config) -> Result<ExitCode> {
    let switches = SwitchList::from_csv(path)?;

    let now = Instant::now();
    let results = switches.poll_all(config, &UdpBackend).await;
    info!(
        "Queried {} switches in {:.2} seconds",
        switches.targets.len(),
        now.elapsed().as_secs_f64()
    );

    let (output, failed) = report::render_inventory(&results);
    print!("{output}");
    Ok(exit_status(failed))
}
