use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::{
    config::{constants::DEFAULT_CONFIG_PATH, PanelConfig},
    probe,
};

#[derive(Parser, Debug)]
#[command(about = "Check whether the target machine is reachable")]
pub struct StatusCommand {
    #[arg(
        short = 'c',
        long,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Path to the JSON configuration file"
    )]
    pub config: PathBuf,

    #[arg(short, long, help = "Probe timeout in seconds (overrides the configured one)")]
    pub timeout: Option<u64>,
}

impl StatusCommand {
    pub async fn execute(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config = PanelConfig::load(&self.config)?;
        let timeout = Duration::from_secs(self.timeout.unwrap_or(config.probe_timeout_secs));

        if probe::is_online(config.target_ip, timeout).await {
            println!("{} is Online", config.target_ip);
            Ok(())
        } else {
            println!("{} is Offline", config.target_ip);
            std::process::exit(1);
        }
    }
}
