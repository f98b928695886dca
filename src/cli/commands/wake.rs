use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{constants::DEFAULT_CONFIG_PATH, PanelConfig},
    schemas::MacAddress,
    wol,
};

#[derive(Parser, Debug)]
#[command(about = "Send a one-shot Wake-on-LAN magic packet")]
pub struct WakeCommand {
    #[arg(
        short = 'c',
        long,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Path to the JSON configuration file"
    )]
    pub config: PathBuf,

    #[arg(short, long, help = "MAC address to wake (overrides the configured target)")]
    pub mac: Option<String>,

    #[arg(short, long, help = "Broadcast address (overrides the configured one)")]
    pub broadcast: Option<Ipv4Addr>,

    #[arg(short, long, help = "UDP destination port (overrides the configured one)")]
    pub port: Option<u16>,
}

impl WakeCommand {
    pub async fn execute(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config = PanelConfig::load(&self.config)?;

        let mac: MacAddress = match &self.mac {
            Some(raw) => raw.parse()?,
            None => config.target_mac,
        };
        let broadcast = self.broadcast.unwrap_or(config.broadcast_addr);
        let port = self.port.unwrap_or(config.wol_port);

        wol::broadcast_magic_packet(&mac, broadcast, port)?;
        println!("Magic packet sent to {} via {}:{}", mac, broadcast, port);

        Ok(())
    }
}
