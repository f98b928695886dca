use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::{
    cli::types::{LogFormat, LogLevel},
    config::{constants::DEFAULT_CONFIG_PATH, PanelConfig, get_global_config, set_global_config},
    dispatch::ActionDispatcher,
    logging::{LogConfig, configure_global_tracing},
    server::start_server,
};

#[derive(Parser, Debug)]
#[command(about = "Start the power-control panel server")]
pub struct ServeCommand {
    #[arg(
        short = 'H',
        long,
        default_value = "0.0.0.0",
        help = "Host address to bind the panel server"
    )]
    pub host: String,

    #[arg(
        short = 'p',
        long,
        help = "Port number to bind the panel server (overrides the configuration file)"
    )]
    pub port: Option<u16>,

    #[arg(
        short = 'c',
        long,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Path to the JSON configuration file"
    )]
    pub config: PathBuf,

    #[arg(
        short,
        long,
        default_value = "info",
        value_enum,
        help = "Logging level"
    )]
    pub log_level: LogLevel,

    #[arg(long, help = "Path to log file (if not specified, logs go to stdout)")]
    pub log_file: Option<String>,

    #[arg(long, default_value = "pretty", value_enum, help = "Log output format")]
    pub log_format: LogFormat,

    #[arg(
        long,
        help = "Maximum number of log files to retain (only applies if log_file is set)"
    )]
    pub log_max_files: Option<usize>,
}

impl ServeCommand {
    pub async fn execute(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config = PanelConfig::load(&self.config)?;

        // DEBUG in the configuration file wins over the default level.
        let level = if config.debug {
            LogLevel::Debug
        } else {
            self.log_level
        };

        let log_config = LogConfig {
            level,
            format: self.log_format,
            file_path: self.log_file.clone(),
            max_log_files: self.log_max_files,
        };

        configure_global_tracing(log_config);

        let port = self.port.unwrap_or(config.port);

        // Display startup banner
        println!();
        println!("╔═══════════════════════════════════════════════╗");
        println!(
            "║          Wakepanel Server v{}                ║",
            env!("CARGO_PKG_VERSION")
        );
        println!("╚═══════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  → Host: {}", self.host);
        println!("  → Port: {}", port);
        println!("  → Target: {} ({})", config.target_ip, config.target_mac);
        println!(
            "  → Access Gate: {}",
            if config.allowed_macs.is_empty() {
                "✗ Disabled (no allow-list configured)".to_string()
            } else {
                format!("✓ Enabled ({} allowed devices)", config.allowed_macs.len())
            }
        );
        println!("  → Shortcuts: {}", config.shortcuts.len());
        println!();

        set_global_config(config);
        let dispatcher = Arc::new(ActionDispatcher::new(get_global_config()));

        start_server(self.host.clone(), port, dispatcher).await
    }
}
