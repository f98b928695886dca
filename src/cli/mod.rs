mod commands;
pub mod types;

pub use commands::{ServeCommand, StatusCommand, WakeCommand};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "wakepanel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remote power-control panel for a single target machine",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Serve(ServeCommand),
    Wake(WakeCommand),
    Status(StatusCommand),
}
