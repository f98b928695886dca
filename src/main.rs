use clap::Parser;

use wakepanel::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(command) => command.execute().await,
        Commands::Wake(command) => command.execute().await,
        Commands::Status(command) => command.execute().await,
    }
}
