mod cli;

use adoread::api;
use adoread::config::Config;
use adoread::observability::init_tracing;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            let mut config = Config::load(args.config)?;
            if let Some(address) = args.address {
                config.server.bind_addr = address;
            }
            info!(address = %config.server.bind_addr, "Starting server");
            api::run(config).await?;
        }
        Commands::Config(args) => {
            let config = Config::load(args.config)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
