use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adoread")]
#[command(about = "Adoread reading assistant API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Print the resolved configuration as TOML (API keys omitted)
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind, overriding `server.bind_addr`
    #[arg(long)]
    pub address: Option<SocketAddr>,

    /// Path to the TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
