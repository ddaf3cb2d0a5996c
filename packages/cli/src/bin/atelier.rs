// ABOUTME: Command-line entry point for the Atelier catalog server
// ABOUTME: Parses flags, loads .env and tracing settings, then runs the HTTP server

use std::net::IpAddr;

use atelier_cli::{run_server, Config};
use clap::Parser;

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Atelier catalog API server")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// SQLite connection string (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        if port == 0 {
            anyhow::bail!("Port 0 is out of valid range (1-65535)");
        }
        config.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    run_server(config, cli.host).await
}
