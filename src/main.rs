use anyhow::{Context, Result};
use clap::Parser;

use docsync::config::Config;
use docsync::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "docsync")]
#[command(
    version,
    about = "Synchronizes Google Docs into a GitHub archive and working-copy registry"
)]
struct Cli {
    /// Port to serve on
    #[arg(short, long, default_value = "8787")]
    port: u16,

    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable dev mode (permissive CORS for local callers)
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration from environment")?;

    server::start_server(
        ServerConfig {
            host: cli.host,
            port: cli.port,
            dev_mode: cli.dev,
        },
        config,
    )
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
