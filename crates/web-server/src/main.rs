use anyhow::Context;
use std::net::SocketAddr;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Entry point for `cargo run -p web-server`; the `macrolab serve` subcommand
// does the same with file logging available.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config(Path::new(configuration::DEFAULT_CONFIG_FILE))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("server.host and server.port do not form a socket address")?;
    web_server::run_server(addr, config).await
}
