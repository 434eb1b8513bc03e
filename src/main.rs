mod chart;
mod config;
mod models;
mod report;
mod run;
mod store;
mod util;
mod web;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use run::Command;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = Command::parse(&args)?;
    let config = config::Config::from_env()?;

    match command {
        Command::Serve => run::as_server(&config).await,
        other => run::as_cli(other, &config),
    }
}
