//! Time clock HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeclock_engine::api::{AppState, create_router};
use timeclock_engine::config::ConfigLoader;
use timeclock_engine::store::InMemoryPunchStore;

/// Serves the time accounting engine over HTTP.
#[derive(Parser, Debug)]
#[command(name = "timeclock-server", version, about)]
struct Cli {
    /// Directory holding engine.yaml and employees.yaml.
    #[arg(short, long, default_value = "./config/timeclock")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::load(&cli.config)?;

    // Punches live in memory; a persistent adapter plugs in via PunchStore.
    let state = AppState::new(config, Arc::new(InMemoryPunchStore::new()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(address = %cli.bind, config = %cli.config.display(), "Time clock server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
