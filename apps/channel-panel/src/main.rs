mod config;
mod handlers;
mod routes;
mod services;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use channel_db::Repositories;
use channel_db::utils::{Clock, SystemClock};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::PanelConfig;
use services::activity_service::{ActivityService, Actor};

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub activity: ActivityService,
    pub config: Arc<PanelConfig>,
}

impl AppState {
    pub fn new(config: PanelConfig, repos: Repositories) -> Self {
        let activity = ActivityService::new(repos.audit_logs.clone(), Actor::from(&config.admin));
        Self {
            repos,
            activity,
            config: Arc::new(config),
        }
    }
}

#[derive(Parser)]
#[command(name = "channel-panel")]
#[command(about = "Channelling admin dashboard API", long_about = None)]
struct Cli {
    /// Path to a panel.toml; defaults to /etc/channel-admin/panel.toml, then ./panel.toml
    #[arg(long, global = true, env = "PANEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve,
    /// Print the resolved configuration and exit
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: failed to load .env file: {e}");
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "channel_panel=debug,channel_db=debug,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PanelConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => run_server(config).await?,
        Commands::Info => {
            println!("\n=== CHANNEL PANEL INFO ===");
            println!("Listen:     {}", config.socket_addr());
            println!("Demo data:  {}", config.seed_demo);
            println!("Admin user: {}", config.admin.username);
            println!("==========================\n");
        }
    }

    Ok(())
}

async fn run_server(config: PanelConfig) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repos = if config.seed_demo {
        Repositories::demo(clock).context("Failed to load demo data")?
    } else {
        Repositories::in_memory(clock)
    };

    let addr = config.socket_addr();
    let state = AppState::new(config, repos);
    let app = routes::router(state);

    tracing::info!("Channel panel v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Channel panel stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
