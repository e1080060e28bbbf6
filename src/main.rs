use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use widgetd::api::{self, AppState};
use widgetd::inventory::CommandInventory;
use widgetd::settings::SettingsStore;

#[derive(Parser, Debug)]
#[command(name = "widgetd")]
#[command(about = "Settings and software inventory API for dashboard widgets")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "WIDGETD_PORT", default_value = "41830")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "WIDGETD_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Settings file managed by this service
    #[arg(
        short,
        long,
        env = "WIDGETD_SETTINGS",
        default_value = "/etc/widgetd/settings.ini"
    )]
    settings: PathBuf,

    /// Command executed to list installed software
    #[arg(
        long,
        env = "WIDGETD_INVENTORY_CMD",
        default_value = "software-inventory"
    )]
    inventory_cmd: String,

    /// Tool names the dependencies endpoint reports
    #[arg(
        long = "allow",
        env = "WIDGETD_ALLOW",
        value_delimiter = ',',
        default_value = "python,requests"
    )]
    allow: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, env = "WIDGETD_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "widgetd=debug,tower_http=debug"
    } else {
        "widgetd=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let inventory =
        CommandInventory::from_command_line(&cli.inventory_cmd).context("invalid inventory command")?;

    info!("Managing settings in {}", cli.settings.display());
    let store = SettingsStore::new(&cli.settings);

    let state = AppState::new(store, Arc::new(inventory), cli.allow);
    let app = api::create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port)
        .parse()
        .context("invalid bind address")?;
    info!("Starting widgetd on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
