//! Haven Console - terminal administration client for a Haven server.
//!
//! Connects to the Haven backend, opens the dashboard at the configured
//! route, and runs until quit.
//!
//! # Environment Variables
//!
//! See the [`haven_console::config`] module for available configuration
//! options.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use haven_console::api::ApiClient;
use haven_console::app::App;
use haven_console::config::Config;
use haven_console::core::Core;
use haven_console::tui::{install_panic_hook, EventHandler, Theme, Tui};

/// Capacity of the terminal event channel.
const EVENT_CHANNEL_SIZE: usize = 100;

/// Haven Console - terminal administration client.
///
/// Administer a Haven server from the terminal: change the account
/// password, manage authorized SSH keys, set up two-factor authentication,
/// and review security logs.
#[derive(Parser, Debug)]
#[command(name = "haven-console")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    HAVEN_SERVER_URL    Server base URL (required unless --server is given)
    HAVEN_ROUTE         Route to open on startup (default: overview)
    HAVEN_TICK_MS       TUI tick interval in milliseconds (default: 60)

EXAMPLES:
    # Open the dashboard
    export HAVEN_SERVER_URL=https://haven.local
    haven-console

    # Jump straight to the security logs
    haven-console --route security-logs
")]
struct Cli {
    /// Server base URL, overriding HAVEN_SERVER_URL.
    #[arg(short, long)]
    server: Option<String>,

    /// Route to open on startup, overriding HAVEN_ROUTE.
    #[arg(short, long)]
    route: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; the alternate screen hides them while the TUI is
    // up, but they are visible when launched with stderr redirected.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        // --server can stand in for the required env var.
        Err(_) if cli.server.is_some() => Config {
            server_url: String::new(),
            route: "overview".to_string(),
            tick_ms: haven_console::config::DEFAULT_TICK_MS,
        },
        Err(e) => return Err(e).context("Failed to load configuration"),
    };
    if let Some(server) = cli.server {
        config.server_url = server.trim_end_matches('/').to_string();
    }
    if let Some(route) = cli.route {
        config.route = route;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run(config))
}

/// Builds the channels, terminal, and app, then runs to completion.
async fn run(config: Config) -> Result<()> {
    debug!(server_url = %config.server_url, route = %config.route, "starting console");

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let (reply_tx, reply_rx) = mpsc::unbounded_channel();

    install_panic_hook();
    let tui = Tui::new().context("Failed to initialize terminal")?;

    let handler = EventHandler::new(
        event_tx,
        shutdown_rx,
        Duration::from_millis(config.tick_ms),
    );
    let event_task = tokio::spawn(handler.run());

    let api = Arc::new(ApiClient::new(config.server_url.clone()));
    let core = Core::new(api, reply_tx);
    let app = App::new(core, config.tick_ms, config.route.clone(), Theme::from_env());

    let result = app.run(tui, event_rx, reply_rx).await;

    // Stop the event handler; it may already be gone if the channel closed.
    let _ = shutdown_tx.send(());
    let _ = event_task.await;

    result.context("Console exited with an error")
}
