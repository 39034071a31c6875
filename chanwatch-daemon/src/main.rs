//! chanwatch daemon
//!
//! Keeps a live model of a Lightning node's channels and logs liquidity
//! reports for it.

mod config;
mod node;
mod report;
mod shutdown;
mod state;
mod stream;

use chanwatch_core::alerts::TracingAlertSink;
use chanwatch_core::events::channel_event_channel;
use chanwatch_sdk::objects::BalanceMode;
use clap::Parser;
use config::{ConfigLoader, Overrides};
use node::{RestNode, build_clients};
use shutdown::{shutdown_signal, spawn_config_reload_handler};
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// chanwatch - live channel liquidity for a Lightning node
#[derive(Parser, Debug)]
#[command(name = "chanwatch-daemon")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./chanwatch.toml")]
    config: PathBuf,

    /// Override the node REST URL (e.g., https://127.0.0.1:8080)
    #[arg(long, env = "CHANWATCH_NODE_URL")]
    node_url: Option<Url>,

    /// Override the balance mode (receive, send, routing)
    #[arg(long)]
    balance_mode: Option<BalanceMode>,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_json);

    tracing::info!("Starting chanwatch-daemon v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(
        &args.config,
        Overrides {
            node_url: args.node_url,
            balance_mode: args.balance_mode,
        },
    ));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        node = %loaded_config.node.url,
        balance_mode = %loaded_config.balance_mode,
        "Configuration loaded from {:?}",
        args.config
    );

    // Build node clients
    let (unary_client, stream_client) = build_clients(&loaded_config.node).map_err(|e| {
        tracing::error!("Failed to build node client: {}", e);
        e
    })?;

    // Create application state
    let state = AppState::new(
        loaded_config,
        Arc::new(RestNode::new(unary_client)),
        Arc::new(TracingAlertSink),
    );

    // Wire the event pipeline
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (event_tx, event_rx) = channel_event_channel();

    let reconciler_handle = tokio::spawn(state.reconciler.clone().run(
        shutdown_rx.clone(),
        event_rx,
        state.sync_config.clone(),
        state.sync_config.subscribe(),
    ));
    let stream_handle = tokio::spawn(stream::forward_channel_events(
        stream_client,
        event_tx,
        shutdown_rx.clone(),
    ));
    let report_handle = tokio::spawn(report::run_reporter(
        state.context.clone(),
        state.sync_config.clone(),
        state.sync_config.subscribe(),
        shutdown_rx.clone(),
    ));

    // Reload the config on SIGHUP
    let reload_handle = spawn_config_reload_handler(state.clone(), config_loader, shutdown_rx);

    shutdown_signal().await;

    // Stop every task and wait for them
    let _ = shutdown_tx.send(true);
    let (reconciler_res, stream_res, report_res, reload_res) =
        tokio::join!(reconciler_handle, stream_handle, report_handle, reload_handle);
    for (name, result) in [
        ("reconciler", reconciler_res),
        ("stream", stream_res),
        ("report", report_res),
        ("reload", reload_res),
    ] {
        if let Err(e) = result {
            tracing::error!(task = name, error = %e, "Task ended abnormally");
        }
    }

    tracing::info!(channels = state.context.len(), "chanwatch-daemon shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chanwatch_core=debug,reqwest=warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
