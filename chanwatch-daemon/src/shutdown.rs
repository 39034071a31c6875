//! Unix signals: SIGTERM/SIGINT stop the daemon, SIGHUP reloads the config.

use crate::config::ConfigLoader;
use crate::state::AppState;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Resolves on the first SIGTERM or SIGINT.
pub async fn shutdown_signal() {
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    tracing::info!(signal = name, "Initiating graceful shutdown");
}

/// Resolves once shutdown is signaled or the signal sender is gone.
///
/// The borrow guard from `wait_for` is dropped here, so callers can await
/// freely in the branch that follows.
pub async fn shutdown_requested(shutdown_rx: &mut watch::Receiver<bool>) {
    let _ = shutdown_rx.wait_for(|stop| *stop).await;
}

/// Reload the config file on every SIGHUP until shutdown is signaled.
pub fn spawn_config_reload_handler(
    state: AppState,
    config_loader: Arc<ConfigLoader>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut sighup = signal(SignalKind::hangup()).expect("failed to install SIGHUP handler");

        loop {
            tokio::select! {
                biased;

                _ = shutdown_requested(&mut shutdown_rx) => break,

                Some(()) = sighup.recv() => reload(&state, &config_loader).await,
            }
        }
        tracing::debug!("Config reload handler stopped");
    })
}

async fn reload(state: &AppState, config_loader: &ConfigLoader) {
    tracing::info!("Received SIGHUP, reloading configuration");
    match config_loader.reload() {
        Ok(loaded) => {
            let (mode, sync) = (loaded.balance_mode, loaded.sync);
            state.apply_reload(loaded).await;
            tracing::info!(
                balance_mode = %mode,
                fetch_interval = ?sync.fetch_interval,
                report_interval = ?sync.report_interval,
                "Configuration reloaded"
            );
        }
        // keep running on the previous config
        Err(e) => tracing::error!(error = %e, "Failed to reload configuration"),
    }
}
