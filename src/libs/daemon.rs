//! Foreground lifecycle of the `watch` command.
//!
//! Runs a [`Monitor`] until it fails or the process receives SIGTERM/SIGINT
//! (Ctrl+C on Windows). On a signal the monitor is asked to stop, which closes
//! the running session at its last input before the process exits.

use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::{msg_error, msg_info, msg_warning};
use anyhow::Result;
use tokio::sync::watch;

/// Runs the monitor with signal handling for graceful shutdown.
pub async fn run_with_signal_handling(monitor: Monitor) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        wait_for_signal().await;
        let _ = shutdown_tx.send(());
    });

    run_until(monitor, async move {
        // A dropped sender means no signal can arrive; keep running.
        if shutdown_rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Runs the monitor until `stop` resolves, then waits for it to wind down.
pub async fn run_until<F>(monitor: Monitor, stop: F) -> Result<()>
where
    F: std::future::Future<Output = ()>,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut monitor_handle = tokio::spawn(monitor.run(stop_rx));

    tokio::select! {
        result = &mut monitor_handle => {
            report(result);
            return Ok(());
        }
        _ = stop => {
            msg_info!(Message::MonitorShuttingDown);
        }
    }

    let _ = stop_tx.send(true);
    report(monitor_handle.await);
    Ok(())
}

fn report(result: std::result::Result<Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => msg_info!(Message::MonitorExitedNormally),
        Ok(Err(e)) => msg_error!(Message::MonitorError(format!("{:#}", e))),
        Err(e) => msg_error!(Message::MonitorTaskPanicked(e.to_string())),
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(_) => {
            msg_error!(Message::FailedToCreateSigtermHandler);
            return wait_for_ctrl_c().await;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(sigint) => sigint,
        Err(_) => {
            msg_error!(Message::FailedToCreateSigintHandler);
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            msg_info!(Message::WatcherReceivedSigterm);
        }
        _ = sigint.recv() => {
            msg_info!(Message::WatcherReceivedSigint);
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            msg_info!(Message::WatcherReceivedCtrlC);
        }
        Err(e) => {
            msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
            msg_warning!(Message::WatcherSignalHandlingNotSupported);
            std::future::pending::<()>().await;
        }
    }
}
