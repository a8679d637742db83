//! Signal handling for graceful shutdown.

use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Installed SIGTERM and SIGINT (Ctrl+C) handlers
#[derive(Debug)]
pub struct ShutdownSignals {
    sigterm: Signal,
    sigint: Signal,
}

impl ShutdownSignals {
    /// Install the handlers. Must be called inside a Tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for the first shutdown signal and return its name
    pub async fn recv(&mut self) -> &'static str {
        let name = tokio::select! {
            _ = self.sigterm.recv() => "SIGTERM",
            _ = self.sigint.recv() => "SIGINT",
        };
        tracing::info!(signal = name, "Received shutdown signal, initiating graceful shutdown");
        name
    }
}

/// Create the cancellation flag shared between the signal task and the dispatch loop
pub fn cancellation() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Spawn a task that raises the cancellation flag on the first shutdown signal
pub fn cancel_on_signal(mut signals: ShutdownSignals, cancel: watch::Sender<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        signals.recv().await;
        cancel.send_replace(true);
    })
}
