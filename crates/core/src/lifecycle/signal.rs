//! Signal handling for shutdown (SIGTERM/SIGINT) and config reload (SIGHUP).

use tokio::sync::watch;

/// Listens for OS signals and dispatches shutdown/reload.
pub struct SignalHandler {
    shutdown_tx: watch::Sender<bool>,
}

impl SignalHandler {
    /// Create a handler and a receiver that flips to `true` on shutdown.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { shutdown_tx: tx }, rx)
    }

    /// Run until a shutdown signal arrives, calling `reload_fn` on SIGHUP.
    pub async fn run<F>(self, reload_fn: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            match (
                signal(SignalKind::terminate()),
                signal(SignalKind::hangup()),
            ) {
                (Ok(mut sigterm), Ok(mut sighup)) => loop {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            tracing::info!("Received SIGINT, initiating shutdown...");
                            break;
                        }
                        _ = sigterm.recv() => {
                            tracing::info!("Received SIGTERM, initiating shutdown...");
                            break;
                        }
                        _ = sighup.recv() => {
                            tracing::info!("Received SIGHUP, reloading configuration...");
                            reload_fn();
                        }
                    }
                },
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!("Failed to install signal handlers: {e}, falling back to Ctrl+C");
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = &reload_fn;
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
            }
            tracing::info!("Received Ctrl+C, initiating shutdown...");
        }

        let _ = self.shutdown_tx.send(true);
    }
}
