// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Cooperative cancellation on Ctrl+C / SIGTERM

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

/// Cancellation token, set once and never cleared
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// A token and the sender that triggers it
    pub fn new() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self { rx })
    }

    /// A token triggered by Ctrl+C or SIGTERM. Must be called inside a runtime.
    pub fn listen_for_signals() -> Self {
        let (tx, shutdown) = Self::new();

        tokio::spawn(async move {
            let ctrl_c = async {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to install Ctrl+C handler: {}", e);
                    std::future::pending::<()>().await;
                }
            };

            #[cfg(unix)]
            let terminate = async {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                    }
                    Err(e) => {
                        warn!("Failed to install SIGTERM handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                _ = terminate => info!("Received SIGTERM, shutting down..."),
            }

            let _ = tx.send(true);
        });

        shutdown
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once triggered; never resolves if the sender is gone untriggered
    pub async fn triggered(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger() {
        let (tx, mut shutdown) = Shutdown::new();
        assert!(!shutdown.is_triggered());

        tx.send(true).unwrap();
        assert!(shutdown.is_triggered());
        tokio::time::timeout(Duration::from_secs(1), shutdown.triggered())
            .await
            .expect("token should resolve once triggered");
    }

    #[tokio::test]
    async fn test_dropped_sender_is_not_a_trigger() {
        let (tx, mut shutdown) = Shutdown::new();
        drop(tx);

        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown.triggered()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
