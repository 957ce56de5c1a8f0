// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that waits for SIGTERM or SIGINT and notifies
/// the accept loop to stop.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            log_register_failed("SIGTERM");
            return;
        };
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            log_register_failed("SIGINT");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                println!("\n[Signal] SIGTERM received, initiating graceful shutdown");
            }
            _ = sigint.recv() => {
                println!("\n[Signal] SIGINT received, initiating graceful shutdown");
            }
        }
        handler.shutdown.notify_waiters();
    });
}

#[cfg(unix)]
fn log_register_failed(name: &str) {
    crate::logger::log_error(&format!("Failed to register {name} handler"));
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[Signal] Ctrl+C received, initiating graceful shutdown");
            handler.shutdown.notify_waiters();
        }
    });
}
