//! OS signals end the head-unit session
//!
//! A signal is treated like the head unit being unplugged followed by the
//! app closing: `Disconnect` first, so results still in flight land on a
//! dropped container, then `Quit`.

use tokio::sync::mpsc;

use crate::message::Message;
use roadside_core::prelude::*;

/// Spawn a task that waits for SIGINT/SIGTERM (Ctrl+C on Windows) and then
/// posts the shutdown sequence
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(signal) => {
                info!("{} received, closing the head-unit session", signal);
                post_shutdown_sequence(&tx).await;
            }
            Err(e) => error!("Signal handler unavailable: {}", e),
        }
    });
}

/// Messages posted when the process is asked to stop, in order
fn shutdown_sequence() -> [Message; 2] {
    [Message::Disconnect, Message::Quit]
}

async fn post_shutdown_sequence(tx: &mpsc::Sender<Message>) {
    for msg in shutdown_sequence() {
        if tx.send(msg).await.is_err() {
            debug!("Message channel closed before shutdown sequence finished");
            return;
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| Error::startup(format!("SIGINT listener: {}", e)))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| Error::startup(format!("SIGTERM listener: {}", e)))?;

    let name = tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    };
    Ok(name)
}

#[cfg(windows)]
async fn wait_for_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::startup(format!("Ctrl+C listener: {}", e)))?;
    Ok("Ctrl+C")
}
