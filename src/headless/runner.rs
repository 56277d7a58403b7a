//! Headless mode runner - console event loop standing in for the head unit
//!
//! Commands are read from stdin on a blocking thread and posted to the engine
//! channel. Every engine event with a console form is written to stdout as
//! NDJSON.

use std::path::Path;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use roadside_app::config::Settings;
use roadside_app::{Engine, EngineEvent, Message};
use roadside_core::Result;

use super::command::{parse_command, Command, HELP};
use super::HeadlessEvent;

/// Run in headless mode - output JSON events for every navigation change
pub async fn run_headless(config_dir: &Path, settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Roadside assistance starting in HEADLESS mode");
    info!("Config: {}", config_dir.display());
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::with_settings(config_dir, settings);
    let mut events = engine.subscribe();

    // Spawn headless-specific stdin reader
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    // The console host is the head unit, so it is connected from the start
    engine.process_message(Message::Connect);
    emit_engine_events(&mut events);

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown().await;

    info!("Roadside assistance headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => {
                engine.process_message(msg);
                emit_engine_events(events);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

/// Write every buffered engine event to stdout
fn emit_engine_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(headless) = HeadlessEvent::from_engine_event(&event) {
                    headless.emit();
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events skipped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Spawn stdin reader task that sends commands to message channel (blocking version)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stdin read error: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(Command::Send(msg))) => {
                let quit = matches!(msg, Message::Quit);
                if msg_tx.blocking_send(msg).is_err() || quit {
                    break;
                }
            }
            Ok(Some(Command::Help)) => HeadlessEvent::help(HELP).emit(),
            Ok(None) => {}
            Err(e) => {
                if e.is_recoverable() {
                    warn!("Stdin: {}", e);
                } else {
                    error!("Stdin: {}", e);
                }
                HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
            }
        }
    }

    info!("Stdin reader exiting");
}
