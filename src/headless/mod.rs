//! Headless mode - line commands in, NDJSON events out
//!
//! The headless host stands in for the head-unit renderer. It reads one
//! command per line from stdin and writes structured JSON events to stdout.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type.
//!
//! # Example Output
//!
//! ```json
//! {"event":"connected","connection":1,"step":"gating","timestamp":1704700001000}
//! {"event":"screen","tab":"gas_stations","screen":{"id":"gas_stations",...},"timestamp":1704700001000}
//! {"event":"notification","kind":"advisory","title":"High demand",...,"timestamp":1704700006000}
//! ```

pub mod command;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use roadside_app::flow::FlowStep;
use roadside_app::screen::{Notification, Overlay, Screen, ScreenAction};
use roadside_app::EngineEvent;
use roadside_core::Tab;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Head unit connected
    Connected {
        connection: u64,
        step: FlowStep,
        timestamp: i64,
    },

    /// Head unit disconnected
    Disconnected { connection: u64, timestamp: i64 },

    /// The screen on top of the selected tab changed
    Screen {
        tab: Tab,
        screen: Screen,
        timestamp: i64,
    },

    StepChanged {
        old: FlowStep,
        new: FlowStep,
        timestamp: i64,
    },

    TabChanged {
        tab: Tab,
        title: &'static str,
        icon: &'static str,
        timestamp: i64,
    },

    /// Dismissible notification shown atop the current screen
    Notification {
        #[serde(flatten)]
        notification: Notification,
        timestamp: i64,
    },

    /// Modal shown or removed
    Overlay {
        overlay: Option<Overlay>,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        actions: Vec<ScreenAction>,
        timestamp: i64,
    },

    RequestSent { reference: String, timestamp: i64 },

    /// Reply to the `help` command
    Help { usage: String, timestamp: i64 },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Map an engine event to its console form.
    ///
    /// Slot replacements on a tab that is not visible and shutdown have no
    /// console form.
    pub fn from_engine_event(event: &EngineEvent) -> Option<Self> {
        let timestamp = Self::now();
        let headless = match event {
            EngineEvent::Connected { connection, step } => Self::Connected {
                connection: connection.0,
                step: *step,
                timestamp,
            },
            EngineEvent::Disconnected { connection } => Self::Disconnected {
                connection: connection.0,
                timestamp,
            },
            EngineEvent::StepChanged { old, new } => Self::StepChanged {
                old: *old,
                new: *new,
                timestamp,
            },
            EngineEvent::TabChanged { tab } => Self::TabChanged {
                tab: *tab,
                title: tab.title(),
                icon: tab.icon(),
                timestamp,
            },
            EngineEvent::ScreenChanged { tab, screen } => Self::Screen {
                tab: *tab,
                screen: screen.clone(),
                timestamp,
            },
            EngineEvent::NotificationShown { notification } => Self::Notification {
                notification: notification.clone(),
                timestamp,
            },
            EngineEvent::OverlayChanged { overlay } => Self::overlay(*overlay),
            EngineEvent::RequestSent { reference } => Self::RequestSent {
                reference: reference.clone(),
                timestamp,
            },
            EngineEvent::AssistanceSlotChanged { .. } | EngineEvent::Shutdown => return None,
        };
        Some(headless)
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn overlay(overlay: Option<Overlay>) -> Self {
        Self::Overlay {
            overlay,
            title: overlay.map(|o| o.title().to_string()),
            actions: overlay.map(|o| o.actions()).unwrap_or_default(),
            timestamp: Self::now(),
        }
    }

    pub fn help(usage: &str) -> Self {
        Self::Help {
            usage: usage.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}
