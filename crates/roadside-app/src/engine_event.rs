//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`, so subscribers see a consistent view of state
//! changes.

use crate::flow::{ConnectionId, FlowStep};
use crate::screen::{Notification, Overlay, Screen};
use roadside_core::Tab;

#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Connection Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The head unit connected and a fresh container was built
    Connected {
        connection: ConnectionId,
        step: FlowStep,
    },

    /// The head unit disconnected; the flow was discarded
    Disconnected { connection: ConnectionId },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    StepChanged { old: FlowStep, new: FlowStep },

    TabChanged { tab: Tab },

    /// The assistance slot was replaced
    AssistanceSlotChanged { screen: Screen },

    /// The screen on top of the selected tab changed
    ScreenChanged { tab: Tab, screen: Screen },

    // ─────────────────────────────────────────────────────────
    // Modal content
    // ─────────────────────────────────────────────────────────
    NotificationShown { notification: Notification },

    /// `None` when the overlay was dismissed
    OverlayChanged { overlay: Option<Overlay> },

    RequestSent { reference: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Short label for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::Connected { .. } => "connected",
            EngineEvent::Disconnected { .. } => "disconnected",
            EngineEvent::StepChanged { .. } => "step_changed",
            EngineEvent::TabChanged { .. } => "tab_changed",
            EngineEvent::AssistanceSlotChanged { .. } => "assistance_slot_changed",
            EngineEvent::ScreenChanged { .. } => "screen_changed",
            EngineEvent::NotificationShown { .. } => "notification_shown",
            EngineEvent::OverlayChanged { .. } => "overlay_changed",
            EngineEvent::RequestSent { .. } => "request_sent",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}
