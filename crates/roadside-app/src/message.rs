//! Message types for the application (TEA pattern)

use crate::flow::{Confirmation, DataPayload, FetchTicket, TabSelectionOrigin};
use crate::screen::ActionId;
use roadside_core::{LocationAccuracy, LocationAuthorization, Operation, Tab};

/// All possible messages in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Head unit lifecycle
    // ─────────────────────────────────────────────────────────
    /// The head unit connected; builds a fresh tab container
    Connect,

    /// The head unit disconnected; discards the container and its flow
    Disconnect,

    // ─────────────────────────────────────────────────────────
    // Host input
    // ─────────────────────────────────────────────────────────
    TabSelected {
        tab: Tab,
        origin: TabSelectionOrigin,
    },

    /// Item of the visible screen picked
    ItemSelected { index: usize },

    /// Button pressed on the visible screen, overlay or notification
    Action(ActionId),

    // ─────────────────────────────────────────────────────────
    // Gate inputs
    // ─────────────────────────────────────────────────────────
    /// Login or location permission changed
    GateInputsChanged,

    SetLoggedIn(bool),

    ToggleLogin,

    SetLocationAuthorization(LocationAuthorization),

    SetLocationAccuracy(LocationAccuracy),

    // ─────────────────────────────────────────────────────────
    // Async results
    // ─────────────────────────────────────────────────────────
    DataLoaded {
        ticket: FetchTicket,
        payload: DataPayload,
    },

    DataFetchFailed {
        ticket: FetchTicket,
        operation: Operation,
        error: String,
    },

    /// The submit delay elapsed
    SubmitCompleted {
        ticket: FetchTicket,
        confirmation: Confirmation,
    },

    /// Force quit (signal handler, console `quit`)
    Quit,
}

impl Message {
    /// User selection of `tab`
    pub fn select_tab(tab: Tab) -> Self {
        Message::TabSelected {
            tab,
            origin: TabSelectionOrigin::UserInitiated,
        }
    }
}
