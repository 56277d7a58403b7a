//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;
use roadside_core::prelude::*;

use super::{container, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and actions
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Connect => container::handle_connect(state),
        Message::Disconnect => container::handle_disconnect(state),

        // ─────────────────────────────────────────────────────────
        // Host input
        // ─────────────────────────────────────────────────────────
        Message::TabSelected { tab, origin } => {
            container::with_container(state, |c| c.select_tab(tab, origin))
        }
        Message::ItemSelected { index } => {
            container::with_container(state, |c| c.handle_selection(index))
        }
        Message::Action(action) => container::with_container(state, |c| c.handle_action(action)),

        // ─────────────────────────────────────────────────────────
        // Gate inputs
        // ─────────────────────────────────────────────────────────
        Message::GateInputsChanged => {
            container::with_container(state, |c| c.on_permission_or_login_changed())
        }

        // The engine forwards the resulting watch change as GateInputsChanged
        Message::SetLoggedIn(logged_in) => {
            state.session.set_logged_in(logged_in);
            UpdateResult::none()
        }
        Message::ToggleLogin => {
            state.session.toggle();
            UpdateResult::none()
        }
        Message::SetLocationAuthorization(authorization) => {
            state.permission.set_authorization(authorization);
            UpdateResult::none()
        }
        Message::SetLocationAccuracy(accuracy) => {
            state.permission.set_accuracy(accuracy);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Async results
        // ─────────────────────────────────────────────────────────
        Message::DataLoaded { ticket, payload } => {
            container::with_container(state, |c| c.apply_loaded(ticket, payload))
        }
        Message::DataFetchFailed {
            ticket,
            operation,
            error,
        } => container::with_container(state, |c| c.apply_failed(ticket, operation, &error)),
        Message::SubmitCompleted {
            ticket,
            confirmation,
        } => {
            if state.container.is_none() {
                debug!("Submission {} finished after disconnect", confirmation.reference);
            }
            container::with_container(state, |c| c.complete_submission(ticket, confirmation))
        }
    }
}
