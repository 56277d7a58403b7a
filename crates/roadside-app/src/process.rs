//! Message processing: runs the update loop and dispatches actions

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::services::DataSource;
use crate::state::AppState;

/// Process a message through the TEA update function.
///
/// Follow-up messages (such as the container's slot echo) are processed in
/// the same call, before any other queued message.
pub fn process_message<D>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    data_source: &Arc<D>,
    shutdown_rx: &watch::Receiver<bool>,
) where
    D: DataSource + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        for action in result.actions {
            handle_action(action, msg_tx.clone(), data_source, shutdown_rx.clone());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
