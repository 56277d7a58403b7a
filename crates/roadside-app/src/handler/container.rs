//! Connection lifecycle and tab container handlers

use crate::flow::TabSelectionOrigin;
use crate::message::Message;
use crate::state::AppState;
use crate::tabs::{ContainerUpdate, TabContainerController};
use roadside_core::prelude::*;

use super::{UpdateAction, UpdateResult};

/// Build a fresh container with a new connection id
pub fn handle_connect(state: &mut AppState) -> UpdateResult {
    if state.is_connected() {
        debug!("Connect ignored, already connected");
        return UpdateResult::none();
    }

    let connection = state.next_connection_id();
    let (container, update) = TabContainerController::connect(
        connection,
        state.session.clone(),
        state.permission.clone(),
    );
    info!(
        "Head unit connected ({}), assistance at {}",
        connection,
        container.flow().step()
    );
    state.container = Some(container);

    into_result(state, update)
}

/// Drop the container; results still in flight are discarded on arrival
pub fn handle_disconnect(state: &mut AppState) -> UpdateResult {
    match state.container.take() {
        Some(container) => {
            info!("Head unit disconnected ({})", container.flow().connection());
        }
        None => debug!("Disconnect ignored, not connected"),
    }
    UpdateResult::none()
}

/// Run `f` against the connected container.
///
/// Messages arriving while disconnected are dropped.
pub fn with_container(
    state: &mut AppState,
    f: impl FnOnce(&mut TabContainerController) -> ContainerUpdate,
) -> UpdateResult {
    match state.container.as_mut() {
        Some(container) => {
            let update = f(container);
            into_result(state, update)
        }
        None => {
            trace!("No container, message dropped");
            UpdateResult::none()
        }
    }
}

/// Turn a container update into follow-up work for the event loop.
///
/// The slot echo becomes a system-initiated tab selection.
fn into_result(state: &AppState, update: ContainerUpdate) -> UpdateResult {
    let submit_delay = state.settings.flow.submit_delay();
    let actions = update
        .effects
        .into_iter()
        .map(|effect| UpdateAction::from_effect(effect, submit_delay))
        .collect();

    UpdateResult {
        message: update.echo.map(|tab| Message::TabSelected {
            tab,
            origin: TabSelectionOrigin::SystemInitiated,
        }),
        actions,
    }
}
