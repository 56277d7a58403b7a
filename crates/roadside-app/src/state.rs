//! Application state (Model in TEA pattern)

use std::sync::Arc;

use crate::config::Settings;
use crate::flow::ConnectionId;
use crate::services::{PermissionState, SessionState};
use crate::tabs::TabContainerController;

/// Everything the update function reads and writes.
///
/// `container` exists only while the head unit is connected; dropping it
/// discards the flow and its selections.
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub session: Arc<SessionState>,
    pub permission: Arc<PermissionState>,
    pub container: Option<TabContainerController>,

    /// Last connection id handed out
    last_connection: u64,

    quit_requested: bool,
}

impl AppState {
    pub fn new(
        settings: Settings,
        session: Arc<SessionState>,
        permission: Arc<PermissionState>,
    ) -> Self {
        Self {
            settings,
            session,
            permission,
            container: None,
            last_connection: 0,
            quit_requested: false,
        }
    }

    /// In-memory state built from settings alone
    pub fn with_settings(settings: Settings) -> Self {
        let session = Arc::new(SessionState::new(settings.session.logged_in));
        let permission = Arc::new(PermissionState::from_flag(
            settings.session.precise_location,
        ));
        Self::new(settings, session, permission)
    }

    pub fn is_connected(&self) -> bool {
        self.container.is_some()
    }

    pub fn next_connection_id(&mut self) -> ConnectionId {
        self.last_connection += 1;
        ConnectionId(self.last_connection)
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_ids_are_unique() {
        let mut state = AppState::with_settings(Settings::default());
        let first = state.next_connection_id();
        let second = state.next_connection_id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_with_settings_applies_session_defaults() {
        let state = AppState::with_settings(Settings::default());
        assert!(!state.session.is_logged_in());
        assert!(state.permission.is_precise_location_enabled());
        assert!(!state.is_connected());
        assert!(!state.should_quit());
    }
}
