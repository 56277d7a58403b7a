//! Login + precise location prerequisite of the assistance flow

use serde::Serialize;

use crate::services::{PermissionState, SessionState};

/// Snapshot of both prerequisites, read fresh whenever it is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GateStatus {
    pub logged_in: bool,
    pub precise_location: bool,
}

impl GateStatus {
    pub fn new(logged_in: bool, precise_location: bool) -> Self {
        Self {
            logged_in,
            precise_location,
        }
    }

    /// Both prerequisites met
    pub fn open() -> Self {
        Self::new(true, true)
    }

    pub fn read(session: &SessionState, permission: &PermissionState) -> Self {
        Self::new(
            session.is_logged_in(),
            permission.is_precise_location_enabled(),
        )
    }

    pub fn is_open(&self) -> bool {
        self.logged_in && self.precise_location
    }
}
