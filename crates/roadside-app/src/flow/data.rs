//! Selections collected during one pass through the wizard

use chrono::{DateTime, Local};
use serde::Serialize;

use roadside_core::{Car, Destination, Issue};

/// What the driver picked so far.
///
/// Fields fill in order as the driver advances. The record survives the gate
/// closing and reopening; only a disconnect replaces it with an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowData {
    pub issue: Option<Issue>,
    pub car: Option<Car>,
    pub four_wheel_drive: Option<bool>,
    pub tow_destination: Option<Destination>,
}

impl FlowData {
    /// All four selections made
    pub fn is_complete(&self) -> bool {
        self.issue.is_some()
            && self.car.is_some()
            && self.four_wheel_drive.is_some()
            && self.tow_destination.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Receipt of a submitted request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub reference: String,
    pub submitted_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::canned;

    #[test]
    fn test_default_is_empty_and_incomplete() {
        let data = FlowData::default();
        assert!(data.is_empty());
        assert!(!data.is_complete());
    }

    #[test]
    fn test_complete_requires_all_four() {
        let mut data = FlowData {
            issue: canned::issues().into_iter().next(),
            car: canned::cars().into_iter().next(),
            four_wheel_drive: Some(false),
            tow_destination: None,
        };
        assert!(!data.is_complete());

        data.tow_destination = canned::tow_destinations().into_iter().next();
        assert!(data.is_complete());
        assert!(!data.is_empty());
    }
}
