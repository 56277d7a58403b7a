//! Wizard steps and the tags that route async results back to them

use serde::Serialize;
use std::fmt;

use roadside_core::{Advisory, Car, Destination, Issue, Operation};

/// Position of the assistance wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// Prerequisites unmet
    Gating,
    SelectIssue,
    SelectCar,
    SelectTowDestination,
    /// Terms pushed over the destination list
    TowDestinationDetail,
    Summary,
    /// Terminal
    RequestSent,
}

impl FlowStep {
    /// Step reached by the Back action, if any
    pub fn previous(self) -> Option<FlowStep> {
        match self {
            FlowStep::SelectCar => Some(FlowStep::SelectIssue),
            FlowStep::SelectTowDestination => Some(FlowStep::SelectCar),
            FlowStep::TowDestinationDetail => Some(FlowStep::SelectTowDestination),
            FlowStep::Summary => Some(FlowStep::SelectTowDestination),
            FlowStep::Gating | FlowStep::SelectIssue | FlowStep::RequestSent => None,
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowStep::Gating => "gating",
            FlowStep::SelectIssue => "select issue",
            FlowStep::SelectCar => "select car",
            FlowStep::SelectTowDestination => "select tow destination",
            FlowStep::TowDestinationDetail => "tow destination detail",
            FlowStep::Summary => "summary",
            FlowStep::RequestSent => "request sent",
        };
        f.write_str(name)
    }
}

/// Identifies one container connection; a fresh id per connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Context captured when a query is dispatched.
///
/// `epoch` advances on every step transition, so a result is current only
/// while both fields still match the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchTicket {
    pub connection: ConnectionId,
    pub epoch: u64,
}

/// Who caused a tab selection event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabSelectionOrigin {
    UserInitiated,
    /// Echo of the container swapping a slot
    SystemInitiated,
}

/// Successful query result
#[derive(Debug, Clone, PartialEq)]
pub enum DataPayload {
    Advisory(Advisory),
    Issues(Vec<Issue>),
    Cars(Vec<Car>),
    Destinations(Vec<Destination>),
}

impl DataPayload {
    pub fn operation(&self) -> Operation {
        match self {
            DataPayload::Advisory(_) => Operation::Advisory,
            DataPayload::Issues(_) => Operation::Issues,
            DataPayload::Cars(_) => Operation::Cars,
            DataPayload::Destinations(_) => Operation::TowDestinations,
        }
    }
}

/// Work the flow asks its host to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    Fetch {
        operation: Operation,
        ticket: FetchTicket,
    },
    Submit {
        ticket: FetchTicket,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_never_leaves_the_wizard() {
        assert_eq!(FlowStep::SelectIssue.previous(), None);
        assert_eq!(FlowStep::Gating.previous(), None);
        assert_eq!(FlowStep::RequestSent.previous(), None);
        assert_eq!(
            FlowStep::TowDestinationDetail.previous(),
            Some(FlowStep::SelectTowDestination)
        );
    }

    #[test]
    fn test_payload_operation() {
        assert_eq!(DataPayload::Cars(vec![]).operation(), Operation::Cars);
        assert_eq!(
            DataPayload::Destinations(vec![]).operation(),
            Operation::TowDestinations
        );
    }
}
