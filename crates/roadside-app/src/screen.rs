//! Declarative screen descriptions handed to the host renderer
//!
//! The host renders a [`Screen`] as it sees fit and reports selections and
//! actions back by item index and [`ActionId`]. Overlays and notifications
//! are presented on top of whatever screen is visible.

use serde::Serialize;

use crate::flow::{Confirmation, FlowData};
use crate::gate::GateStatus;
use roadside_core::{Advisory, Car, Destination, Issue, Operation, PointOfInterest, Tab};

/// Which screen a description is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    /// Unmet prerequisites of the assistance flow
    Welcome,
    IssueGrid,
    CarList,
    DestinationList,
    DestinationDetail,
    Summary,
    RequestSent,
    GasStations,
    EvCharging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Information,
    Grid,
    List,
    PointsOfInterest,
}

/// Buttons the host reports back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    FourWheelDriveYes,
    FourWheelDriveNo,
    ConfirmDestination,
    Back,
    Submit,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenAction {
    pub id: ActionId,
    pub label: String,
}

impl ScreenAction {
    pub fn new(id: ActionId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// A row, grid cell or information line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ScreenItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            icon: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Content of one tab slot or pushed screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub id: ScreenId,
    pub layout: Layout,
    pub title: String,
    pub items: Vec<ScreenItem>,
    pub actions: Vec<ScreenAction>,
    /// Content is still being fetched
    pub loading: bool,
}

impl Screen {
    fn new(id: ScreenId, layout: Layout, title: impl Into<String>) -> Self {
        Self {
            id,
            layout,
            title: title.into(),
            items: Vec::new(),
            actions: Vec::new(),
            loading: false,
        }
    }

    fn with_items(mut self, items: Vec<ScreenItem>) -> Self {
        self.items = items;
        self
    }

    fn with_action(mut self, id: ActionId, label: &str) -> Self {
        self.actions.push(ScreenAction::new(id, label));
        self
    }

    fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Information screen listing each unmet prerequisite
    pub fn gating(gate: GateStatus) -> Self {
        let mut items = Vec::new();
        if !gate.logged_in {
            items.push(
                ScreenItem::new("Login required")
                    .with_detail("You need to be logged in before proceeding further"),
            );
        }
        if !gate.precise_location {
            items.push(ScreenItem::new("Precise location required").with_detail(
                "Open the roadside app and enable precise location or enable it from the Settings app.",
            ));
        }

        Self::new(ScreenId::Welcome, Layout::Information, "Welcome").with_items(items)
    }

    pub fn issue_grid(issues: &[Issue], loading: bool) -> Self {
        let items = issues
            .iter()
            .map(|issue| ScreenItem::new(&issue.title).with_icon(&issue.icon))
            .collect();

        Self::new(ScreenId::IssueGrid, Layout::Grid, "What happened?")
            .with_items(items)
            .loading(loading)
    }

    pub fn car_list(cars: &[Car], loading: bool) -> Self {
        let items = cars
            .iter()
            .map(|car| ScreenItem::new(car.display_name()).with_detail(&car.plate))
            .collect();

        Self::new(ScreenId::CarList, Layout::List, "Select your car")
            .with_items(items)
            .loading(loading)
            .with_action(ActionId::Back, "Back")
    }

    pub fn destination_list(destinations: &[Destination]) -> Self {
        let items = destinations
            .iter()
            .map(|destination| {
                ScreenItem::new(&destination.name).with_detail(format!(
                    "{:.1} mi · {}",
                    destination.distance_miles, destination.address
                ))
            })
            .collect();

        Self::new(ScreenId::DestinationList, Layout::List, "Tow destination")
            .with_items(items)
            .with_action(ActionId::Back, "Back")
    }

    /// Terms of one destination, pushed over the destination list
    pub fn destination_detail(destination: &Destination) -> Self {
        let items = vec![
            ScreenItem::new(&destination.name).with_detail(destination.address.to_string()),
            ScreenItem::new("Distance").with_detail(format!("{:.1} mi", destination.distance_miles)),
            ScreenItem::new("Terms").with_detail(&destination.terms),
        ];

        Self::new(ScreenId::DestinationDetail, Layout::Information, "Destination details")
            .with_items(items)
            .with_action(ActionId::ConfirmDestination, "Confirm")
            .with_action(ActionId::Back, "Back")
    }

    pub fn summary(data: &FlowData) -> Self {
        let mut items = Vec::new();
        if let Some(issue) = &data.issue {
            items.push(ScreenItem::new("Issue").with_detail(&issue.title));
        }
        if let Some(car) = &data.car {
            items.push(ScreenItem::new("Car").with_detail(car.display_name()));
        }
        if let Some(four_wheel_drive) = data.four_wheel_drive {
            let drivetrain = if four_wheel_drive { "4WD / AWD" } else { "2WD" };
            items.push(ScreenItem::new("Drivetrain").with_detail(drivetrain));
        }
        if let Some(destination) = &data.tow_destination {
            items.push(
                ScreenItem::new("Tow destination")
                    .with_detail(format!("{}, {}", destination.name, destination.address)),
            );
        }

        Self::new(ScreenId::Summary, Layout::Information, "Summary")
            .with_items(items)
            .with_action(ActionId::Submit, "Submit")
            .with_action(ActionId::Back, "Back")
    }

    pub fn request_sent(confirmation: Option<&Confirmation>) -> Self {
        let mut items = vec![ScreenItem::new("Help is on the way")
            .with_detail("A service provider will contact you shortly.")];
        if let Some(confirmation) = confirmation {
            items.push(ScreenItem::new("Reference").with_detail(&confirmation.reference));
            items.push(
                ScreenItem::new("Submitted")
                    .with_detail(confirmation.submitted_at.format("%H:%M").to_string()),
            );
        }

        Self::new(ScreenId::RequestSent, Layout::Information, "Request sent").with_items(items)
    }

    /// Map pin list of the gas station or EV charging tab
    pub fn points_of_interest(tab: Tab, pois: &[PointOfInterest]) -> Self {
        let (id, title) = match tab {
            Tab::EvCharging => (ScreenId::EvCharging, "EV charging stations"),
            _ => (ScreenId::GasStations, "Gas stations"),
        };
        let items = pois
            .iter()
            .map(|poi| ScreenItem::new(&poi.name).with_detail(poi.address.to_string()))
            .collect();

        Self::new(id, Layout::PointsOfInterest, title).with_items(items)
    }
}

/// Modal shown above the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Tow destinations are being fetched after a car was picked
    Loading,
    FourWheelDrivePrompt,
    /// The request is being submitted
    Processing,
}

impl Overlay {
    pub fn title(self) -> &'static str {
        match self {
            Overlay::Loading => "Loading...",
            Overlay::FourWheelDrivePrompt => "Is your car 4WD or AWD?",
            Overlay::Processing => "Sending your request...",
        }
    }

    pub fn actions(self) -> Vec<ScreenAction> {
        match self {
            Overlay::FourWheelDrivePrompt => vec![
                ScreenAction::new(ActionId::FourWheelDriveYes, "Yes"),
                ScreenAction::new(ActionId::FourWheelDriveNo, "No"),
            ],
            Overlay::Loading | Overlay::Processing => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    Advisory,
    Failure { operation: Operation },
}

/// Dismissible message shown atop the current screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub actions: Vec<ScreenAction>,
}

impl Notification {
    fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            actions: vec![ScreenAction::new(ActionId::Dismiss, "Dismiss")],
        }
    }

    pub fn advisory(advisory: &Advisory) -> Self {
        Self::new(NotificationKind::Advisory, &advisory.title, &advisory.message)
    }

    pub fn failure(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(
            NotificationKind::Failure { operation },
            format!("Could not load {}", operation),
            message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::canned;

    #[test]
    fn test_gating_lists_only_unmet_prerequisites() {
        let labels = |gate| {
            Screen::gating(gate)
                .items
                .into_iter()
                .map(|i| i.label)
                .collect::<Vec<_>>()
        };

        assert_eq!(labels(GateStatus::new(false, true)), vec!["Login required"]);
        assert_eq!(
            labels(GateStatus::new(true, false)),
            vec!["Precise location required"]
        );
        assert_eq!(labels(GateStatus::new(false, false)).len(), 2);
        assert!(labels(GateStatus::open()).is_empty());
    }

    #[test]
    fn test_issue_grid_uses_grid_layout_with_icons() {
        let screen = Screen::issue_grid(&canned::issues(), false);
        assert_eq!(screen.layout, Layout::Grid);
        assert_eq!(screen.items.len(), 6);
        assert!(screen.items.iter().all(|i| i.icon.is_some()));
    }

    #[test]
    fn test_empty_issue_grid_while_loading() {
        let screen = Screen::issue_grid(&[], true);
        assert!(screen.items.is_empty());
        assert!(screen.loading);
    }

    #[test]
    fn test_destination_detail_offers_confirm() {
        let destination = &canned::tow_destinations()[0];
        let screen = Screen::destination_detail(destination);
        assert!(screen
            .actions
            .iter()
            .any(|a| a.id == ActionId::ConfirmDestination));
        assert!(screen
            .items
            .iter()
            .any(|i| i.detail.as_deref() == Some(destination.terms.as_str())));
    }

    #[test]
    fn test_four_wheel_drive_prompt_has_yes_and_no() {
        let ids: Vec<_> = Overlay::FourWheelDrivePrompt
            .actions()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![ActionId::FourWheelDriveYes, ActionId::FourWheelDriveNo]);
        assert!(Overlay::Loading.actions().is_empty());
    }

    #[test]
    fn test_notification_has_single_dismiss_action() {
        let notification = Notification::failure(Operation::Issues, "offline");
        assert_eq!(notification.actions.len(), 1);
        assert_eq!(notification.actions[0].id, ActionId::Dismiss);
        assert_eq!(notification.title, "Could not load issues");
    }

    #[test]
    fn test_points_of_interest_screen_per_tab() {
        let pois = canned::points_of_interest();
        assert_eq!(
            Screen::points_of_interest(Tab::GasStations, &pois).id,
            ScreenId::GasStations
        );
        let ev = Screen::points_of_interest(Tab::EvCharging, &pois);
        assert_eq!(ev.id, ScreenId::EvCharging);
        assert_eq!(ev.title, "EV charging stations");
        assert_eq!(ev.items.len(), 2);
    }
}
