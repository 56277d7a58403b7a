//! Tab bar container hosting the assistance flow slot

use std::sync::Arc;

use crate::flow::{
    AssistanceFlowController, Confirmation, ConnectionId, DataPayload, FetchTicket, FlowEffect,
    TabSelectionOrigin,
};
use crate::gate::GateStatus;
use crate::screen::{ActionId, Screen};
use crate::services::{canned, PermissionState, SessionState};
use roadside_core::prelude::*;
use roadside_core::{Operation, Tab};

/// Outcome of a container operation
#[derive(Debug, Default, PartialEq)]
pub struct ContainerUpdate {
    /// Queries or submissions to start
    pub effects: Vec<FlowEffect>,
    /// The assistance slot was swapped and the host will report the current
    /// tab as selected again
    pub echo: Option<Tab>,
}

/// Owns the three tab slots for one connection.
///
/// The gas station and EV charging slots are built once. The assistance slot
/// holds either the prerequisites screen or the flow's current screen, and is
/// recomputed from a fresh [`GateStatus`] after every change.
#[derive(Debug)]
pub struct TabContainerController {
    session: Arc<SessionState>,
    permission: Arc<PermissionState>,
    slots: Vec<Screen>,
    selected: Tab,
    flow: AssistanceFlowController,
}

impl TabContainerController {
    pub fn connect(
        connection: ConnectionId,
        session: Arc<SessionState>,
        permission: Arc<PermissionState>,
    ) -> (Self, ContainerUpdate) {
        let gate = GateStatus::read(&session, &permission);
        let (flow, effects) = AssistanceFlowController::connect(connection, gate);

        let pois = canned::points_of_interest();
        let slots = Tab::ALL
            .iter()
            .map(|&tab| match tab {
                Tab::RoadsideAssistance => flow.current_screen(gate),
                tab => Screen::points_of_interest(tab, &pois),
            })
            .collect();

        let container = Self {
            session,
            permission,
            slots,
            selected: Tab::default(),
            flow,
        };
        let update = ContainerUpdate {
            effects,
            echo: None,
        };
        (container, update)
    }

    pub fn gate(&self) -> GateStatus {
        GateStatus::read(&self.session, &self.permission)
    }

    pub fn selected(&self) -> Tab {
        self.selected
    }

    pub fn slot(&self, tab: Tab) -> &Screen {
        &self.slots[tab.index()]
    }

    pub fn slots(&self) -> &[Screen] {
        &self.slots
    }

    pub fn flow(&self) -> &AssistanceFlowController {
        &self.flow
    }

    /// Screen on top of the selected tab
    pub fn visible_screen(&self) -> Screen {
        if self.selected == Tab::RoadsideAssistance {
            if let Some(pushed) = self.flow.pushed_screen() {
                return pushed;
            }
        }
        self.slot(self.selected).clone()
    }

    fn assistance_selected(&self) -> bool {
        self.selected == Tab::RoadsideAssistance
    }

    /// Sync the flow with the gate and swap the assistance slot if its
    /// content changed. The other slots are never touched.
    fn refresh(&mut self, mut effects: Vec<FlowEffect>) -> ContainerUpdate {
        let gate = self.gate();
        effects.extend(self.flow.on_gating_condition_changed(gate));

        let screen = self.flow.current_screen(gate);
        let slot = &mut self.slots[Tab::RoadsideAssistance.index()];
        let echo = if *slot != screen {
            trace!("Assistance slot now {:?}", screen.id);
            *slot = screen;
            Some(self.selected)
        } else {
            None
        };

        ContainerUpdate { effects, echo }
    }

    pub fn rebuild_assistance_slot(&mut self) -> ContainerUpdate {
        self.refresh(Vec::new())
    }

    /// Login or location permission changed. The selected tab is kept.
    pub fn on_permission_or_login_changed(&mut self) -> ContainerUpdate {
        debug!("Gate inputs changed: {:?}", self.gate());
        self.rebuild_assistance_slot()
    }

    pub fn select_tab(&mut self, tab: Tab, origin: TabSelectionOrigin) -> ContainerUpdate {
        if tab != self.selected {
            debug!("Tab selected: {} ({:?})", tab, origin);
        }
        self.selected = tab;

        if self.flow.on_tab_selected(tab, origin) {
            self.rebuild_assistance_slot()
        } else {
            ContainerUpdate::default()
        }
    }

    /// Item `index` of the visible screen was picked
    pub fn handle_selection(&mut self, index: usize) -> ContainerUpdate {
        if !self.assistance_selected() {
            debug!("Selection {} on {} tab has no action", index, self.selected);
            return ContainerUpdate::default();
        }
        if !self.gate().is_open() {
            return self.rebuild_assistance_slot();
        }

        let effects = self.flow.handle_selection(index);
        self.refresh(effects)
    }

    /// A button of the visible screen, overlay or notification was pressed
    pub fn handle_action(&mut self, action: ActionId) -> ContainerUpdate {
        if action != ActionId::Dismiss && !self.assistance_selected() {
            debug!("Action {:?} ignored on {} tab", action, self.selected);
            return ContainerUpdate::default();
        }

        let effects = self.flow.handle_action(action);
        self.refresh(effects)
    }

    pub fn apply_loaded(&mut self, ticket: FetchTicket, payload: DataPayload) -> ContainerUpdate {
        let assistance_selected = self.assistance_selected();
        self.flow.apply_loaded(ticket, payload, assistance_selected);
        self.rebuild_assistance_slot()
    }

    pub fn apply_failed(
        &mut self,
        ticket: FetchTicket,
        operation: Operation,
        message: &str,
    ) -> ContainerUpdate {
        self.flow.apply_failed(ticket, operation, message);
        self.rebuild_assistance_slot()
    }

    pub fn complete_submission(
        &mut self,
        ticket: FetchTicket,
        confirmation: Confirmation,
    ) -> ContainerUpdate {
        self.flow.complete_submission(ticket, confirmation);
        self.rebuild_assistance_slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowStep;
    use crate::screen::ScreenId;
    use crate::services::LocationGrant;
    use roadside_core::LocationAccuracy;

    fn container(logged_in: bool, precise: bool) -> TabContainerController {
        let session = Arc::new(SessionState::new(logged_in));
        let permission = Arc::new(PermissionState::from_flag(precise));
        TabContainerController::connect(ConnectionId(1), session, permission).0
    }

    fn load_issues(container: &mut TabContainerController) -> ContainerUpdate {
        let ticket = container.flow().ticket();
        container.apply_loaded(ticket, DataPayload::Issues(canned::issues()))
    }

    #[test]
    fn test_assistance_slot_is_gating_iff_gate_closed() {
        for logged_in in [false, true] {
            for precise in [false, true] {
                let container = container(logged_in, precise);
                let gating = container.slot(Tab::RoadsideAssistance).id == ScreenId::Welcome;
                assert_eq!(gating, !(logged_in && precise), "{} {}", logged_in, precise);
            }
        }
    }

    #[test]
    fn test_connect_selects_gas_stations() {
        let container = container(true, true);
        assert_eq!(container.selected(), Tab::GasStations);
        assert_eq!(container.visible_screen().id, ScreenId::GasStations);
    }

    #[test]
    fn test_login_rebuilds_slot_and_keeps_selected_tab() {
        let session = Arc::new(SessionState::new(false));
        let permission = Arc::new(PermissionState::from_flag(true));
        let (mut container, _) =
            TabContainerController::connect(ConnectionId(1), session.clone(), permission);
        container.select_tab(Tab::EvCharging, TabSelectionOrigin::UserInitiated);
        let gas = container.slot(Tab::GasStations).clone();
        let ev = container.slot(Tab::EvCharging).clone();

        session.set_logged_in(true);
        let update = container.on_permission_or_login_changed();

        assert_eq!(container.flow().step(), FlowStep::SelectIssue);
        assert_eq!(container.slot(Tab::RoadsideAssistance).id, ScreenId::IssueGrid);
        assert_eq!(container.selected(), Tab::EvCharging);
        assert_eq!(update.echo, Some(Tab::EvCharging));
        assert!(update
            .effects
            .iter()
            .any(|e| matches!(e, FlowEffect::Fetch { operation: Operation::Issues, .. })));
        assert_eq!(container.slot(Tab::GasStations), &gas);
        assert_eq!(container.slot(Tab::EvCharging), &ev);
    }

    #[test]
    fn test_reduced_accuracy_mid_flow_shows_gating() {
        let session = Arc::new(SessionState::new(true));
        let permission = Arc::new(PermissionState::new(LocationGrant::precise()));
        let (mut container, _) =
            TabContainerController::connect(ConnectionId(1), session, permission.clone());
        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);
        load_issues(&mut container);
        container.handle_selection(0);
        assert_eq!(container.flow().step(), FlowStep::SelectCar);

        permission.set_accuracy(LocationAccuracy::Reduced);
        container.on_permission_or_login_changed();

        assert_eq!(container.flow().step(), FlowStep::Gating);
        let screen = container.visible_screen();
        assert_eq!(screen.id, ScreenId::Welcome);
        assert_eq!(screen.items[0].label, "Precise location required");
        assert!(container.flow().data().issue.is_some());
    }

    #[test]
    fn test_system_echo_does_not_reevaluate_gate() {
        let session = Arc::new(SessionState::new(false));
        let permission = Arc::new(PermissionState::from_flag(true));
        let (mut container, _) =
            TabContainerController::connect(ConnectionId(1), session.clone(), permission);
        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);

        // Login flips without the change reaching the container yet
        session.set_logged_in(true);
        let update =
            container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::SystemInitiated);

        assert_eq!(update, ContainerUpdate::default());
        assert_eq!(container.flow().step(), FlowStep::Gating);

        let update =
            container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);
        assert_eq!(container.flow().step(), FlowStep::SelectIssue);
        assert_eq!(update.echo, Some(Tab::RoadsideAssistance));
    }

    #[test]
    fn test_echo_of_echo_settles() {
        let mut container = container(true, true);
        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);

        let update = load_issues(&mut container);
        let echo = update.echo.unwrap();
        let update = container.select_tab(echo, TabSelectionOrigin::SystemInitiated);

        assert_eq!(update, ContainerUpdate::default());
    }

    #[test]
    fn test_unchanged_slot_produces_no_echo() {
        let mut container = container(false, false);
        let update = container.rebuild_assistance_slot();
        assert_eq!(update.echo, None);
    }

    #[test]
    fn test_advisory_delivered_once_on_assistance_selection() {
        let mut container = container(true, true);
        let ticket = container.flow().ticket();

        container.apply_loaded(ticket, DataPayload::Advisory(canned::advisory()));
        assert!(container.flow().notification().is_none());

        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);
        assert!(container.flow().notification().is_some());

        container.handle_action(ActionId::Dismiss);
        container.select_tab(Tab::GasStations, TabSelectionOrigin::UserInitiated);
        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);
        assert!(container.flow().notification().is_none());
    }

    #[test]
    fn test_selection_on_poi_tab_is_ignored() {
        let mut container = container(true, true);
        load_issues(&mut container);

        let update = container.handle_selection(0);

        assert_eq!(update, ContainerUpdate::default());
        assert_eq!(container.flow().step(), FlowStep::SelectIssue);
    }

    #[test]
    fn test_selection_with_closed_gate_is_ignored() {
        let mut container = container(false, true);
        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);

        let update = container.handle_selection(0);

        assert!(update.effects.is_empty());
        assert_eq!(container.flow().step(), FlowStep::Gating);
    }

    #[test]
    fn test_detail_screen_is_pushed_over_destination_list() {
        let mut container = container(true, true);
        container.select_tab(Tab::RoadsideAssistance, TabSelectionOrigin::UserInitiated);
        load_issues(&mut container);
        container.handle_selection(0);
        let ticket = container.flow().ticket();
        container.apply_loaded(ticket, DataPayload::Cars(canned::cars()));
        container.handle_selection(0);
        let ticket = container.flow().ticket();
        container.apply_loaded(ticket, DataPayload::Destinations(canned::tow_destinations()));
        container.handle_action(ActionId::FourWheelDriveYes);

        container.handle_selection(1);

        assert_eq!(container.slot(Tab::RoadsideAssistance).id, ScreenId::DestinationList);
        assert_eq!(container.visible_screen().id, ScreenId::DestinationDetail);

        container.select_tab(Tab::GasStations, TabSelectionOrigin::UserInitiated);
        assert_eq!(container.visible_screen().id, ScreenId::GasStations);
    }
}
