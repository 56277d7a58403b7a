//! Step state machine of the roadside assistance wizard

use std::collections::VecDeque;

use super::data::{Confirmation, FlowData};
use super::step::{
    ConnectionId, DataPayload, FetchTicket, FlowEffect, FlowStep, TabSelectionOrigin,
};
use crate::gate::GateStatus;
use crate::screen::{ActionId, Notification, Overlay, Screen};
use roadside_core::prelude::*;
use roadside_core::{Advisory, Car, Destination, Issue, Operation, Tab};

/// Drives the assistance tab for one container connection.
///
/// Every mutating call returns the [`FlowEffect`]s the host must start.
/// Query results come back through [`apply_loaded`](Self::apply_loaded) and
/// [`apply_failed`](Self::apply_failed) and are dropped when their ticket is
/// no longer current.
#[derive(Debug)]
pub struct AssistanceFlowController {
    connection: ConnectionId,
    step: FlowStep,
    epoch: u64,
    data: FlowData,

    issues: Vec<Issue>,
    cars: Vec<Car>,
    destinations: Vec<Destination>,
    /// Query the current step is waiting on
    loading: Option<Operation>,

    overlay: Option<Overlay>,
    notifications: VecDeque<Notification>,
    cached_advisory: Option<Advisory>,
    confirmation: Option<Confirmation>,
}

impl AssistanceFlowController {
    /// Start a flow for a new connection.
    ///
    /// The advisory is requested once here; the issues too when the gate is
    /// already open.
    pub fn connect(connection: ConnectionId, gate: GateStatus) -> (Self, Vec<FlowEffect>) {
        let mut flow = Self {
            connection,
            step: FlowStep::Gating,
            epoch: 0,
            data: FlowData::default(),
            issues: Vec::new(),
            cars: Vec::new(),
            destinations: Vec::new(),
            loading: None,
            overlay: None,
            notifications: VecDeque::new(),
            cached_advisory: None,
            confirmation: None,
        };

        let mut effects = vec![FlowEffect::Fetch {
            operation: Operation::Advisory,
            ticket: flow.ticket(),
        }];
        let initial = if gate.is_open() {
            FlowStep::SelectIssue
        } else {
            FlowStep::Gating
        };
        effects.extend(flow.enter(initial));

        info!("Assistance flow {} started at {}", connection, flow.step);
        (flow, effects)
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn data(&self) -> &FlowData {
        &self.data
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Notification currently on top, if any
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn cached_advisory(&self) -> Option<&Advisory> {
        self.cached_advisory.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Ticket for a query dispatched now
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            connection: self.connection,
            epoch: self.epoch,
        }
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket == self.ticket()
    }

    // ─────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────

    /// Root screen of the assistance slot for `gate`
    pub fn current_screen(&self, gate: GateStatus) -> Screen {
        if !gate.is_open() {
            return Screen::gating(gate);
        }

        let loading = |operation| self.loading == Some(operation);
        match self.step {
            FlowStep::Gating => Screen::gating(gate),
            FlowStep::SelectIssue => Screen::issue_grid(&self.issues, loading(Operation::Issues)),
            FlowStep::SelectCar => Screen::car_list(&self.cars, loading(Operation::Cars)),
            FlowStep::SelectTowDestination | FlowStep::TowDestinationDetail => {
                Screen::destination_list(&self.destinations)
            }
            FlowStep::Summary => Screen::summary(&self.data),
            FlowStep::RequestSent => Screen::request_sent(self.confirmation.as_ref()),
        }
    }

    /// Screen pushed over the slot's root screen
    pub fn pushed_screen(&self) -> Option<Screen> {
        match (self.step, &self.data.tow_destination) {
            (FlowStep::TowDestinationDetail, Some(destination)) => {
                Some(Screen::destination_detail(destination))
            }
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────

    /// Move to `step`, invalidating every outstanding ticket.
    fn enter(&mut self, step: FlowStep) -> Vec<FlowEffect> {
        self.epoch += 1;
        self.step = step;
        self.overlay = None;
        self.loading = None;
        debug!("Flow {} entered {} (epoch {})", self.connection, step, self.epoch);

        let operation = match step {
            FlowStep::SelectIssue => {
                self.issues.clear();
                Operation::Issues
            }
            FlowStep::SelectCar => {
                self.cars.clear();
                Operation::Cars
            }
            _ => return Vec::new(),
        };

        self.loading = Some(operation);
        vec![FlowEffect::Fetch {
            operation,
            ticket: self.ticket(),
        }]
    }

    /// Re-evaluate the step against the gate.
    ///
    /// An open gate always restarts at the issue grid. A closed gate drops the
    /// step position, overlays and pushed screens but keeps [`FlowData`].
    pub fn on_gating_condition_changed(&mut self, gate: GateStatus) -> Vec<FlowEffect> {
        match (gate.is_open(), self.step) {
            (true, FlowStep::Gating) => {
                info!("Gate opened, starting assistance flow");
                self.enter(FlowStep::SelectIssue)
            }
            (false, step) if step != FlowStep::Gating => {
                info!("Gate closed during {}, showing prerequisites", step);
                self.enter(FlowStep::Gating)
            }
            _ => Vec::new(),
        }
    }

    /// A tab was selected.
    ///
    /// Delivers a cached advisory when the assistance tab is shown. Returns
    /// whether the gate must be re-evaluated, which only user selections of
    /// the assistance tab ask for.
    pub fn on_tab_selected(&mut self, tab: Tab, origin: TabSelectionOrigin) -> bool {
        if tab != Tab::RoadsideAssistance {
            return false;
        }

        if let Some(advisory) = self.cached_advisory.take() {
            debug!("Delivering cached advisory");
            self.notifications.push_back(Notification::advisory(&advisory));
        }

        origin == TabSelectionOrigin::UserInitiated
    }

    /// The driver picked item `index` of the current screen
    pub fn handle_selection(&mut self, index: usize) -> Vec<FlowEffect> {
        if let Some(overlay) = self.overlay {
            debug!("Selection {} ignored under {:?}", index, overlay);
            return Vec::new();
        }

        match self.step {
            FlowStep::SelectIssue => match self.issues.get(index) {
                Some(issue) => {
                    self.data.issue = Some(issue.clone());
                    self.enter(FlowStep::SelectCar)
                }
                None => self.ignore_selection(index),
            },
            FlowStep::SelectCar => match self.cars.get(index) {
                Some(car) => {
                    self.data.car = Some(car.clone());
                    self.overlay = Some(Overlay::Loading);
                    self.loading = Some(Operation::TowDestinations);
                    vec![FlowEffect::Fetch {
                        operation: Operation::TowDestinations,
                        ticket: self.ticket(),
                    }]
                }
                None => self.ignore_selection(index),
            },
            FlowStep::SelectTowDestination => match self.destinations.get(index) {
                Some(destination) => {
                    self.data.tow_destination = Some(destination.clone());
                    self.enter(FlowStep::TowDestinationDetail)
                }
                None => self.ignore_selection(index),
            },
            _ => self.ignore_selection(index),
        }
    }

    fn ignore_selection(&self, index: usize) -> Vec<FlowEffect> {
        debug!("Selection {} has no target in {}", index, self.step);
        Vec::new()
    }

    /// The driver pressed a button
    pub fn handle_action(&mut self, action: ActionId) -> Vec<FlowEffect> {
        match action {
            ActionId::Dismiss => {
                if self.notifications.pop_front().is_none() {
                    debug!("Nothing to dismiss");
                }
                Vec::new()
            }
            ActionId::FourWheelDriveYes | ActionId::FourWheelDriveNo
                if self.overlay == Some(Overlay::FourWheelDrivePrompt) =>
            {
                self.data.four_wheel_drive = Some(action == ActionId::FourWheelDriveYes);
                self.enter(FlowStep::SelectTowDestination)
            }
            _ if self.overlay.is_some() => {
                debug!("Action {:?} ignored under an overlay", action);
                Vec::new()
            }
            ActionId::ConfirmDestination if self.step == FlowStep::TowDestinationDetail => {
                self.enter(FlowStep::Summary)
            }
            ActionId::Submit if self.step == FlowStep::Summary && self.data.is_complete() => {
                info!("Submitting assistance request");
                self.overlay = Some(Overlay::Processing);
                vec![FlowEffect::Submit {
                    ticket: self.ticket(),
                }]
            }
            ActionId::Back => match self.step.previous() {
                Some(step) => self.enter(step),
                None => Vec::new(),
            },
            _ => {
                debug!("Action {:?} not available in {}", action, self.step);
                Vec::new()
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Async results
    // ─────────────────────────────────────────────────────────

    /// Merge a successful query result.
    ///
    /// The advisory only needs a matching connection; it is shown right away
    /// when the assistance tab is selected and cached otherwise. Other results
    /// apply only while their ticket is current.
    pub fn apply_loaded(
        &mut self,
        ticket: FetchTicket,
        payload: DataPayload,
        assistance_selected: bool,
    ) {
        if ticket.connection != self.connection {
            debug!(
                "Dropping {} result from connection {}",
                payload.operation(),
                ticket.connection
            );
            return;
        }

        if let DataPayload::Advisory(advisory) = payload {
            if assistance_selected {
                self.notifications.push_back(Notification::advisory(&advisory));
            } else {
                debug!("Assistance tab not selected, caching advisory");
                self.cached_advisory = Some(advisory);
            }
            return;
        }

        if !self.is_current(ticket) {
            debug!(
                "Dropping stale {} result (epoch {} != {})",
                payload.operation(),
                ticket.epoch,
                self.epoch
            );
            return;
        }

        match (self.step, payload) {
            (FlowStep::SelectIssue, DataPayload::Issues(issues)) => {
                self.issues = issues;
                self.loading = None;
            }
            (FlowStep::SelectCar, DataPayload::Cars(cars)) => {
                self.cars = cars;
                self.loading = None;
            }
            (FlowStep::SelectCar, DataPayload::Destinations(destinations))
                if self.overlay == Some(Overlay::Loading) =>
            {
                self.destinations = destinations;
                self.loading = None;
                self.overlay = Some(Overlay::FourWheelDrivePrompt);
            }
            (step, payload) => {
                warn!("Unexpected {} result in {}", payload.operation(), step);
            }
        }
    }

    /// Surface a failed query as a dismissible notification.
    ///
    /// The step never changes; a stale failure is dropped like a stale result.
    pub fn apply_failed(&mut self, ticket: FetchTicket, operation: Operation, message: &str) {
        let relevant = match operation {
            Operation::Advisory => ticket.connection == self.connection,
            _ => self.is_current(ticket),
        };
        if !relevant {
            debug!("Dropping stale {} failure", operation);
            return;
        }

        warn!("Query {} failed: {}", operation, message);
        if self.loading == Some(operation) {
            self.loading = None;
        }
        if operation == Operation::TowDestinations && self.overlay == Some(Overlay::Loading) {
            self.overlay = None;
        }
        self.notifications
            .push_back(Notification::failure(operation, message));
    }

    /// The submit delay elapsed
    pub fn complete_submission(&mut self, ticket: FetchTicket, confirmation: Confirmation) {
        if !self.is_current(ticket) || self.overlay != Some(Overlay::Processing) {
            debug!("Dropping stale submission {}", confirmation.reference);
            return;
        }

        info!("Request sent: {}", confirmation.reference);
        self.confirmation = Some(confirmation);
        self.enter(FlowStep::RequestSent);
    }
}
