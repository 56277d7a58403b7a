//! End-to-end navigation tests driving the engine through its message channel
//!
//! Time is paused, so the simulated data source latency elapses instantly
//! while the ordering of results stays realistic.

use std::sync::Arc;
use std::time::Duration;

use roadside_app::config::Settings;
use roadside_app::screen::{ActionId, NotificationKind, Overlay, ScreenId};
use roadside_app::services::{FakeDataSource, PermissionState, SessionState};
use roadside_app::{ConnectionId, Engine, FlowStep, Message, TabContainerController};
use roadside_core::{LocationAccuracy, Operation, Tab};

const LATENCY: Duration = Duration::from_millis(100);

fn engine_with(logged_in: bool, data_source: FakeDataSource) -> Engine {
    Engine::with_parts(
        Settings::default(),
        Arc::new(SessionState::new(logged_in)),
        Arc::new(PermissionState::from_flag(true)),
        data_source,
    )
}

fn engine(logged_in: bool) -> Engine {
    engine_with(logged_in, FakeDataSource::new(LATENCY))
}

fn container(engine: &Engine) -> &TabContainerController {
    engine
        .state
        .container
        .as_ref()
        .expect("head unit connected")
}

/// Process `count` messages, waiting for each
async fn settle(engine: &mut Engine, count: usize) {
    for _ in 0..count {
        assert!(engine.process_next().await, "message channel closed");
    }
}

#[tokio::test(start_paused = true)]
async fn test_logged_out_driver_sees_welcome_screen() {
    let mut engine = engine(false);
    engine.process_message(Message::Connect);
    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));

    let screen = engine.visible_screen().unwrap();
    assert_eq!(screen.id, ScreenId::Welcome);
    assert!(screen.items.iter().any(|item| item.label == "Login required"));
    assert_eq!(container(&engine).flow().step(), FlowStep::Gating);
}

#[tokio::test(start_paused = true)]
async fn test_login_opens_gate_and_loads_issues() {
    let mut engine = engine(false);
    engine.process_message(Message::Connect);
    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));

    engine.process_message(Message::SetLoggedIn(true));
    // GateInputsChanged from the session observer
    settle(&mut engine, 1).await;
    assert_eq!(container(&engine).flow().step(), FlowStep::SelectIssue);

    // Advisory and issues
    settle(&mut engine, 2).await;

    let screen = engine.visible_screen().unwrap();
    assert_eq!(screen.id, ScreenId::IssueGrid);
    assert_eq!(screen.items.len(), 6);
    assert!(!screen.loading);
}

#[tokio::test(start_paused = true)]
async fn test_reduced_accuracy_mid_flow_returns_to_welcome() {
    let mut engine = engine(true);
    engine.process_message(Message::Connect);
    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));
    settle(&mut engine, 2).await;
    engine.process_message(Message::ItemSelected { index: 0 });
    assert_eq!(container(&engine).flow().step(), FlowStep::SelectCar);

    engine.process_message(Message::SetLocationAccuracy(LocationAccuracy::Reduced));
    // GateInputsChanged from the permission forwarder
    settle(&mut engine, 1).await;

    let container = container(&engine);
    assert_eq!(container.flow().step(), FlowStep::Gating);
    assert!(container.flow().data().issue.is_some());
    assert_eq!(container.selected(), Tab::RoadsideAssistance);

    let slot = container.slot(Tab::RoadsideAssistance);
    assert_eq!(slot.id, ScreenId::Welcome);
    assert!(slot
        .items
        .iter()
        .any(|item| item.label == "Precise location required"));
    assert!(!slot.items.iter().any(|item| item.label == "Login required"));
}

#[tokio::test(start_paused = true)]
async fn test_full_request_reaches_request_sent() {
    let mut engine = engine(true);
    engine.process_message(Message::Connect);
    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));
    settle(&mut engine, 2).await;
    engine.process_message(Message::Action(ActionId::Dismiss));

    engine.process_message(Message::ItemSelected { index: 0 });
    assert_eq!(container(&engine).flow().step(), FlowStep::SelectCar);
    settle(&mut engine, 1).await;
    assert_eq!(engine.visible_screen().unwrap().id, ScreenId::CarList);

    engine.process_message(Message::ItemSelected { index: 0 });
    assert_eq!(container(&engine).flow().overlay(), Some(Overlay::Loading));
    settle(&mut engine, 1).await;
    assert_eq!(
        container(&engine).flow().overlay(),
        Some(Overlay::FourWheelDrivePrompt)
    );

    engine.process_message(Message::Action(ActionId::FourWheelDriveYes));
    assert_eq!(
        container(&engine).flow().step(),
        FlowStep::SelectTowDestination
    );

    engine.process_message(Message::ItemSelected { index: 0 });
    assert_eq!(
        container(&engine).flow().step(),
        FlowStep::TowDestinationDetail
    );

    engine.process_message(Message::Action(ActionId::ConfirmDestination));
    assert_eq!(container(&engine).flow().step(), FlowStep::Summary);
    assert!(container(&engine).flow().data().is_complete());
    assert_eq!(container(&engine).flow().data().four_wheel_drive, Some(true));

    engine.process_message(Message::Action(ActionId::Submit));
    assert_eq!(container(&engine).flow().overlay(), Some(Overlay::Processing));
    settle(&mut engine, 1).await;

    let flow = container(&engine).flow();
    assert_eq!(flow.step(), FlowStep::RequestSent);
    assert!(flow.overlay().is_none());
    let reference = &flow.confirmation().unwrap().reference;
    assert!(reference.starts_with("RSA-"));
}

#[tokio::test(start_paused = true)]
async fn test_issue_failure_becomes_notification() {
    let mut engine = engine_with(
        true,
        FakeDataSource::new(LATENCY).with_failure(Operation::Issues, "offline"),
    );
    engine.process_message(Message::Connect);
    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));
    settle(&mut engine, 2).await;

    let flow = container(&engine).flow();
    assert!(flow.notifications().any(|n| n.kind
        == NotificationKind::Failure {
            operation: Operation::Issues
        }));
    assert_eq!(flow.step(), FlowStep::SelectIssue);
}

#[tokio::test(start_paused = true)]
async fn test_advisory_waits_for_assistance_tab() {
    let mut engine = engine(true);
    engine.process_message(Message::Connect);
    settle(&mut engine, 2).await;

    let flow = container(&engine).flow();
    assert!(flow.notification().is_none());
    assert!(flow.cached_advisory().is_some());

    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));

    let flow = container(&engine).flow();
    assert_eq!(
        flow.notification().map(|n| &n.kind),
        Some(&NotificationKind::Advisory)
    );
    assert!(flow.cached_advisory().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reconnect_starts_a_fresh_flow() {
    let mut engine = engine(true);
    engine.process_message(Message::Connect);
    engine.process_message(Message::select_tab(Tab::RoadsideAssistance));
    settle(&mut engine, 2).await;
    engine.process_message(Message::ItemSelected { index: 0 });
    assert_eq!(container(&engine).flow().step(), FlowStep::SelectCar);

    engine.process_message(Message::Disconnect);
    assert!(engine.state.container.is_none());
    engine.process_message(Message::Connect);

    // The cars result of the first connection arrives with the new advisory
    // and issues and must be dropped
    settle(&mut engine, 3).await;

    let container = container(&engine);
    assert_eq!(container.selected(), Tab::GasStations);
    assert_eq!(container.flow().connection(), ConnectionId(2));
    assert_eq!(container.flow().step(), FlowStep::SelectIssue);
    assert!(container.flow().data().is_empty());
    assert_eq!(
        container.slot(Tab::RoadsideAssistance).id,
        ScreenId::IssueGrid
    );
}
