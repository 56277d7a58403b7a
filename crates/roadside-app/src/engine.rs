//! Engine - orchestration shared by every host
//!
//! The Engine owns the application state, the message channel, the data
//! source and the shutdown signal. Login and permission changes reach the
//! message channel through forwarder tasks watching the injected services.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use crate::config::{self, PreferencesStore, Settings};
use crate::engine_event::EngineEvent;
use crate::flow::{ConnectionId, FlowStep};
use crate::message::Message;
use crate::process;
use crate::screen::{Notification, Overlay, Screen};
use crate::services::{DataSource, FakeDataSource, PermissionState, SessionState};
use crate::signals;
use crate::state::AppState;
use roadside_core::prelude::*;
use roadside_core::Tab;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, Default)]
struct StateSnapshot {
    connection: Option<ConnectionId>,
    step: Option<FlowStep>,
    selected: Option<Tab>,
    assistance_slot: Option<Screen>,
    visible: Option<Screen>,
    notification: Option<Notification>,
    notification_count: usize,
    overlay: Option<Overlay>,
    reference: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let Some(container) = state.container.as_ref() else {
            return Self::default();
        };
        let flow = container.flow();

        Self {
            connection: Some(flow.connection()),
            step: Some(flow.step()),
            selected: Some(container.selected()),
            assistance_slot: Some(container.slot(Tab::RoadsideAssistance).clone()),
            visible: Some(container.visible_screen()),
            notification: flow.notification().cloned(),
            notification_count: flow.notifications().count(),
            overlay: flow.overlay(),
            reference: flow.confirmation().map(|c| c.reference.clone()),
        }
    }
}

/// Orchestration engine for the roadside assistance head unit.
///
/// Generic over the [`DataSource`] so tests can swap in a faster or failing
/// source.
pub struct Engine<D = FakeDataSource> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    data_source: Arc<D>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<FakeDataSource> {
    /// Create an Engine from the configuration in `config_dir`.
    ///
    /// Loads settings, restores the stored login flag and spawns the signal
    /// handler. Must be called inside a tokio runtime.
    pub fn new(config_dir: &Path) -> Self {
        let settings = config::load_settings(config_dir);
        Self::with_settings(config_dir, settings)
    }

    /// Like [`Engine::new`] with already loaded (and possibly overridden)
    /// settings
    pub fn with_settings(config_dir: &Path, settings: Settings) -> Self {
        let session = Arc::new(SessionState::with_store(
            PreferencesStore::new(config_dir),
            settings.session.logged_in,
        ));
        let permission = Arc::new(PermissionState::from_flag(
            settings.session.precise_location,
        ));
        let data_source = FakeDataSource::from_settings(&settings.data);

        let engine = Self::with_parts(settings, session, permission, data_source);
        signals::spawn_signal_handler(engine.msg_tx.clone());
        engine
    }
}

impl<D> Engine<D>
where
    D: DataSource + Sync + 'static,
{
    /// Assemble an Engine from explicit parts. No signal handler is spawned.
    ///
    /// Spawns the login and permission forwarders, so it must be called
    /// inside a tokio runtime.
    pub fn with_parts(
        settings: Settings,
        session: Arc<SessionState>,
        permission: Arc<PermissionState>,
        data_source: D,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        spawn_gate_forwarder(session.subscribe(), msg_tx.clone(), shutdown_rx.clone());
        spawn_gate_forwarder(permission.subscribe(), msg_tx.clone(), shutdown_rx.clone());

        Self {
            state: AppState::new(settings, session, permission),
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            data_source: Arc::new(data_source),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind, older events are dropped
    /// (`RecvError::Lagged`).
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// EngineEvents for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.data_source,
            &self.shutdown_rx,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` when the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.state.session
    }

    pub fn permission(&self) -> &Arc<PermissionState> {
        &self.state.permission
    }

    /// Screen on top of the selected tab, if connected
    pub fn visible_screen(&self) -> Option<Screen> {
        self.state.container.as_ref().map(|c| c.visible_screen())
    }

    /// Signal background tasks to stop.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        if self.shutdown_tx.send(true).is_err() {
            debug!("No background task listening for shutdown");
        }
        info!("Engine shut down");
    }

    /// Compare pre/post snapshots and emit events for what changed.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.connection != post.connection {
            if let Some(connection) = pre.connection {
                self.emit(EngineEvent::Disconnected { connection });
            }
            if let (Some(connection), Some(step)) = (post.connection, post.step) {
                self.emit(EngineEvent::Connected { connection, step });
            }
        } else if let (Some(old), Some(new)) = (pre.step, post.step) {
            if old != new {
                self.emit(EngineEvent::StepChanged { old, new });
            }
        }

        if pre.selected != post.selected {
            if let Some(tab) = post.selected {
                self.emit(EngineEvent::TabChanged { tab });
            }
        }

        if pre.assistance_slot != post.assistance_slot {
            if let Some(screen) = &post.assistance_slot {
                self.emit(EngineEvent::AssistanceSlotChanged {
                    screen: screen.clone(),
                });
            }
        }

        if pre.visible != post.visible {
            if let (Some(tab), Some(screen)) = (post.selected, &post.visible) {
                self.emit(EngineEvent::ScreenChanged {
                    tab,
                    screen: screen.clone(),
                });
            }
        }

        // A different notification reached the top, or a dismiss revealed an
        // identical one queued behind it
        let shown = pre.notification != post.notification
            || post.notification_count < pre.notification_count;
        if shown {
            if let Some(notification) = &post.notification {
                self.emit(EngineEvent::NotificationShown {
                    notification: notification.clone(),
                });
            }
        }

        if pre.overlay != post.overlay {
            self.emit(EngineEvent::OverlayChanged {
                overlay: post.overlay,
            });
        }

        if pre.reference != post.reference {
            if let Some(reference) = &post.reference {
                self.emit(EngineEvent::RequestSent {
                    reference: reference.clone(),
                });
            }
        }
    }

    /// Emit an EngineEvent to all subscribers.
    /// Silently ignores if no subscribers are listening.
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

/// Forward every change of a login or permission channel as
/// `GateInputsChanged` until shutdown. Changes arriving while a message is
/// queued are coalesced; the handler reads the gate fresh anyway.
fn spawn_gate_forwarder<T>(
    mut changes: watch::Receiver<T>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        debug!("Gate input source dropped");
                        break;
                    }
                    if msg_tx.send(Message::GateInputsChanged).await.is_err() {
                        debug!("Message channel closed, gate forwarder exiting");
                        break;
                    }
                }
                _ = shutdown_rx.changed() => {
                    debug!("Gate forwarder cancelled by shutdown");
                    break;
                }
            }
        }
    });
}
