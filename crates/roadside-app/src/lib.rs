//! roadside-app - Navigation state machine and orchestration for the
//! roadside assistance head unit
//!
//! This crate implements the TEA (The Elm Architecture) pattern: the tab
//! container and the assistance flow are mutated only by `handler::update`,
//! one `Message` at a time. Data source queries run as tokio tasks that post
//! their results back as messages.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod flow;
pub mod gate;
pub mod handler;
pub mod message;
pub mod process;
pub mod screen;
pub mod services;
pub mod signals;
pub mod state;
pub mod tabs;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use flow::{AssistanceFlowController, ConnectionId, FlowData, FlowStep, TabSelectionOrigin};
pub use gate::GateStatus;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use screen::{ActionId, Notification, Overlay, Screen, ScreenId};
pub use state::AppState;
pub use tabs::TabContainerController;
