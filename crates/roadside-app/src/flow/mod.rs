//! Roadside assistance wizard
//!
//! - `step`: Steps, connection ids, fetch tickets and effects
//! - `data`: Selections of one pass through the wizard
//! - `controller`: The step state machine

mod controller;
mod data;
mod step;

pub use controller::AssistanceFlowController;
pub use data::{Confirmation, FlowData};
pub use step::{
    ConnectionId, DataPayload, FetchTicket, FlowEffect, FlowStep, TabSelectionOrigin,
};
