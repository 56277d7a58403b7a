//! Handler module - TEA update function
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `container`: Connection lifecycle and tab container handlers

pub mod container;
pub mod update;


use std::time::Duration;

use crate::flow::{FetchTicket, FlowEffect};
use crate::message::Message;
use roadside_core::Operation;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Run a data source query and report back with `DataLoaded` or
    /// `DataFetchFailed`
    Fetch {
        operation: Operation,
        ticket: FetchTicket,
    },

    /// Wait out the processing delay, then report `SubmitCompleted`
    Submit {
        ticket: FetchTicket,
        delay: Duration,
    },
}

impl UpdateAction {
    pub fn from_effect(effect: FlowEffect, submit_delay: Duration) -> Self {
        match effect {
            FlowEffect::Fetch { operation, ticket } => UpdateAction::Fetch { operation, ticket },
            FlowEffect::Submit { ticket } => UpdateAction::Submit {
                ticket,
                delay: submit_delay,
            },
        }
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the event loop to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }
}
