//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every task reports back through the message channel and stops early when
//! the shutdown signal fires.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::{mpsc, watch};

use crate::flow::{Confirmation, DataPayload, FetchTicket};
use crate::message::Message;
use crate::services::DataSource;
use crate::UpdateAction;
use roadside_core::prelude::*;
use roadside_core::Operation;

/// Prefix of submitted request references
pub const REFERENCE_PREFIX: &str = "RSA-";

/// Execute an action by spawning a background task
pub fn handle_action<D>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    data_source: &Arc<D>,
    shutdown_rx: watch::Receiver<bool>,
) where
    D: DataSource + Sync + 'static,
{
    match action {
        UpdateAction::Fetch { operation, ticket } => {
            spawn_fetch(operation, ticket, data_source.clone(), msg_tx, shutdown_rx);
        }

        UpdateAction::Submit { ticket, delay } => {
            spawn_submit(ticket, delay, msg_tx, shutdown_rx);
        }
    }
}

fn spawn_fetch<D>(
    operation: Operation,
    ticket: FetchTicket,
    data_source: Arc<D>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    D: DataSource + Sync + 'static,
{
    tokio::spawn(async move {
        let message = tokio::select! {
            result = fetch(data_source.as_ref(), operation) => match result {
                Ok(payload) => Message::DataLoaded { ticket, payload },
                Err(e) => Message::DataFetchFailed {
                    ticket,
                    operation,
                    error: failure_message(e),
                },
            },
            _ = shutdown_rx.changed() => {
                debug!("Query {} abandoned on shutdown", operation);
                return;
            }
        };

        if msg_tx.send(message).await.is_err() {
            debug!("Query {} finished after the engine stopped", operation);
        }
    });
}

fn spawn_submit(
    ticket: FetchTicket,
    delay: Duration,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown_rx.changed() => {
                debug!("Submission abandoned on shutdown");
                return;
            }
        }

        let confirmation = Confirmation {
            reference: generate_reference(),
            submitted_at: Local::now(),
        };
        let _ = msg_tx
            .send(Message::SubmitCompleted {
                ticket,
                confirmation,
            })
            .await;
    });
}

/// Run one query and wrap its result
pub async fn fetch<D: DataSource>(data_source: &D, operation: Operation) -> Result<DataPayload> {
    let payload = match operation {
        Operation::Advisory => DataPayload::Advisory(data_source.advisory().await?),
        Operation::Issues => DataPayload::Issues(data_source.issues().await?),
        Operation::Cars => DataPayload::Cars(data_source.cars().await?),
        Operation::TowDestinations => {
            DataPayload::Destinations(data_source.tow_destinations().await?)
        }
    };
    Ok(payload)
}

/// Text shown to the driver for a failed query
fn failure_message(error: Error) -> String {
    match error {
        Error::DataFetch { message, .. } => message,
        other => other.to_string(),
    }
}

/// `RSA-` followed by six uppercase alphanumerics
pub fn generate_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}{}", REFERENCE_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ConnectionId;
    use crate::services::FakeDataSource;

    fn ticket() -> FetchTicket {
        FetchTicket {
            connection: ConnectionId(1),
            epoch: 1,
        }
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        assert!(reference.starts_with(REFERENCE_PREFIX));
        let suffix = &reference[REFERENCE_PREFIX.len()..];
        assert_eq!(suffix.len(), 6);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_action_reports_loaded_data() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let source = Arc::new(FakeDataSource::new(Duration::from_secs(5)));

        handle_action(
            UpdateAction::Fetch {
                operation: Operation::Cars,
                ticket: ticket(),
            },
            tx,
            &source,
            shutdown_rx,
        );

        match rx.recv().await {
            Some(Message::DataLoaded {
                ticket: t,
                payload: DataPayload::Cars(cars),
            }) => {
                assert_eq!(t, ticket());
                assert_eq!(cars.len(), 3);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_action_reports_failure_text() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let source = Arc::new(
            FakeDataSource::new(Duration::from_secs(1)).with_failure(Operation::Issues, "offline"),
        );

        handle_action(
            UpdateAction::Fetch {
                operation: Operation::Issues,
                ticket: ticket(),
            },
            tx,
            &source,
            shutdown_rx,
        );

        match rx.recv().await {
            Some(Message::DataFetchFailed {
                operation, error, ..
            }) => {
                assert_eq!(operation, Operation::Issues);
                assert_eq!(error, "offline");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_action_waits_for_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let source = Arc::new(FakeDataSource::default());
        let start = tokio::time::Instant::now();

        handle_action(
            UpdateAction::Submit {
                ticket: ticket(),
                delay: Duration::from_secs(2),
            },
            tx,
            &source,
            shutdown_rx,
        );

        match rx.recv().await {
            Some(Message::SubmitCompleted { confirmation, .. }) => {
                assert!(confirmation.reference.starts_with(REFERENCE_PREFIX));
                assert!(start.elapsed() >= Duration::from_secs(2));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_abandons_query() {
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let source = Arc::new(FakeDataSource::new(Duration::from_secs(5)));

        handle_action(
            UpdateAction::Fetch {
                operation: Operation::Advisory,
                ticket: ticket(),
            },
            tx,
            &source,
            shutdown_rx,
        );
        shutdown_tx.send(true).unwrap();

        assert!(rx.recv().await.is_none());
    }
}
