//! Asynchronous data source for the assistance flow
//!
//! The [`DataSource`] trait is the seam between the flow and its backing
//! data. [`FakeDataSource`] simulates network latency with a fixed delay and
//! can be told to fail individual queries.

use std::collections::HashMap;
use std::time::Duration;

use super::canned;
use crate::config::DataSettings;
use roadside_core::prelude::*;
use roadside_core::{Advisory, Car, Destination, Issue, Operation};

/// The four independent queries of the assistance flow.
///
/// Each call is independent: there is no caching, retry or cancellation.
#[trait_variant::make(DataSource: Send)]
pub trait LocalDataSource {
    /// Service advisory fetched once per connection
    async fn advisory(&self) -> Result<Advisory>;

    /// Issues the driver can report
    async fn issues(&self) -> Result<Vec<Issue>>;

    /// Cars registered to the member
    async fn cars(&self) -> Result<Vec<Car>>;

    /// Places the car can be towed to
    async fn tow_destinations(&self) -> Result<Vec<Destination>>;
}

/// Synthetic data source returning canned data after a fixed delay
#[derive(Debug, Clone)]
pub struct FakeDataSource {
    latency: Duration,
    failures: HashMap<Operation, String>,
}

impl Default for FakeDataSource {
    fn default() -> Self {
        Self::new(DataSettings::default().latency())
    }
}

impl FakeDataSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failures: HashMap::new(),
        }
    }

    pub fn from_settings(settings: &DataSettings) -> Self {
        settings
            .fail
            .iter()
            .fold(Self::new(settings.latency()), |source, operation| {
                source.with_failure(*operation, "The service is temporarily unavailable.")
            })
    }

    /// Make `operation` resolve to a failure carrying `message`
    pub fn with_failure(mut self, operation: Operation, message: impl Into<String>) -> Self {
        self.failures.insert(operation, message.into());
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn respond<T>(&self, operation: Operation, data: fn() -> T) -> Result<T> {
        trace!("Query {} started ({:?})", operation, self.latency);
        tokio::time::sleep(self.latency).await;

        match self.failures.get(&operation) {
            Some(message) => {
                debug!("Query {} failing: {}", operation, message);
                Err(Error::data_fetch(operation, message.clone()))
            }
            None => Ok(data()),
        }
    }
}

impl DataSource for FakeDataSource {
    async fn advisory(&self) -> Result<Advisory> {
        self.respond(Operation::Advisory, canned::advisory).await
    }

    async fn issues(&self) -> Result<Vec<Issue>> {
        self.respond(Operation::Issues, canned::issues).await
    }

    async fn cars(&self) -> Result<Vec<Car>> {
        self.respond(Operation::Cars, canned::cars).await
    }

    async fn tow_destinations(&self) -> Result<Vec<Destination>> {
        self.respond(Operation::TowDestinations, canned::tow_destinations)
            .await
    }
}
