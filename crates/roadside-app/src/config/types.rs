//! Configuration types for the roadside head unit
//!
//! Defines:
//! - `Settings` - Global application settings (.roadside/config.toml)
//! - `UserPreferences` - Local, per-user state (.roadside/settings.local.toml)

use roadside_core::Operation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application settings (.roadside/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub flow: FlowSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

/// Synthetic data source settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataSettings {
    /// Simulated latency of every query in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Queries that resolve to a failure instead of canned data
    #[serde(default)]
    pub fail: Vec<Operation>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            fail: Vec::new(),
        }
    }
}

impl DataSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

fn default_latency_ms() -> u64 {
    5_000
}

/// Assistance flow settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlowSettings {
    /// How long the "sending request" overlay stays up after Submit
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl FlowSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

fn default_submit_delay_ms() -> u64 {
    2_000
}

/// Initial session and platform state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Login flag used when no preference has been stored yet
    #[serde(default)]
    pub logged_in: bool,

    /// Whether the simulated platform starts with precise location granted
    #[serde(default = "default_true")]
    pub precise_location: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            logged_in: false,
            precise_location: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// User-specific state persisted between runs (.roadside/settings.local.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserPreferences {
    /// Last known login flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in: Option<bool>,
}
