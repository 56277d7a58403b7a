//! Navigation and platform types shared by every layer

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A tab of the head-unit tab bar.
///
/// The ordinal is the tab's fixed position in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    GasStations,
    RoadsideAssistance,
    EvCharging,
}

impl Tab {
    /// All tabs in display order
    pub const ALL: [Tab; 3] = [Tab::GasStations, Tab::RoadsideAssistance, Tab::EvCharging];

    pub fn index(self) -> usize {
        match self {
            Tab::GasStations => 0,
            Tab::RoadsideAssistance => 1,
            Tab::EvCharging => 2,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidTab { index })
    }

    /// Label shown under the tab icon
    pub fn title(self) -> &'static str {
        match self {
            Tab::GasStations => "Gas stations",
            Tab::RoadsideAssistance => "Assistance",
            Tab::EvCharging => "EV Charging",
        }
    }

    /// Symbol name of the tab icon
    pub fn icon(self) -> &'static str {
        match self {
            Tab::GasStations => "fuelpump",
            Tab::RoadsideAssistance => "wrench.and.screwdriver",
            Tab::EvCharging => "ev.charger",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// The four independent data source queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Advisory,
    Issues,
    Cars,
    TowDestinations,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Advisory,
        Operation::Issues,
        Operation::Cars,
        Operation::TowDestinations,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Advisory => write!(f, "advisory"),
            Operation::Issues => write!(f, "issues"),
            Operation::Cars => write!(f, "cars"),
            Operation::TowDestinations => write!(f, "tow destinations"),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "advisory" => Ok(Operation::Advisory),
            "issues" => Ok(Operation::Issues),
            "cars" => Ok(Operation::Cars),
            "tow_destinations" | "destinations" => Ok(Operation::TowDestinations),
            other => Err(Error::config_invalid(format!(
                "unknown data operation '{}'",
                other
            ))),
        }
    }
}

/// Platform location authorization status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationAuthorization {
    #[default]
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedWhenInUse,
    AuthorizedAlways,
}

impl LocationAuthorization {
    pub fn is_authorized(self) -> bool {
        matches!(
            self,
            LocationAuthorization::AuthorizedWhenInUse | LocationAuthorization::AuthorizedAlways
        )
    }
}

/// Platform location accuracy grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationAccuracy {
    #[default]
    Full,
    Reduced,
}
