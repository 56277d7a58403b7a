//! Roadside assistance domain records
//!
//! Plain immutable values produced by the data source and collected by the
//! assistance flow. Instances differ only in their field values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A problem the driver can request help with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    /// Symbol name of the grid icon
    pub icon: String,
}

impl Issue {
    pub fn new(id: impl Into<String>, title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
        }
    }
}

/// A vehicle registered to the member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub plate: String,
}

impl Car {
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// A postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl PostalAddress {
    /// Address in San Francisco, the city every synthetic location lives in
    pub fn san_francisco(street: impl Into<String>, postal_code: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            postal_code: postal_code.into(),
            country: "US".to_string(),
        }
    }
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.postal_code
        )
    }
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place the car can be towed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub address: PostalAddress,
    pub distance_miles: f32,
    /// Towing terms shown on the detail screen
    pub terms: String,
}

/// A map pin on the gas station and EV charging tabs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub location: Coordinate,
    pub address: PostalAddress,
}

/// Service message fetched once per connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub title: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_display_name() {
        let car = Car {
            id: "car-1".to_string(),
            year: 2021,
            make: "Toyota".to_string(),
            model: "RAV4".to_string(),
            plate: "8ABC123".to_string(),
        };
        assert_eq!(car.display_name(), "2021 Toyota RAV4");
    }

    #[test]
    fn test_san_francisco_address_defaults() {
        let address = PostalAddress::san_francisco("Golden Gate Bridge Plaza", "94129");
        assert_eq!(address.city, "San Francisco");
        assert_eq!(address.state, "CA");
        assert_eq!(address.country, "US");
        assert_eq!(
            address.to_string(),
            "Golden Gate Bridge Plaza, San Francisco, CA 94129"
        );
    }
}
