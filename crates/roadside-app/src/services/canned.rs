//! Canned responses of the synthetic data source

use roadside_core::{
    Advisory, Car, Coordinate, Destination, Issue, PointOfInterest, PostalAddress,
};

pub fn advisory() -> Advisory {
    Advisory {
        title: "High demand".to_string(),
        message: "Service volume is high in your area. Response times may be longer than usual."
            .to_string(),
    }
}

pub fn issues() -> Vec<Issue> {
    vec![
        Issue::new("flat-tire", "Flat tire", "car.rear.and.tire.marks"),
        Issue::new("battery", "Battery jump start", "minus.plus.batteryblock"),
        Issue::new("lockout", "Locked out", "key"),
        Issue::new("fuel", "Out of fuel", "fuelpump.exclamationmark"),
        Issue::new("tow", "Tow only", "truck.box"),
        Issue::new("winch", "Stuck / winch out", "arrow.up.and.down.and.arrow.left.and.right"),
    ]
}

pub fn cars() -> Vec<Car> {
    vec![
        Car {
            id: "car-1".to_string(),
            year: 2021,
            make: "Toyota".to_string(),
            model: "RAV4".to_string(),
            plate: "8ABC123".to_string(),
        },
        Car {
            id: "car-2".to_string(),
            year: 2018,
            make: "Subaru".to_string(),
            model: "Outback".to_string(),
            plate: "7XYZ987".to_string(),
        },
        Car {
            id: "car-3".to_string(),
            year: 2023,
            make: "Tesla".to_string(),
            model: "Model 3".to_string(),
            plate: "9EVS001".to_string(),
        },
    ]
}

pub fn tow_destinations() -> Vec<Destination> {
    vec![
        Destination {
            id: "dest-1".to_string(),
            name: "Civic Center Auto Repair".to_string(),
            address: PostalAddress::san_francisco("1 Dr. Carlton B Goodlett Pl", "94102"),
            distance_miles: 2.4,
            terms: "Towing up to 5 miles is covered by your membership. \
                    Additional miles are billed at $4.50 per mile."
                .to_string(),
        },
        Destination {
            id: "dest-2".to_string(),
            name: "Presidio Service Center".to_string(),
            address: PostalAddress::san_francisco("Golden Gate Bridge Plaza", "94129"),
            distance_miles: 6.1,
            terms: "Destination is outside the covered radius. \
                    1.1 additional miles will be billed at $4.50 per mile."
                .to_string(),
        },
        Destination {
            id: "dest-3".to_string(),
            name: "Home".to_string(),
            address: PostalAddress::san_francisco("1200 Market St", "94102"),
            distance_miles: 1.2,
            terms: "Towing to your home address is covered by your membership.".to_string(),
        },
    ]
}

/// Map pins shown on the gas station and EV charging tabs
pub fn points_of_interest() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest {
            name: "Place 1".to_string(),
            location: Coordinate {
                latitude: 37.807_977,
                longitude: -122.475_306,
            },
            address: PostalAddress::san_francisco("Golden Gate Bridge Plaza", "94129"),
        },
        PointOfInterest {
            name: "Place 2".to_string(),
            location: Coordinate {
                latitude: 37.778_858,
                longitude: -122.419_326,
            },
            address: PostalAddress::san_francisco("1 Dr. Carlton B Goodlett Pl", "94102"),
        },
    ]
}
