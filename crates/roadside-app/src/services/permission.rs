//! Location permission of the platform, folded into one boolean

use tokio::sync::watch;

use roadside_core::prelude::*;
use roadside_core::{LocationAccuracy, LocationAuthorization};

/// Authorization and accuracy as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocationGrant {
    pub authorization: LocationAuthorization,
    pub accuracy: LocationAccuracy,
}

impl LocationGrant {
    /// Grant with full accuracy while the app is in use
    pub fn precise() -> Self {
        Self {
            authorization: LocationAuthorization::AuthorizedWhenInUse,
            accuracy: LocationAccuracy::Full,
        }
    }

    pub fn is_precise(&self) -> bool {
        self.authorization.is_authorized() && self.accuracy == LocationAccuracy::Full
    }
}

/// Precise-location signal injected into the tab container
#[derive(Debug)]
pub struct PermissionState {
    grant: watch::Sender<LocationGrant>,
}

impl PermissionState {
    pub fn new(grant: LocationGrant) -> Self {
        let (grant, _) = watch::channel(grant);
        Self { grant }
    }

    /// State that is either fully granted or not determined yet
    pub fn from_flag(precise_location: bool) -> Self {
        if precise_location {
            Self::new(LocationGrant::precise())
        } else {
            Self::new(LocationGrant::default())
        }
    }

    pub fn grant(&self) -> LocationGrant {
        *self.grant.borrow()
    }

    pub fn is_precise_location_enabled(&self) -> bool {
        self.grant().is_precise()
    }

    pub fn set_authorization(&self, authorization: LocationAuthorization) {
        if self.update(|grant| grant.authorization = authorization) {
            info!("Location authorization changed: {:?}", authorization);
        }
    }

    pub fn set_accuracy(&self, accuracy: LocationAccuracy) {
        if self.update(|grant| grant.accuracy = accuracy) {
            info!("Location accuracy changed: {:?}", accuracy);
        }
    }

    /// Apply `f`, waking subscribers only if the grant changed
    fn update(&self, f: impl FnOnce(&mut LocationGrant)) -> bool {
        self.grant.send_if_modified(|grant| {
            let before = *grant;
            f(grant);
            *grant != before
        })
    }

    /// Watch platform changes. Every change of the grant wakes the receiver,
    /// even when the folded boolean stays the same. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<LocationGrant> {
        self.grant.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precise_requires_authorization_and_full_accuracy() {
        let cases = [
            (LocationAuthorization::AuthorizedWhenInUse, LocationAccuracy::Full, true),
            (LocationAuthorization::AuthorizedAlways, LocationAccuracy::Full, true),
            (LocationAuthorization::AuthorizedAlways, LocationAccuracy::Reduced, false),
            (LocationAuthorization::Denied, LocationAccuracy::Full, false),
            (LocationAuthorization::NotDetermined, LocationAccuracy::Full, false),
        ];

        for (authorization, accuracy, expected) in cases {
            let grant = LocationGrant {
                authorization,
                accuracy,
            };
            assert_eq!(grant.is_precise(), expected, "{:?}", grant);
        }
    }

    #[test]
    fn test_from_flag() {
        assert!(PermissionState::from_flag(true).is_precise_location_enabled());
        assert!(!PermissionState::from_flag(false).is_precise_location_enabled());
    }

    #[test]
    fn test_reducing_accuracy_wakes_subscriber() {
        let permission = PermissionState::new(LocationGrant::precise());
        let mut rx = permission.subscribe();

        permission.set_accuracy(LocationAccuracy::Reduced);

        assert!(!permission.is_precise_location_enabled());
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_precise());
    }

    #[test]
    fn test_repeated_value_does_not_wake_subscriber() {
        let permission = PermissionState::new(LocationGrant::default());
        let mut rx = permission.subscribe();

        permission.set_authorization(LocationAuthorization::Denied);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        permission.set_authorization(LocationAuthorization::Denied);
        assert!(!rx.has_changed().unwrap());

        permission.set_authorization(LocationAuthorization::Restricted);
        assert!(rx.has_changed().unwrap());
    }
}
