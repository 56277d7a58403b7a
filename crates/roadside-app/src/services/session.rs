//! Login status of the head-unit user

use tokio::sync::watch;

use crate::config::PreferencesStore;
use roadside_core::prelude::*;

/// Process-wide login flag, injected into the tab container.
///
/// When backed by a [`PreferencesStore`] the flag is read from it at
/// construction and written back on every change.
#[derive(Debug)]
pub struct SessionState {
    logged_in: watch::Sender<bool>,
    store: Option<PreferencesStore>,
}

impl SessionState {
    /// In-memory session state
    pub fn new(logged_in: bool) -> Self {
        let (logged_in, _) = watch::channel(logged_in);
        Self {
            logged_in,
            store: None,
        }
    }

    /// Session state persisted in the local preferences file.
    ///
    /// `default` is used when nothing has been stored yet.
    pub fn with_store(store: PreferencesStore, default: bool) -> Self {
        let logged_in = store.load_logged_in().unwrap_or(default);
        debug!("Session restored: logged_in={}", logged_in);
        Self {
            store: Some(store),
            ..Self::new(logged_in)
        }
    }

    pub fn is_logged_in(&self) -> bool {
        *self.logged_in.borrow()
    }

    /// Set the login flag, waking subscribers if it changed
    pub fn set_logged_in(&self, logged_in: bool) {
        let changed = self.logged_in.send_if_modified(|current| {
            let changed = *current != logged_in;
            *current = logged_in;
            changed
        });
        if !changed {
            return;
        }
        info!("Login status changed: logged_in={}", logged_in);

        if let Some(store) = &self.store {
            if let Err(e) = store.save_logged_in(logged_in) {
                warn!("Failed to persist login status: {}", e);
            }
        }
    }

    /// Flip the login flag and return the new value
    pub fn toggle(&self) -> bool {
        let logged_in = !self.is_logged_in();
        self.set_logged_in(logged_in);
        logged_in
    }

    /// Watch login changes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }
}
