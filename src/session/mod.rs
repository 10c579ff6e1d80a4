//! Per-session auth state: the in-memory access token and the refresh gate.
//! A `Session` is created by the composition root and shared with the client,
//! so tests can run isolated sessions side by side.

mod credential_store;
mod refresh_coordinator;

pub use credential_store::*;
pub use refresh_coordinator::*;

use crate::domain_model::SessionState;

#[derive(Default)]
pub struct Session {
    credentials: CredentialStore,
    refresh: RefreshCoordinator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn refresh(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    pub fn state(&self) -> SessionState {
        if self.refresh.is_in_flight() {
            SessionState::Refreshing
        } else if self.credentials.is_present() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}
