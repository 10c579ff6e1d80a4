use crate::domain_port::SessionNavigator;
use std::sync::{Mutex, PoisonError};

/// Records a redirect to the login path each time the session ends. Front ends
/// poll `take_redirect` to decide whether to show the login screen.
#[derive(Debug)]
pub struct RedirectNavigator {
    login_path: String,
    redirects: Mutex<Vec<String>>,
}

impl RedirectNavigator {
    pub fn new(login_path: impl Into<String>) -> Self {
        RedirectNavigator {
            login_path: login_path.into(),
            redirects: Mutex::default(),
        }
    }

    pub fn redirect_count(&self) -> usize {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn take_redirect(&self) -> Option<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }
}

impl SessionNavigator for RedirectNavigator {
    fn session_ended(&self) {
        tracing::warn!(login_path = %self.login_path, "session ended; redirecting to login");
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(self.login_path.clone());
    }
}
