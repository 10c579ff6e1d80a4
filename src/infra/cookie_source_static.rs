use crate::domain_port::{CookieError, CookieSource};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Cookie source backed by a plain map. Used when cookies are managed outside
/// the HTTP stack, and in tests.
#[derive(Debug, Default)]
pub struct StaticCookies {
    cookies: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl StaticCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// A source whose every read fails, like restricted browser storage.
    pub fn unavailable() -> Self {
        StaticCookies {
            cookies: Mutex::default(),
            unavailable: true,
        }
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }
}

impl CookieSource for StaticCookies {
    fn cookie(&self, name: &str) -> Result<Option<String>, CookieError> {
        if self.unavailable {
            return Err(CookieError::Unavailable("cookie access denied".to_string()));
        }
        Ok(self
            .cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned())
    }
}
