#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed cookie: {0}")]
    Malformed(String),
}

/// Read access to the cookies the server set for the API origin. HTTP-only
/// cookies may or may not be visible; callers only ever read script-visible ones.
pub trait CookieSource: Send + Sync {
    fn cookie(&self, name: &str) -> Result<Option<String>, CookieError>;
}
