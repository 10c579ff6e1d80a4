use crate::domain_port::TransportError;
use serde_json::Value;

/// Outcome of a failed refresh. Cloned out to every caller queued behind it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshError {
    #[error("refresh rejected with status {status}")]
    Rejected { status: u16 },
    #[error("refresh transport failure: {0}")]
    Transport(TransportError),
    #[error("refresh response carried no access token")]
    MissingAccessToken,
    #[error("refresh abandoned before it settled")]
    Abandoned,
    #[error("timed out waiting for the in-flight refresh")]
    TimedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("not authorized")]
    Unauthorized { body: Value },
    #[error("session refresh failed: {0}")]
    Refresh(#[from] RefreshError),
    #[error("request failed with status {status}")]
    Status { status: u16, body: Value },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("login response carried no access token")]
    MissingAccessToken,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// HTTP status of the failing response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller has to log in again. A refresh that timed out or
    /// was abandoned leaves the session untouched, so it does not count.
    pub fn is_session_lost(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. }
                | ApiError::Refresh(
                    RefreshError::Rejected { .. }
                        | RefreshError::Transport(_)
                        | RefreshError::MissingAccessToken
                )
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}
