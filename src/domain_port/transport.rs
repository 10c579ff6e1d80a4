use crate::domain_model::*;

/// Failure to obtain any HTTP response. Status errors are not transport errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("transport error: {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request exactly as given. Headers are not added or inspected.
    async fn send(&self, request: TransportRequest) -> Result<ApiResponse, TransportError>;
}
