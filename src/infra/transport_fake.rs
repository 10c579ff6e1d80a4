use crate::domain_model::*;
use crate::domain_port::*;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;

type Responder = dyn Fn(&TransportRequest) -> Result<ApiResponse, TransportError> + Send + Sync;

/// In-process transport. Records every request and answers with a responder
/// closure. Requests whose URL ends with a gated suffix block until the gate
/// is opened, which keeps a refresh in flight for as long as a test needs.
pub struct FakeTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<TransportRequest>>,
    gates: Mutex<Vec<(String, Arc<Semaphore>)>>,
}

impl FakeTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&TransportRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
    {
        FakeTransport {
            responder: Box::new(responder),
            requests: Mutex::default(),
            gates: Mutex::default(),
        }
    }

    /// Holds back every request to a URL ending in `suffix` until the returned
    /// gate is opened.
    pub fn gate(&self, suffix: impl Into<String>) -> FakeGate {
        let semaphore = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((suffix.into(), semaphore.clone()));
        FakeGate { semaphore }
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn requests_to(&self, suffix: &str) -> Vec<TransportRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.ends_with(suffix))
            .collect()
    }

    pub fn count(&self, suffix: &str) -> usize {
        self.requests_to(suffix).len()
    }

    fn gate_for(&self, url: &str) -> Option<Arc<Semaphore>> {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map(|(_, semaphore)| semaphore.clone())
    }
}

#[async_trait::async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: TransportRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(gate) = self.gate_for(&request.url) {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| TransportError::Other(e.to_string()))?;
        }

        (self.responder)(&request)
    }
}

pub struct FakeGate {
    semaphore: Arc<Semaphore>,
}

impl FakeGate {
    /// Lets every held and future request through. Each request borrows the
    /// permit and hands it back.
    pub fn open(&self) {
        self.semaphore.add_permits(1);
    }
}

pub fn reply(status: u16, body: Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(status, body))
}
