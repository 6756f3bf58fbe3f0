//! Shared helpers for the cross-crate tests.
use stampede::{Request, Response, Session, TransportError};
use std::sync::{Arc, Mutex};

/// One request seen by a [`MockSession`], with the status it was answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub request: Request,
    pub status: u16,
}

/// Session answering every request with a fixed status and logging each call.
#[derive(Clone)]
pub struct MockSession {
    status: u16,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockSession {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Session for MockSession {
    async fn request(&self, request: Request) -> Result<Response, TransportError> {
        self.calls
            .lock()
            .map_err(|_| TransportError::other("mock call log poisoned"))?
            .push(Call {
                request,
                status: self.status,
            });
        Ok(Response::new(self.status))
    }
}

/// Session whose transport always fails, as if the host refused connections.
pub struct RefusingSession;

impl Session for RefusingSession {
    async fn request(&self, _request: Request) -> Result<Response, TransportError> {
        Err(TransportError::other("connection refused"))
    }
}
