//! In-memory transport.
//!
//! [`MockTransport`] replays queued responses in order and records every
//! request it receives. It backs the unit tests of this crate and of the
//! page controller, and lets embedders exercise a page without a server.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, ApiResponse, BoxFuture, Transport};

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<ApiResult<ApiResponse>>,
    requests: Vec<ApiRequest>,
}

/// A scripted [`Transport`]. Clones share the same script and log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queues a transport failure.
    pub fn fail(self, error: ApiError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queues a result on a shared handle.
    pub fn push(&self, result: ApiResult<ApiResponse>) {
        self.lock().responses.push_back(result);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.lock().responses.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        let result = {
            let mut state = self.lock();
            let path = request.path.clone();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network(format!("no response scripted for {}", path))))
        };
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_and_records() {
        let transport = MockTransport::new().respond(200, "one").respond(500, "two");

        let first = transport.send(ApiRequest::get("/a")).await.unwrap();
        let second = transport.send(ApiRequest::get("/b")).await.unwrap();
        assert_eq!(first.body, "one");
        assert_eq!(second.status, 500);
        assert_eq!(transport.pending(), 0);

        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[tokio::test]
    async fn exhausted_script_is_a_network_error() {
        let transport = MockTransport::new();
        let err = transport.send(ApiRequest::get("/x")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
