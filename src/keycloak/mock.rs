//! In-memory transport for unit tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::http::{Transport, TransportRequest, TransportResponse};
use crate::error::TransportError;

/// Replays canned responses in order and records every request it receives
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<TransportResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `status` and `body`
    pub fn replying(status: u16, body: &str, times: usize) -> Self {
        Self::new(
            (0..times)
                .map(|_| {
                    Ok(TransportResponse {
                        status,
                        body: body.to_string(),
                    })
                })
                .collect(),
        )
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no canned response left".into())))
    }
}
