//! Scripted in-memory [`Transport`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::TransportError;
use serde_json::Value;

use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Replays a fixed sequence of responses and records every request.
///
/// Running out of scripted responses yields a `Connection` error so a test
/// that issues one request too many fails loudly instead of hanging.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Scripts successful (200) JSON bodies or errors.
    pub(crate) fn new(bodies: impl IntoIterator<Item = Result<Value, TransportError>>) -> Self {
        Self::with_responses(
            bodies
                .into_iter()
                .map(|body| body.map(|body| ApiResponse { status: 200, body })),
        )
    }

    pub(crate) fn with_responses(
        responses: impl IntoIterator<Item = Result<ApiResponse, TransportError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection {
                    url,
                    message: "no scripted response left".into(),
                })
            })
    }
}
