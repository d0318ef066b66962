//! Scripted transport for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::{json, Value};

use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::ApiError;

#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Rc<RefCell<HashMap<String, ApiResponse>>>,
    calls: Rc<RefCell<Vec<ApiRequest>>>,
    gates: Rc<RefCell<HashMap<String, oneshot::Receiver<()>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL ends with `path`. Replaces any earlier answer.
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.routes
            .borrow_mut()
            .insert(path.to_string(), ApiResponse { status, body });
    }

    /// Hold the next request to `path` until the returned sender fires. The
    /// response is picked when the request is sent, not when it is released.
    pub fn hold(&self, path: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.borrow_mut().insert(path.to_string(), gate);
        release
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.calls.borrow_mut().push(request.clone());
        let response = self
            .routes
            .borrow()
            .iter()
            .find(|(path, _)| request.url.ends_with(path.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(ApiResponse {
                status: 404,
                body: json!({"message": "Not found"}),
            });
        let gate = {
            let mut gates = self.gates.borrow_mut();
            let path = gates
                .keys()
                .find(|path| request.url.ends_with(path.as_str()))
                .cloned();
            path.and_then(|path| gates.remove(&path))
        };

        // Let concurrent callers run before the response arrives.
        tokio::task::yield_now().await;
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(response)
    }
}
