//! In-memory [`Transport`] for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::http::{ApiClient, HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::ClientConfig;

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_envelope(&self, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn push_ok(&self, data: serde_json::Value) {
        self.push_envelope(200, serde_json::json!({ "code": 200, "message": "success", "data": data }));
    }

    pub fn push_network_error(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Network("connection refused".to_owned())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.borrow().last().cloned().expect("no request recorded")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no mock response queued".to_owned())))
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        api_base_url: "https://api.test".to_owned(),
        storage_key: "user".to_owned(),
        auth_header: "Authorization".to_owned(),
    }
}

/// Client over `transport` that always presents `token`, if any.
pub fn client_with_token(transport: &Rc<MockTransport>, token: Option<&str>) -> ApiClient {
    let token = token.map(str::to_owned);
    ApiClient::new(test_config(), transport.clone()).with_token_source(move || token.clone())
}
