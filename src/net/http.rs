//! Envelope-aware HTTP client for the campus API.
//!
//! DESIGN
//! ======
//! `ApiClient` sits between page logic and a pluggable [`Transport`]. It adds
//! the auth header to outgoing requests and turns every response into either
//! the unwrapped envelope `data` or an [`ApiError`] with a readable message.
//! A 401 fires the unauthorized handler before the error is returned; the
//! handler is a plain callback so the client never depends on the session
//! store or the router.
//!
//! ERROR HANDLING
//! ==============
//! No failure path is swallowed here. Business failures (`code != 200`),
//! HTTP failures, and network failures all surface as `Err`.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ApiEnvelope;
use crate::config::ClientConfig;

pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";
pub const NETWORK_ERROR_MESSAGE: &str = "Network connection failed or server did not respond";

// =============================================================================
// ERRORS
// =============================================================================

/// Failures surfaced by API calls. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A required argument was missing; raised before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success envelope code.
    #[error("{message}")]
    Business { code: i64, message: String },

    /// The server answered with a non-2xx HTTP status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// No response was received at all.
    #[error("{0}")]
    Network(String),

    /// A success envelope whose `data` did not match the expected type.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

/// Transport-level failure where no server response is available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully-built outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status plus undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP transport the client sends through.
///
/// Futures are `?Send`: the client runs on the single-threaded browser loop.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

type TokenSource = Rc<dyn Fn() -> Option<String>>;
type UnauthorizedHandler = Rc<dyn Fn()>;

// =============================================================================
// CLIENT
// =============================================================================

/// Cheap-to-clone API client handle.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    transport: Rc<dyn Transport>,
    token_source: TokenSource,
    on_unauthorized: UnauthorizedHandler,
}

impl ApiClient {
    /// Build a client with no token source and a no-op 401 handler.
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            token_source: Rc::new(|| None),
            on_unauthorized: Rc::new(|| {}),
        }
    }

    /// Read the current session token before each request.
    #[must_use]
    pub fn with_token_source(mut self, source: impl Fn() -> Option<String> + 'static) -> Self {
        self.token_source = Rc::new(source);
        self
    }

    /// Called once for every response with HTTP status 401.
    #[must_use]
    pub fn with_unauthorized_handler(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Rc::new(handler);
        self
    }

    /// `GET path?query` and return the unwrapped `data`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        self.call::<(), T>(Method::Get, path, None, query).await
    }

    /// `POST path` with a JSON body and return the unwrapped `data`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.call(Method::Post, path, Some(body), &[]).await
    }

    /// `POST path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call::<(), T>(Method::Post, path, None, &[]).await
    }

    /// Send one request and normalize the outcome.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Business`] when the envelope code is not the success sentinel
    /// - [`ApiError::Http`] for non-2xx statuses (after the 401 handler ran, if 401)
    /// - [`ApiError::Network`] when no response arrived
    /// - [`ApiError::Decode`] when a success body does not match `T`
    pub async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(method, path, body, query)?;
        log::debug!("api {} {}", method.as_str(), request.url);
        match self.transport.send(request).await {
            Ok(response) => self.handle_response(response),
            Err(TransportError::Network(detail)) => {
                log::warn!("api {} {path} failed without response: {detail}", method.as_str());
                Err(ApiError::Network(NETWORK_ERROR_MESSAGE.to_owned()))
            }
        }
    }

    fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(token) = (self.token_source)().filter(|t| !t.is_empty()) {
            headers.push((self.config.auth_header.clone(), format!("Bearer {token}")));
        }
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Validation(format!("could not encode request body: {e}")))?;
        Ok(HttpRequest { method, url: join_url(&self.config.api_base_url, path, query), headers, body })
    }

    fn handle_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        if !response.is_success() {
            if response.status == 401 {
                log::warn!("api returned 401, clearing session");
                (self.on_unauthorized)();
            }
            return Err(ApiError::Http {
                status: response.status,
                message: server_message(&response.body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned()),
            });
        }
        unwrap_envelope(&response.body)
    }
}

/// Strip a success envelope down to its `data`, or fail with its message.
///
/// # Errors
///
/// Returns [`ApiError::Business`] for a non-success code and
/// [`ApiError::Decode`] for bodies that are not a valid envelope of `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.is_success() {
        let message = non_empty(envelope.message).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned());
        return Err(ApiError::Business { code: envelope.code, message });
    }
    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    non_empty(value.get("message")?.as_str()?.to_owned())
}

fn non_empty(message: String) -> Option<String> {
    if message.trim().is_empty() { None } else { Some(message) }
}

fn join_url(base: &str, path: &str, query: &[(&str, String)]) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if !query.is_empty() {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }
    url
}
