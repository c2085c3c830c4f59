//! Browser transport backed by `gloo-net`.
//!
//! Only compiled with the `csr` feature; native builds and tests plug in
//! their own [`Transport`].

use gloo_net::http::{Request, RequestBuilder};

use super::http::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Sends requests through the browser `fetch` API.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = builder_for(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        // An unreadable body still carries a status worth reporting.
        let body = response.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}
