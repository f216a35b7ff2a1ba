//! # HTTP Service
//!
//! Sends outbound requests. The loop only talks to the [`HttpTransport`]
//! trait; [`HttpService`] is the production implementation on top of a
//! single reusable `reqwest` blocking client.

use crate::repl::error::ReplError;
use crate::repl::models::{OutboundRequest, ResponseModel};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use std::time::Duration;

/// Something that can turn an [`OutboundRequest`] into a response
pub trait HttpTransport {
    fn send(&self, request: &OutboundRequest) -> Result<ResponseModel, ReplError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(&self, request: &OutboundRequest) -> Result<ResponseModel, ReplError> {
        (**self).send(request)
    }
}

/// Service for executing requests against the configured server
///
/// The client is built once and shared by every iteration of the loop so
/// connections can be reused.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
}

impl HttpService {
    /// Create a new HttpService. `None` disables the request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        tracing::debug!("Creating HttpService with timeout {timeout:?}");
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        tracing::info!("HTTP client created successfully");

        Ok(Self { client })
    }

    fn build(&self, request: &OutboundRequest) -> Result<reqwest::blocking::Request, ReplError> {
        let method = Method::from_bytes(request.method().as_bytes())
            .map_err(|e| ReplError::RequestConstruction(e.to_string()))?;

        let mut builder = self
            .client
            .request(method, request.url().clone())
            .body(request.body().to_vec());

        for (key, value) in request.headers() {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ReplError::RequestConstruction(e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ReplError::RequestConstruction(e.to_string()))?;
            builder = builder.header(name, value);
        }

        builder
            .build()
            .map_err(|e| ReplError::RequestConstruction(error_chain(&e)))
    }
}

impl HttpTransport for HttpService {
    fn send(&self, request: &OutboundRequest) -> Result<ResponseModel, ReplError> {
        let built = self.build(request)?;
        tracing::debug!("Sending {} {}", built.method(), built.url());

        let response = self.client.execute(built).map_err(|e| {
            let message = error_chain(&e);
            tracing::error!("HTTP request failed: {message}");
            ReplError::Transport(message)
        })?;

        let status = response.status().as_u16();
        tracing::debug!("Received status {status}");
        Ok(ResponseModel::new(status, response))
    }
}

/// Render an error with its full cause chain on one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}
