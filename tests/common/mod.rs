//! Shared helpers for integration tests
//!
//! `TestServer` wraps a `wiremock::MockServer` together with the runtime that
//! started it. The server answers from its own thread, so the blocking client
//! under test runs on the test thread outside the runtime.

#![allow(dead_code)]

use std::net::TcpListener;
use tokio::runtime::Runtime;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub struct TestServer {
    // dropped before the runtime that owns its tasks
    server: MockServer,
    runtime: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn port(&self) -> u16 {
        self.server.address().port()
    }

    pub fn mount(&self, mock: Mock) -> &Self {
        self.runtime.block_on(mock.mount(&self.server));
        self
    }

    /// Answer every request that nothing else matched with `status` and `body`
    pub fn fallback(&self, status: u16, body: &str) -> &Self {
        self.mount(Mock::given(any()).respond_with(reply(status, body)))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

pub fn reply(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-type", "application/json")
        .set_body_string(body)
}

/// Path plus query, the way it appeared on the request line
pub fn target(request: &Request) -> String {
    match request.url.query() {
        Some(query) => format!("{}?{}", request.url.path(), query),
        None => request.url.path().to_string(),
    }
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

pub fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).to_string()
}

/// A loopback port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    listener.local_addr().expect("local addr").port()
}
