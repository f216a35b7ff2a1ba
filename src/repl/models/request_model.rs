//! # HTTP Request Model
//!
//! The command parsed from a request line, and the outbound request built
//! from it once the body has been read and translated.

use crate::repl::error::{CommandSyntaxError, ReplError};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Query flag appended to every outbound request
pub const PRETTY_FLAG: &str = "pretty";

/// Content type attached when the form header is enabled
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Type alias for HTTP headers to reduce complexity
pub type HttpHeaders = Vec<(String, String)>;

/// HTTP verbs accepted on a request line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Parse a verb token, ignoring letter case
    pub fn parse(token: &str) -> Result<Self, CommandSyntaxError> {
        match token.to_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            other => Err(CommandSyntaxError::IllegalVerb(other.to_string())),
        }
    }

    /// Render the verb in the requested letter case
    pub fn as_str(&self, case: VerbCase) -> &'static str {
        match (self, case) {
            (Verb::Get, VerbCase::Upper) => "GET",
            (Verb::Post, VerbCase::Upper) => "POST",
            (Verb::Put, VerbCase::Upper) => "PUT",
            (Verb::Delete, VerbCase::Upper) => "DELETE",
            (Verb::Get, VerbCase::Lower) => "get",
            (Verb::Post, VerbCase::Lower) => "post",
            (Verb::Put, VerbCase::Lower) => "put",
            (Verb::Delete, VerbCase::Lower) => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str(VerbCase::Upper))
    }
}

/// Letter case used for the method on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VerbCase {
    #[default]
    Upper,
    Lower,
}

impl FromStr for VerbCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(VerbCase::Upper),
            "lower" => Ok(VerbCase::Lower),
            other => Err(format!("unknown verb case '{other}', expected upper or lower")),
        }
    }
}

/// A validated request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    path: String,
}

impl Command {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Path relative to the server root, without a leading slash
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Build `http://{host}:{port}/{path}` with the pretty flag attached
pub fn build_target_url(host: &str, port: u16, path: &str) -> Result<Url, ReplError> {
    let raw = format!("http://{host}:{port}/{path}");
    let mut url =
        Url::parse(&raw).map_err(|e| ReplError::RequestConstruction(format!("{raw}: {e}")))?;

    let has_pretty = url.query_pairs().any(|(key, _)| key == PRETTY_FLAG);
    if !has_pretty {
        url.query_pairs_mut().append_key_only(PRETTY_FLAG);
    }

    Ok(url)
}

/// Fully resolved request, ready for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    method: String,
    url: Url,
    headers: HttpHeaders,
    body: Vec<u8>,
}

impl OutboundRequest {
    pub fn new(method: impl Into<String>, url: Url, body: Vec<u8>) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Vec::new(),
            body,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn add_header(&mut self, key: String, value: String) {
        self.headers.push((key, value));
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
