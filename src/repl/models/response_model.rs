//! Response model
//!
//! A received HTTP response: its status and a body stream that is read once.
//! Dropping the model releases whatever connection backs the stream.

use std::fmt;
use std::io::Read;

/// HTTP response status information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseStatus {
    code: u16,
}

impl ResponseStatus {
    pub fn new(code: u16) -> Self {
        Self { code }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Check if the status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Status plus a one-shot body stream
pub struct ResponseModel {
    status: ResponseStatus,
    body: Box<dyn Read>,
}

impl ResponseModel {
    pub fn new(code: u16, body: impl Read + 'static) -> Self {
        Self {
            status: ResponseStatus::new(code),
            body: Box::new(body),
        }
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    pub fn body_mut(&mut self) -> &mut dyn Read {
        self.body.as_mut()
    }
}

impl fmt::Debug for ResponseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseModel")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
