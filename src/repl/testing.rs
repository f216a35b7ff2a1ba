//! Testing infrastructure for REPL components
//!
//! Stand-ins for the output sinks and the HTTP transport so the command loop
//! can be driven without a terminal or a server.

use crate::repl::error::ReplError;
use crate::repl::models::{OutboundRequest, ResponseModel};
use crate::repl::services::HttpTransport;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// Mock writer that captures output instead of writing to a stream
#[derive(Default)]
pub struct MockWriter {
    pub output: Vec<u8>,
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_output(&self) -> String {
        String::from_utf8_lossy(&self.output).to_string()
    }
}

/// A canned transport outcome
pub enum MockReply {
    Response { status: u16, body: Vec<u8> },
    /// A response whose body fails after yielding the given prefix
    Broken { status: u16, prefix: Vec<u8> },
    TransportError(String),
}

/// Body reader that errors once its prefix is drained and records its drop
struct BrokenBody {
    prefix: io::Cursor<Vec<u8>>,
    dropped: Rc<RefCell<usize>>,
}

impl Read for BrokenBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.prefix.read(buf)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        Ok(read)
    }
}

impl Drop for BrokenBody {
    fn drop(&mut self) {
        *self.dropped.borrow_mut() += 1;
    }
}

/// Body reader that records when it is released
struct TrackedBody {
    inner: io::Cursor<Vec<u8>>,
    dropped: Rc<RefCell<usize>>,
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        *self.dropped.borrow_mut() += 1;
    }
}

/// Transport that records every request and replays queued replies.
///
/// When the queue runs dry it answers `200` with an empty body.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<MockReply>>,
    requests: RefCell<Vec<OutboundRequest>>,
    released: Rc<RefCell<usize>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.push(MockReply::Response {
            status,
            body: body.as_bytes().to_vec(),
        })
    }

    pub fn push(self, reply: MockReply) -> Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.borrow().clone()
    }

    /// Number of response bodies that have been dropped
    pub fn released(&self) -> usize {
        *self.released.borrow()
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: &OutboundRequest) -> Result<ResponseModel, ReplError> {
        self.requests.borrow_mut().push(request.clone());

        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(MockReply::Response {
                status: 200,
                body: Vec::new(),
            });

        match reply {
            MockReply::Response { status, body } => Ok(ResponseModel::new(
                status,
                TrackedBody {
                    inner: io::Cursor::new(body),
                    dropped: Rc::clone(&self.released),
                },
            )),
            MockReply::Broken { status, prefix } => Ok(ResponseModel::new(
                status,
                BrokenBody {
                    prefix: io::Cursor::new(prefix),
                    dropped: Rc::clone(&self.released),
                },
            )),
            MockReply::TransportError(message) => Err(ReplError::Transport(message)),
        }
    }
}
