//! # REPL Controller
//!
//! The command loop. Each iteration reads a request line and its body block,
//! translates the body, sends the request and routes the response to one of
//! two sinks: 2xx bodies go to `out`, everything else goes to `err`.
//!
//! Only a failure to read the request line itself stops the loop. End of
//! input stops it cleanly, after reporting any unterminated last line; an
//! I/O error stops it with [`ReplError::InputRead`].
//! Every other failure is reported on `err` and the loop carries on.

use crate::config::ReplConfig;
use crate::repl::error::ReplError;
use crate::repl::models::{
    build_target_url, Command, OutboundRequest, ResponseModel, FORM_CONTENT_TYPE,
};
use crate::repl::services::HttpTransport;
use crate::repl::utils::{
    is_blank, parse_command_line, read_body, read_line, unexpected_end_of_input, LineRead,
};
use std::io::{self, BufRead, Write};

/// Where the loop is in the two-line protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    AwaitingCommand,
    AwaitingBody,
}

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Request lines that parsed into a command
    pub commands: usize,
    /// Requests handed to the transport that produced a response
    pub dispatched: usize,
    pub succeeded: usize,
    pub failed_status: usize,
    /// Local errors reported on the error sink
    pub errors: usize,
}

/// The main command loop with injected I/O streams and transport
pub struct ReplController<R, O, E, T> {
    input: R,
    out: O,
    err: E,
    config: ReplConfig,
    transport: T,
    state: ReplState,
    body: Vec<u8>,
    summary: RunSummary,
}

impl<R, O, E, T> ReplController<R, O, E, T>
where
    R: BufRead,
    O: Write,
    E: Write,
    T: HttpTransport,
{
    /// Create a controller over the given streams (dependency injection)
    pub fn with_io_streams(input: R, out: O, err: E, config: ReplConfig, transport: T) -> Self {
        Self {
            input,
            out,
            err,
            config,
            transport,
            state: ReplState::AwaitingCommand,
            body: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    /// Give back the sinks, mostly so callers can inspect captured output
    pub fn into_sinks(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Run until the input is exhausted.
    ///
    /// Returns `Err` only when reading a request line fails.
    pub fn run(&mut self) -> Result<RunSummary, ReplError> {
        tracing::debug!(
            "Starting command loop against {}:{} ({:?})",
            self.config.host,
            self.config.port,
            self.config.body_mode
        );

        let mut line = Vec::new();
        loop {
            self.state = ReplState::AwaitingCommand;
            match read_line(&mut self.input, &mut line) {
                Ok(LineRead::Eof) => break,
                Ok(LineRead::Fragment) => {
                    if !is_blank(&line) {
                        tracing::debug!("Input ended inside a request line");
                        self.report(&ReplError::InputRead(unexpected_end_of_input()));
                    }
                    break;
                }
                Ok(LineRead::Line) => {}
                Err(e) => {
                    let error = ReplError::InputRead(e);
                    self.report(&error);
                    return Err(error);
                }
            }

            if is_blank(&line) {
                tracing::debug!("Skipping blank request line");
                continue;
            }

            if let Err(error) = self.process(&line) {
                self.report(&error);
            }

            if let Err(e) = self.flush() {
                tracing::warn!("Failed to flush output: {e}");
            }
        }

        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush output: {e}");
        }
        tracing::info!("Command loop finished: {:?}", self.summary);
        Ok(self.summary)
    }

    /// Handle one command from its request line through to the printed response
    fn process(&mut self, line: &[u8]) -> Result<(), ReplError> {
        let command = parse_command_line(line)?;
        self.summary.commands += 1;
        tracing::debug!("Parsed command {} /{}", command.verb(), command.path());

        self.state = ReplState::AwaitingBody;
        read_body(&mut self.input, &mut self.body)?;
        self.state = ReplState::AwaitingCommand;

        let payload = self.config.body_mode.translate(&self.body)?;
        let request = self.build_request(&command, payload)?;

        let response = self.transport.send(&request)?;
        self.summary.dispatched += 1;
        self.dump_response(response)
    }

    fn build_request(
        &self,
        command: &Command,
        payload: Vec<u8>,
    ) -> Result<OutboundRequest, ReplError> {
        let url = build_target_url(&self.config.host, self.config.port, command.path())?;
        let method = command.verb().as_str(self.config.verb_case);

        let mut request = OutboundRequest::new(method, url, payload);
        if self.config.attach_form_header {
            request.add_header("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string());
        }
        Ok(request)
    }

    /// Copy the response body to the sink its status selects.
    ///
    /// The response is owned here and dropped on every return path, which
    /// releases the underlying connection.
    fn dump_response(&mut self, mut response: ResponseModel) -> Result<(), ReplError> {
        let status = response.status();
        let sink: &mut dyn Write = if status.is_success() {
            self.summary.succeeded += 1;
            &mut self.out
        } else {
            self.summary.failed_status += 1;
            tracing::debug!("Request failed with status {status}");
            writeln!(self.err, "Status: {status}").map_err(ReplError::Output)?;
            &mut self.err
        };

        let copied = io::copy(response.body_mut(), &mut *sink);
        sink.write_all(b"\n").map_err(ReplError::Output)?;
        copied.map_err(ReplError::ResponseRead)?;
        Ok(())
    }

    fn report(&mut self, error: &ReplError) {
        self.summary.errors += 1;
        tracing::warn!("{error}");
        if let Err(e) = writeln!(self.err, "{error}") {
            tracing::error!("Failed to write to error stream: {e}");
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}
