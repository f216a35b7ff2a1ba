//! # Request Line Parsing
//!
//! Reads the two-part input protocol: a `<VERB> <path>` line followed by a
//! body block that ends at the first blank line.

use crate::repl::error::{CommandSyntaxError, ReplError};
use crate::repl::models::{Command, Verb};
use std::io::{self, BufRead};

/// Outcome of reading one newline-terminated line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// A full line, newline included, was appended to the buffer
    Line,
    /// The stream ended after some bytes but before a newline
    Fragment,
    /// The stream ended with nothing read
    Eof,
}

/// Read one line into `buf`, replacing its previous content.
///
/// Bytes left at the end of the stream without a newline come back as
/// [`LineRead::Fragment`] so the caller can decide what to do with them.
pub fn read_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<LineRead> {
    buf.clear();
    let read = reader.read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.last() != Some(&b'\n') {
        return Ok(LineRead::Fragment);
    }
    Ok(LineRead::Line)
}

/// The error for input that stops in the middle of a line or body
pub fn unexpected_end_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of input")
}

/// True when the line has nothing but whitespace
pub fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
}

/// Parse a request line into a [`Command`].
///
/// The line is split on the first space. The verb is matched without regard
/// to case; the path is trimmed and loses one leading slash.
pub fn parse_command_line(line: &[u8]) -> Result<Command, CommandSyntaxError> {
    let line = String::from_utf8_lossy(line);
    let parts: Vec<&str> = line.splitn(2, ' ').collect();
    if parts.len() != 2 {
        return Err(CommandSyntaxError::WrongPartCount { found: parts.len() });
    }

    let verb = Verb::parse(parts[0])?;
    let path = parts[1].trim();
    let path = path.strip_prefix('/').unwrap_or(path);

    Ok(Command::new(verb, path))
}

/// Accumulate body lines into `body` until a blank line is consumed.
///
/// The buffer is cleared first so nothing from a previous command leaks in.
/// Running out of input before the blank line aborts the body.
pub fn read_body(reader: &mut impl BufRead, body: &mut Vec<u8>) -> Result<(), ReplError> {
    body.clear();
    let mut line = Vec::new();
    loop {
        match read_line(reader, &mut line).map_err(ReplError::BodyRead)? {
            LineRead::Fragment | LineRead::Eof => {
                return Err(ReplError::BodyRead(unexpected_end_of_input()));
            }
            LineRead::Line if is_blank(&line) => return Ok(()),
            LineRead::Line => body.extend_from_slice(&line),
        }
    }
}
