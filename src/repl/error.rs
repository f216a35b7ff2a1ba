//! # REPL Errors
//!
//! Every failure the command loop can hit while processing one command.
//! Only [`ReplError::InputRead`] ends the loop; the rest are reported to the
//! error sink and the loop moves on to the next command.

use thiserror::Error;

/// Rejection reasons for a command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandSyntaxError {
    #[error("wrong number of url line parts. found {found}, expected 2")]
    WrongPartCount { found: usize },

    #[error("illegal verb: {0}")]
    IllegalVerb(String),
}

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("error reading line: {0}")]
    InputRead(#[source] std::io::Error),

    #[error("bad url line: {0}")]
    CommandSyntax(#[from] CommandSyntaxError),

    #[error("error reading body: {0}")]
    BodyRead(#[source] std::io::Error),

    #[error("body parse error: {0}")]
    Translation(String),

    #[error("unable to create http request: {0}")]
    RequestConstruction(String),

    #[error("error sending http request: {0}")]
    Transport(String),

    #[error("error reading http response: {0}")]
    ResponseRead(#[source] std::io::Error),

    #[error("error writing output: {0}")]
    Output(#[source] std::io::Error),
}
