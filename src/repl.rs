//! # REPL Module
//!
//! A line-oriented request loop for search engine HTTP APIs.
//!
//! ```text
//! stdin ──▶ request line ──▶ body block ──▶ translate ──▶ HttpTransport
//!                                                             │
//!                                 stdout ◀── 2xx ─────────────┤
//!                                 stderr ◀── other / errors ──┘
//! ```
//!
//! - **models**: the parsed command, the outbound request and the response
//! - **utils**: request line and body block parsing
//! - **services**: body translation and the HTTP transport
//! - **controller**: the loop that ties them together

pub mod controller;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub mod testing;

// Re-export main types for convenience
pub use controller::{ReplController, ReplState, RunSummary};
pub use error::{CommandSyntaxError, ReplError};
pub use models::{Command, OutboundRequest, ResponseModel, Verb, VerbCase};
pub use services::{BodyMode, HttpService, HttpTransport};
