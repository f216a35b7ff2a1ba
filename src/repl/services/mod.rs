//! # Services Layer
//!
//! Collaborators the command loop hands work to: body translation and the
//! HTTP transport.

pub mod http;
pub mod translate;

// Re-export service types
pub use http::{HttpService, HttpTransport};
pub use translate::{translate_to_json, BodyMode};
