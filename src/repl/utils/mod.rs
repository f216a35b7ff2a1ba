//! # Utils Module
//!
//! Contains utility functions and helpers used across the REPL.

pub mod http_parser;

// Re-export main functions for convenience
pub use http_parser::{
    is_blank, parse_command_line, read_body, read_line, unexpected_end_of_input,
    LineRead,
};
