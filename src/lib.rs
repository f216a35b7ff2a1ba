//! # esline - Line-Oriented Client for Search Engine HTTP APIs
//!
//! Reads `<VERB> <path>` lines and blank-line-terminated bodies from stdin,
//! sends them to the configured server and prints the responses. Bodies can
//! be written in JSON5 and are translated to JSON before they are sent.
//!
//! ```text
//! $ esline --host localhost --port 9200
//! post my-index/_search
//! {query: {match_all: {}}}
//!
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use config::ReplConfig;
pub use repl::*;
