//! # Models Module
//!
//! Transient values that live for a single loop iteration.

pub mod request_model;
pub mod response_model;

pub use request_model::{
    build_target_url, Command, HttpHeaders, OutboundRequest, Verb, VerbCase, FORM_CONTENT_TYPE,
    PRETTY_FLAG,
};
pub use response_model::{ResponseModel, ResponseStatus};
