//! # ModKit
//!
//! Shared building blocks for HTTP modules: RFC 9457 problem responses and
//! the process shutdown waiter.

pub mod api;
pub mod shutdown;

pub use api::problem::{
    not_found, Problem, ProblemResponse, ValidationError, APPLICATION_PROBLEM_JSON,
};
pub use shutdown::{cancel_on_shutdown, wait_for_shutdown};
