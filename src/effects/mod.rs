//! Imperative shell around the pure engines, using Stillwater 0.11.0.
//!
//! # Key Concepts
//!
//! - **Session**: hosts one engine, commits states and records phase changes
//! - **Submission**: delivers a validated record as an effect whose
//!   environment is the [`SubmissionSink`]
//!
//! Following Stillwater 0.11.0 conventions, functions return `impl Effect`
//! and use the free-standing constructors (`from_fn()`).

mod session;
mod submission;

pub use session::Session;
pub use submission::{deliver, SubmissionSink, SubmitError};
