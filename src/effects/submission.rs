//! Delivery of validated form records.

use stillwater::effect::Effect;
use stillwater::prelude::*;
use thiserror::Error;

/// Destination for submitted records, used as the effect environment.
///
/// Implementations report rejection with a human-readable reason; the form
/// shows it as its form-level message.
pub trait SubmissionSink<R>: Clone + Send + Sync + 'static {
    fn deliver(&self, record: &R) -> Result<(), String>;
}

/// Errors that can occur while delivering a record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Submission failed: {0}")]
    Rejected(String),
}

/// Deliver `record` to the sink found in the environment.
pub fn deliver<R, Env>(record: R) -> impl Effect<Output = (), Error = SubmitError, Env = Env>
where
    R: Send + Sync + 'static,
    Env: SubmissionSink<R>,
{
    from_fn(move |sink: &Env| sink.deliver(&record).map_err(SubmitError::Rejected)).boxed()
}
