//! Schema-validated form reducer and its submission protocol.
//!
//! Submission runs in three steps so the host controls the effect:
//!
//! 1. [`FormEngine::begin_submit`] validates and, when clean, moves the form to
//!    `Submitting` and hands out a [`PendingSubmission`].
//! 2. [`deliver`] runs against a [`SubmissionSink`] environment.
//! 3. [`FormEngine::finish_submit`] applies the outcome, unless the form was
//!    reset in the meantime.
//!
//! [`FormEngine::submit`] chains all three.

use super::kind::FormKind;
use super::state::{FormState, FormStatus};
use crate::core::Reducer;
use crate::effects::{deliver, SubmissionSink, SubmitError};
use crate::schema::{FieldErrors, FieldValues, Schema, ValidationContext};
use chrono::NaiveDate;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};

/// Form-level message used when valid values cannot be turned into a record.
pub const UNPROCESSABLE_MESSAGE: &str = "Unable to process the form. Please review your details.";

/// Identifies the form generation a submission was started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubmitTicket {
    generation: u64,
}

impl SubmitTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A validated record waiting to be delivered.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSubmission<R> {
    pub ticket: SubmitTicket,
    pub record: R,
}

/// Form events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    SetField { field: String, value: String },
    /// Recompute every field error.
    Validate,
    Reset,
}

impl FormEvent {
    pub fn set(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetField {
            field: field.into(),
            value: value.into(),
        }
    }
}

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Reducer for one form kind.
pub struct FormEngine<F: FormKind> {
    schema: Arc<Schema>,
    initial: FieldValues,
    clock: Clock,
    kind: PhantomData<F>,
}

impl<F: FormKind> Clone for FormEngine<F> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            initial: self.initial.clone(),
            clock: Arc::clone(&self.clock),
            kind: PhantomData,
        }
    }
}

impl<F: FormKind> fmt::Debug for FormEngine<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("form", &F::NAME)
            .field("schema", &self.schema)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl<F: FormKind> FormEngine<F> {
    /// Engine validating against `schema`, starting from `initial` values.
    ///
    /// Date rules compare against the local calendar date.
    pub fn new(schema: Schema, initial: FieldValues) -> Self {
        Self {
            schema: Arc::new(schema),
            initial,
            clock: Arc::new(|| ValidationContext::now().today),
            kind: PhantomData,
        }
    }

    /// Replace the source of "today".
    pub fn with_clock<C>(mut self, clock: C) -> Self
    where
        C: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn context(&self) -> ValidationContext {
        ValidationContext::on((self.clock)())
    }

    /// Store `value` under `field` and clear that field's error.
    ///
    /// An edit after a failed submission also clears the form-level message.
    ///
    /// Ignored while a submission is pending, after success, and for fields
    /// the schema does not know.
    pub fn set_field(&self, state: &FormState<F>, field: &str, value: &str) -> FormState<F> {
        if !state.status.is_editable() {
            debug!(form = F::NAME, field, status = ?state.status, "ignoring edit");
            return state.clone();
        }
        if self.schema.field(field).is_none() {
            debug!(form = F::NAME, field, "ignoring edit of unknown field");
            return state.clone();
        }

        let mut next = state.clone();
        next.values.insert(field.to_string(), value.to_string());
        next.errors.remove(field);
        next.form_error = None;
        next.status = FormStatus::Editing;
        next.generation += 1;
        next
    }

    /// Errors for every failing field of `state`.
    pub fn validate(&self, state: &FormState<F>) -> FieldErrors {
        self.schema.errors(&state.values, &self.context())
    }

    /// State with its error map recomputed.
    pub fn check(&self, state: &FormState<F>) -> FormState<F> {
        FormState {
            errors: self.validate(state),
            ..state.clone()
        }
    }

    /// Start a submission.
    ///
    /// Returns the state unchanged while one is already pending or after
    /// success. On validation failure the errors are stored and nothing is
    /// pending.
    pub fn begin_submit(
        &self,
        state: &FormState<F>,
    ) -> (FormState<F>, Option<PendingSubmission<F::Record>>) {
        if matches!(state.status, FormStatus::Submitting | FormStatus::Submitted) {
            debug!(form = F::NAME, status = ?state.status, "ignoring repeated submit");
            return (state.clone(), None);
        }

        let mut next = state.clone();
        next.form_error = None;
        next.errors = self.validate(state);
        if !next.errors.is_empty() {
            debug!(form = F::NAME, invalid = next.errors.len(), "submit blocked by validation");
            next.status = FormStatus::Editing;
            return (next, None);
        }

        match F::to_record(&self.schema.trimmed(&state.values)) {
            Some(record) => {
                next.status = FormStatus::Submitting;
                let ticket = SubmitTicket {
                    generation: next.generation,
                };
                (next, Some(PendingSubmission { ticket, record }))
            }
            None => {
                warn!(form = F::NAME, "validated values did not convert to a record");
                next.status = FormStatus::Failed;
                next.form_error = Some(UNPROCESSABLE_MESSAGE.to_string());
                (next, None)
            }
        }
    }

    /// Apply a delivery outcome.
    ///
    /// Outcomes for a ticket that no longer matches, or for a form that is
    /// not submitting, are dropped.
    pub fn finish_submit(
        &self,
        state: &FormState<F>,
        ticket: SubmitTicket,
        outcome: Result<(), SubmitError>,
    ) -> FormState<F> {
        if state.status != FormStatus::Submitting || ticket.generation != state.generation {
            warn!(
                form = F::NAME,
                ticket = ticket.generation,
                generation = state.generation,
                "dropping result of abandoned submission"
            );
            return state.clone();
        }

        let mut next = state.clone();
        match outcome {
            Ok(()) => {
                info!(form = F::NAME, "submission accepted");
                next.status = FormStatus::Submitted;
            }
            Err(err) => {
                warn!(form = F::NAME, error = %err, "submission rejected");
                next.status = FormStatus::Failed;
                next.form_error = Some(err.to_string());
            }
        }
        next
    }

    /// Fresh form with the initial values. Outstanding tickets go stale.
    pub fn reset(&self, state: &FormState<F>) -> FormState<F> {
        FormState::with_values(self.initial.clone(), state.generation + 1)
    }

    /// Validate, deliver to `sink` and apply the outcome.
    pub async fn submit<Env>(&self, state: &FormState<F>, sink: &Env) -> FormState<F>
    where
        Env: SubmissionSink<F::Record>,
    {
        let (pending_state, pending) = self.begin_submit(state);
        let Some(PendingSubmission { ticket, record }) = pending else {
            return pending_state;
        };

        let outcome = deliver(record).run(sink).await;
        self.finish_submit(&pending_state, ticket, outcome)
    }
}

impl<F: FormKind> Reducer for FormEngine<F> {
    type State = FormState<F>;
    type Event = FormEvent;
    type Phase = FormStatus;

    fn initial(&self) -> FormState<F> {
        FormState::with_values(self.initial.clone(), 0)
    }

    fn reduce(&self, state: &FormState<F>, event: FormEvent) -> FormState<F> {
        match event {
            FormEvent::SetField { field, value } => self.set_field(state, &field, &value),
            FormEvent::Validate => self.check(state),
            FormEvent::Reset => self.reset(state),
        }
    }

    fn phase(&self, state: &FormState<F>) -> FormStatus {
        state.status
    }
}
