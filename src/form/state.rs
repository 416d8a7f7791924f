//! Form state shared by every form kind.

use super::kind::FormKind;
use crate::schema::{FieldErrors, FieldValues};
use crate::state_enum;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

state_enum! {
    /// Lifecycle of a form.
    pub enum FormStatus {
        Editing,
        Submitting,
        Submitted,
        Failed,
    }
    final: [Submitted]
    error: [Failed]
}

impl FormStatus {
    /// Whether field edits are accepted.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Editing | Self::Failed)
    }
}

/// Raw inputs, per-field errors and submission status of one form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FormState<F: FormKind> {
    pub(crate) values: FieldValues,
    pub(crate) errors: FieldErrors,
    pub(crate) form_error: Option<String>,
    pub(crate) status: FormStatus,
    pub(crate) generation: u64,
    #[serde(skip)]
    pub(crate) kind: PhantomData<F>,
}

impl<F: FormKind> FormState<F> {
    pub(crate) fn with_values(values: FieldValues, generation: u64) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            form_error: None,
            status: FormStatus::Editing,
            generation,
            kind: PhantomData,
        }
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Raw value of `field`, empty when never set.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Message not tied to a field, set when delivery fails.
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// True only once the sink accepted the record.
    pub fn submitted(&self) -> bool {
        self.status == FormStatus::Submitted
    }
}
