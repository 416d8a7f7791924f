//! Errors for schema construction and field validation.

use thiserror::Error;

/// Errors that can occur when building schemas and fields.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Field name not specified. Pass a non-empty name to FieldBuilder::new")]
    MissingFieldName,

    #[error("Field '{field}' has no rules. Add at least one rule")]
    NoRules { field: String },

    #[error("No fields defined. Add at least one field")]
    NoFields,

    #[error("Field '{field}' is defined more than once")]
    DuplicateField { field: String },
}

/// A single failed rule, reported against its field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
