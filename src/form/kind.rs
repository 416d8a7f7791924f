use crate::schema::FieldValues;
use serde::Serialize;
use std::fmt::Debug;

/// A concrete form: its name and how validated values become a typed record.
///
/// Kinds are zero-sized markers; the field rules live in the engine's
/// [`Schema`](crate::schema::Schema).
pub trait FormKind: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Typed payload handed to the submission sink.
    type Record: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static;

    /// Name used in log output.
    const NAME: &'static str;

    /// Build the record from trimmed values that passed validation.
    ///
    /// Returns `None` when the values cannot be converted, which only happens
    /// when the schema does not cover the conversion.
    fn to_record(values: &FieldValues) -> Option<Self::Record>;
}
