//! Declarative field validation.
//!
//! A [`Schema`] maps field names to ordered rule lists. Validation runs every
//! field independently and reports at most one message per field: the first
//! rule that fails. Failures are accumulated with stillwater's `Validation`
//! so one pass reports every broken field at once.
//!
//! # Example
//!
//! ```rust
//! use careflow::schema::{FieldBuilder, FieldValues, Rule, SchemaBuilder, ValidationContext};
//! use chrono::NaiveDate;
//!
//! let schema = SchemaBuilder::new()
//!     .field(
//!         FieldBuilder::new("name")
//!             .required("Name is required")
//!             .max_chars(100, "Name too long"),
//!     )
//!     .and_then(|b| b.field(FieldBuilder::new("email").rule(Rule::email("Invalid email"))))
//!     .and_then(|b| b.build())
//!     .unwrap();
//!
//! let mut values = FieldValues::new();
//! values.insert("name".into(), "  ".into());
//! values.insert("email".into(), "jane@example.com".into());
//!
//! let ctx = ValidationContext::on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
//! let errors = schema.errors(&values, &ctx);
//! assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
//! assert!(!errors.contains_key("email"));
//! ```

pub mod builder;
pub mod error;
pub mod rule;

pub use builder::{FieldBuilder, SchemaBuilder};
pub use error::{BuildError, FieldError};
pub use rule::{parse_date, Rule, DATE_FORMAT};

use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Raw field inputs keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// One message per failing field.
pub type FieldErrors = BTreeMap<String, String>;

/// Outcome of validating a schema or a field.
pub type FieldValidation = Validation<(), NonEmptyVec<FieldError>>;

/// Ambient inputs a rule may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationContext {
    /// The current local date; date fields may not precede it.
    pub today: NaiveDate,
}

impl ValidationContext {
    /// Context pinned to a given date.
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the local calendar date right now.
    pub fn now() -> Self {
        Self::on(Local::now().date_naive())
    }
}

/// Validation rules for one field.
#[derive(Clone, Debug)]
pub struct FieldSchema {
    pub(crate) name: String,
    pub(crate) optional: bool,
    pub(crate) rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional fields skip their rules when left blank.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule the raw value violates, if any.
    ///
    /// Missing values are treated as empty. The value is trimmed before any
    /// rule sees it.
    pub fn first_failure(&self, raw: Option<&str>, ctx: &ValidationContext) -> Option<&Rule> {
        let value = raw.map(str::trim).unwrap_or("");
        if self.optional && value.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| !rule.check(value, ctx))
    }

    /// Validate the raw value, failing with the first violated rule.
    pub fn check(&self, raw: Option<&str>, ctx: &ValidationContext) -> FieldValidation {
        match self.first_failure(raw, ctx) {
            None => Validation::success(()),
            Some(rule) => Validation::fail(FieldError {
                field: self.name.clone(),
                message: rule.message().to_string(),
            }),
        }
    }
}

/// An ordered set of field schemas.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validate every field, accumulating all failures.
    pub fn validate(&self, values: &FieldValues, ctx: &ValidationContext) -> FieldValidation {
        let checks: Vec<FieldValidation> = self
            .fields
            .iter()
            .map(|field| field.check(values.get(&field.name).map(String::as_str), ctx))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Fresh error map for `values`. Empty when everything passes.
    pub fn errors(&self, values: &FieldValues, ctx: &ValidationContext) -> FieldErrors {
        match self.validate(values, ctx) {
            Validation::Success(_) => FieldErrors::new(),
            Validation::Failure(failures) => failures
                .iter()
                .map(|failure| (failure.field.clone(), failure.message.clone()))
                .collect(),
        }
    }

    /// Error message for a single field, if it fails.
    ///
    /// Unknown field names never fail.
    pub fn field_error(
        &self,
        name: &str,
        values: &FieldValues,
        ctx: &ValidationContext,
    ) -> Option<String> {
        let field = self.field(name)?;
        field
            .first_failure(values.get(name).map(String::as_str), ctx)
            .map(|rule| rule.message().to_string())
    }

    /// Trimmed copy of the values of every schema field.
    ///
    /// Fields without a value come out as empty strings; keys the schema does
    /// not know are dropped.
    pub fn trimmed(&self, values: &FieldValues) -> FieldValues {
        self.fields
            .iter()
            .map(|field| {
                let value = values
                    .get(&field.name)
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default();
                (field.name.clone(), value)
            })
            .collect()
    }
}
