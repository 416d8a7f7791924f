//! Fluent builders for schemas and fields.

use super::error::BuildError;
use super::rule::Rule;
use super::{FieldSchema, Schema};
use std::collections::BTreeSet;

/// Builder for a single field's rule list.
#[derive(Clone, Debug)]
pub struct FieldBuilder {
    name: String,
    optional: bool,
    rules: Vec<Rule>,
}

impl FieldBuilder {
    /// Start a field with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Skip all rules when the value is blank.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Append a rule. Rules run in the order they were added.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::required(message))
    }

    pub fn min_chars(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::min_chars(min, message))
    }

    pub fn max_chars(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::max_chars(max, message))
    }

    /// Build the field.
    pub fn build(self) -> Result<FieldSchema, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::MissingFieldName);
        }
        if self.rules.is_empty() {
            return Err(BuildError::NoRules { field: self.name });
        }

        Ok(FieldSchema {
            name: self.name,
            optional: self.optional,
            rules: self.rules,
        })
    }
}

/// Builder for a whole schema.
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSchema>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field using a builder.
    /// Returns an error if the field builder fails validation.
    pub fn field(mut self, builder: FieldBuilder) -> Result<Self, BuildError> {
        let field = builder.build()?;
        self.fields.push(field);
        Ok(self)
    }

    /// Add a pre-built field.
    pub fn add_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the schema.
    /// Returns an error when empty or when a field name repeats.
    pub fn build(self) -> Result<Schema, BuildError> {
        if self.fields.is_empty() {
            return Err(BuildError::NoFields);
        }

        {
            let mut seen = BTreeSet::new();
            for field in &self.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(BuildError::DuplicateField {
                        field: field.name.clone(),
                    });
                }
            }
        }

        Ok(Schema {
            fields: self.fields,
        })
    }
}
