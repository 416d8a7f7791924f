//! Contact form.

use super::engine::FormEngine;
use super::kind::FormKind;
use crate::schema::{BuildError, FieldBuilder, FieldValues, Rule, Schema, SchemaBuilder};
use serde::{Deserialize, Serialize};

/// Marker for the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact;

/// A validated contact message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    /// Absent when the optional phone field was left blank.
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl FormKind for Contact {
    type Record = ContactRecord;
    const NAME: &'static str = "contact";

    fn to_record(values: &FieldValues) -> Option<ContactRecord> {
        Some(ContactRecord {
            name: values.get("name")?.clone(),
            email: values.get("email")?.clone(),
            phone: values.get("phone").filter(|p| !p.is_empty()).cloned(),
            subject: values.get("subject")?.clone(),
            message: values.get("message")?.clone(),
        })
    }
}

impl Contact {
    pub fn schema() -> Result<Schema, BuildError> {
        SchemaBuilder::new()
            .field(
                FieldBuilder::new("name")
                    .required("Name is required")
                    .max_chars(100, "Name too long"),
            )?
            .field(
                FieldBuilder::new("email")
                    .rule(Rule::email("Invalid email address"))
                    .max_chars(255, "Email too long"),
            )?
            .field(
                FieldBuilder::new("phone")
                    .optional()
                    .rule(Rule::phone("Invalid phone number")),
            )?
            .field(
                FieldBuilder::new("subject")
                    .required("Subject is required")
                    .max_chars(200, "Subject too long"),
            )?
            .field(
                FieldBuilder::new("message")
                    .min_chars(10, "Message must be at least 10 characters")
                    .max_chars(1000, "Message too long"),
            )?
            .build()
    }

    pub fn engine() -> Result<FormEngine<Contact>, BuildError> {
        Ok(FormEngine::new(Self::schema()?, FieldValues::new()))
    }
}
