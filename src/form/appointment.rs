//! Appointment booking form.

use super::engine::FormEngine;
use super::kind::FormKind;
use crate::config::BookingConfig;
use crate::schema::{parse_date, BuildError, FieldBuilder, FieldValues, Rule, Schema, SchemaBuilder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the consultation takes place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationType {
    #[default]
    Video,
    InPerson,
    Phone,
}

impl ConsultationType {
    pub const ALL: [ConsultationType; 3] = [Self::Video, Self::InPerson, Self::Phone];

    /// Form value, identical to the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::InPerson => "in-person",
            Self::Phone => "phone",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video Call",
            Self::InPerson => "In-Person",
            Self::Phone => "Phone Call",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker for the appointment form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Appointment;

/// A validated booking request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub doctor: String,
    pub date: NaiveDate,
    pub time: String,
    pub consultation: ConsultationType,
    pub problem: String,
}

impl FormKind for Appointment {
    type Record = AppointmentRecord;
    const NAME: &'static str = "appointment";

    fn to_record(values: &FieldValues) -> Option<AppointmentRecord> {
        let text = |field: &str| values.get(field).cloned();
        Some(AppointmentRecord {
            name: text("name")?,
            email: text("email")?,
            phone: text("phone")?,
            doctor: text("doctor")?,
            date: parse_date(values.get("date")?)?,
            time: text("time")?,
            consultation: ConsultationType::from_code(values.get("type")?)?,
            problem: text("problem")?,
        })
    }
}

impl Appointment {
    /// Field rules for the booking form, offering the configured doctors and
    /// time slots.
    pub fn schema(config: &BookingConfig) -> Result<Schema, BuildError> {
        SchemaBuilder::new()
            .field(
                FieldBuilder::new("name")
                    .required("Name is required")
                    .max_chars(100, "Name is too long"),
            )?
            .field(FieldBuilder::new("email").rule(Rule::email("Invalid email")))?
            .field(FieldBuilder::new("phone").rule(Rule::phone("Invalid phone number")))?
            .field(
                FieldBuilder::new("doctor")
                    .required("Please select a doctor")
                    .rule(Rule::one_of(
                        config.doctors.iter().cloned(),
                        "Please select a listed doctor",
                    )),
            )?
            .field(
                FieldBuilder::new("date")
                    .required("Please select a date")
                    .rule(Rule::iso_date("Invalid date"))
                    .rule(Rule::not_before_today("Date cannot be in the past")),
            )?
            .field(
                FieldBuilder::new("time")
                    .required("Please select a time")
                    .rule(Rule::one_of(
                        config.time_slots.iter().cloned(),
                        "Please select an available time",
                    )),
            )?
            .field(
                FieldBuilder::new("problem")
                    .min_chars(5, "Please describe your problem")
                    .max_chars(500, "Description is too long"),
            )?
            .field(
                FieldBuilder::new("type")
                    .required("Please select a consultation type")
                    .rule(Rule::one_of(
                        ConsultationType::ALL.map(ConsultationType::code),
                        "Invalid consultation type",
                    )),
            )?
            .build()
    }

    /// Values of a fresh booking form.
    pub fn initial_values(config: &BookingConfig) -> FieldValues {
        FieldValues::from([(
            "type".to_string(),
            config.default_consultation.code().to_string(),
        )])
    }

    pub fn engine(config: &BookingConfig) -> Result<FormEngine<Appointment>, BuildError> {
        Ok(FormEngine::new(
            Self::schema(config)?,
            Self::initial_values(config),
        ))
    }
}
