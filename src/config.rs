//! Engine configuration.
//!
//! Reference data the engines are constructed from: the doctors and time
//! slots offered for booking and the pharmacy catalog. Every section has
//! defaults, so a JSON document only needs the keys it overrides.
//!
//! ```rust
//! use careflow::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "booking": { "doctors": ["Dr. Ada Lovelace - Cardiologist"] } }"#).unwrap();
//! assert_eq!(config.booking.doctors.len(), 1);
//! assert_eq!(config.booking.time_slots.len(), 12);
//! assert_eq!(config.pharmacy.products.len(), 8);
//! ```

use crate::cart::{Catalog, Product};
use crate::form::ConsultationType;
use crate::schema::BuildError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Product '{id}' is listed more than once")]
    DuplicateProduct { id: String },

    #[error("Product '{id}' has a negative price")]
    NegativePrice { id: String },

    #[error("Product '{id}' costs more than {max}")]
    PriceTooLarge { id: String, max: Decimal },

    #[error("'{field}' must list at least one entry")]
    EmptyChoices { field: &'static str },

    #[error("'{field}' lists '{value}' more than once")]
    DuplicateChoice { field: &'static str, value: String },

    #[error("Invalid form schema: {0}")]
    Schema(#[from] BuildError),
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub booking: BookingConfig,
    pub pharmacy: PharmacyConfig,
}

impl EngineConfig {
    /// Parse and check a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.booking.validate()?;
        self.pharmacy.validate()
    }
}

/// Choices offered by the appointment form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub doctors: Vec<String>,
    pub time_slots: Vec<String>,
    /// Consultation type preselected on a fresh form.
    pub default_consultation: ConsultationType,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            doctors: [
                "Dr. Sarah Wilson - Cardiologist",
                "Dr. Michael Chen - General Physician",
                "Dr. Emily Park - Dermatologist",
                "Dr. James Miller - Neurologist",
                "Dr. Priya Sharma - Pediatrician",
                "Dr. Robert Kim - Orthopedic",
            ]
            .map(String::from)
            .to_vec(),
            time_slots: [
                "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "2:00 PM",
                "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
            ]
            .map(String::from)
            .to_vec(),
            default_consultation: ConsultationType::Video,
        }
    }
}

impl BookingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_choices("booking.doctors", &self.doctors)?;
        check_choices("booking.time_slots", &self.time_slots)
    }
}

fn check_choices(field: &'static str, choices: &[String]) -> Result<(), ConfigError> {
    if choices.is_empty() {
        return Err(ConfigError::EmptyChoices { field });
    }
    for (i, choice) in choices.iter().enumerate() {
        if choices[..i].contains(choice) {
            return Err(ConfigError::DuplicateChoice {
                field,
                value: choice.clone(),
            });
        }
    }
    Ok(())
}

/// Pharmacy catalog and delivery policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PharmacyConfig {
    pub products: Vec<Product>,
    /// Order total from which delivery is free.
    pub free_delivery_threshold: Decimal,
}

/// Orders of 25.00 or more ship free.
pub fn default_free_delivery_threshold() -> Decimal {
    Decimal::new(25, 0)
}

impl Default for PharmacyConfig {
    fn default() -> Self {
        let product = |id: &str, name: &str, category: &str, cents: i64, in_stock: bool, description: &str| {
            Product::new(id, name, category, Decimal::new(cents, 2), in_stock)
                .with_description(description)
        };

        Self {
            products: vec![
                product("paracetamol-500", "Paracetamol 500mg", "Pain Relief", 599, true, "Fast-acting pain relief tablets"),
                product("amoxicillin-250", "Amoxicillin 250mg", "Antibiotics", 1299, true, "Broad-spectrum antibiotic capsules"),
                product("vitamin-d3-1000", "Vitamin D3 1000IU", "Vitamins", 849, true, "Daily vitamin D supplement"),
                product("aspirin-75", "Aspirin 75mg", "Heart Health", 499, true, "Low-dose aspirin for heart health"),
                product("metformin-500", "Metformin 500mg", "Diabetes", 999, false, "Blood sugar management tablets"),
                product("vitamin-c-1000", "Vitamin C 1000mg", "Vitamins", 699, true, "Immunity booster supplement"),
                product("ibuprofen-400", "Ibuprofen 400mg", "Pain Relief", 749, true, "Anti-inflammatory pain relief"),
                product("omega-3", "Omega-3 Fish Oil", "Heart Health", 1499, true, "Heart & brain health supplement"),
            ],
            free_delivery_threshold: default_free_delivery_threshold(),
        }
    }
}

impl PharmacyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        Catalog::new(self.products.clone()).map(|_| ())
    }
}
