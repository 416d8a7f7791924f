//! Multi-step symptom checker.
//!
//! Four screens: symptoms, severity, duration and results. The state records
//! what has been entered; the engine decides which events apply; the results
//! screen reads an [`Assessment`] derived from the entered data.

mod assessment;
mod engine;
mod state;

pub use assessment::{assess, Assessment, Finding, Probability, COMMON_SYMPTOMS, MAX_FINDINGS};
pub use engine::{WizardEngine, WizardEvent};
pub use state::{DurationBucket, Severity, WizardState, WizardStep};
