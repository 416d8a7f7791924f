//! Symptom-checker state.

use super::assessment::{assess, Assessment};
use crate::state_enum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

state_enum! {
    /// Screens of the symptom checker, in order.
    pub enum WizardStep {
        Symptoms,
        Severity,
        Duration,
        Results,
    }
    final: [Results]
}

impl WizardStep {
    /// 1-based position shown in the progress bar.
    pub fn number(self) -> u8 {
        match self {
            Self::Symptoms => 1,
            Self::Severity => 2,
            Self::Duration => 3,
            Self::Results => 4,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Symptoms => Some(Self::Severity),
            Self::Severity => Some(Self::Duration),
            Self::Duration => Some(Self::Results),
            Self::Results => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Symptoms => None,
            Self::Severity => Some(Self::Symptoms),
            Self::Duration => Some(Self::Severity),
            Self::Results => Some(Self::Duration),
        }
    }

    /// Progress bar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Symptoms => "Symptoms",
            Self::Severity => "Severity",
            Self::Duration => "Duration",
            Self::Results => "Results",
        }
    }
}

/// How strongly symptoms are felt. Also used as the severity label of a
/// candidate condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Mild => "Manageable, not affecting daily activities",
            Self::Moderate => "Noticeable discomfort, some daily impact",
            Self::Severe => "Significant pain or concern, seek medical help",
        }
    }

    pub(crate) fn rank(self) -> u32 {
        match self {
            Self::Mild => 0,
            Self::Moderate => 1,
            Self::Severe => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How long symptoms have lasted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "<1 day")]
    UnderADay,
    #[serde(rename = "1-3 days")]
    OneToThreeDays,
    #[serde(rename = "3-7 days")]
    ThreeToSevenDays,
    #[serde(rename = ">1 week")]
    OverAWeek,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::UnderADay,
        DurationBucket::OneToThreeDays,
        DurationBucket::ThreeToSevenDays,
        DurationBucket::OverAWeek,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::UnderADay => "Less than a day",
            Self::OneToThreeDays => "1-3 days",
            Self::ThreeToSevenDays => "3-7 days",
            Self::OverAWeek => "More than a week",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything entered so far in the symptom checker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub(crate) step: WizardStep,
    pub(crate) selected_symptoms: BTreeSet<String>,
    pub(crate) severity: Option<Severity>,
    pub(crate) duration: Option<DurationBucket>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// First step, nothing selected.
    pub fn new() -> Self {
        Self {
            step: WizardStep::Symptoms,
            selected_symptoms: BTreeSet::new(),
            severity: None,
            duration: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_symptoms(&self) -> &BTreeSet<String> {
        &self.selected_symptoms
    }

    pub fn is_selected(&self, symptom: &str) -> bool {
        self.selected_symptoms.contains(symptom)
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn duration(&self) -> Option<DurationBucket> {
        self.duration
    }

    /// Candidate conditions, available once the results step is reached.
    ///
    /// Derived from the entered data on every call.
    pub fn assessment(&self) -> Option<Assessment> {
        if self.step != WizardStep::Results {
            return None;
        }
        let severity = self.severity?;
        let duration = self.duration?;
        Some(assess(&self.selected_symptoms, severity, duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn steps_are_numbered_one_to_four() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn next_and_previous_walk_the_sequence() {
        assert_eq!(WizardStep::Symptoms.next(), Some(WizardStep::Severity));
        assert_eq!(WizardStep::Results.next(), None);
        assert_eq!(WizardStep::Symptoms.previous(), None);
        assert_eq!(WizardStep::Results.previous(), Some(WizardStep::Duration));
    }

    #[test]
    fn only_results_is_final() {
        assert!(WizardStep::Results.is_final());
        assert!(!WizardStep::Duration.is_final());
        assert_eq!(WizardStep::Results.name(), "Results");
    }

    #[test]
    fn duration_buckets_serialize_with_short_codes() {
        let codes: Vec<String> = DurationBucket::ALL
            .iter()
            .map(|b| serde_json::to_string(b).unwrap())
            .collect();
        assert_eq!(
            codes,
            vec!["\"<1 day\"", "\"1-3 days\"", "\"3-7 days\"", "\">1 week\""]
        );
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
        assert_eq!(Severity::Severe.to_string(), "Severe");
    }

    #[test]
    fn new_state_is_empty_first_step() {
        let state = WizardState::new();
        assert_eq!(state.step(), WizardStep::Symptoms);
        assert!(state.selected_symptoms().is_empty());
        assert_eq!(state.severity(), None);
        assert_eq!(state.duration(), None);
        assert!(state.assessment().is_none());
    }

    #[test]
    fn state_serializes_correctly() {
        let mut state = WizardState::new();
        state.selected_symptoms.insert("Fever".to_string());
        state.severity = Some(Severity::Moderate);

        let json = serde_json::to_string(&state).unwrap();
        let restored: WizardState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
