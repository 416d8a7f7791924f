//! Symptom-checker reducer.
//!
//! The wizard is a four-step finite-state machine. Each step owns a gate; `Next`
//! moves forward only when the gate of the current step holds. Events that do
//! not apply to the current step are dropped without touching the state.

use super::state::{DurationBucket, Severity, WizardState, WizardStep};
use crate::core::{Guard, Reducer};
use tracing::debug;

/// Input accepted by [`WizardEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    SelectSymptom(String),
    DeselectSymptom(String),
    /// Select when absent, deselect when present.
    ToggleSymptom(String),
    SetSeverity(Severity),
    SetDuration(DurationBucket),
    Next,
    Back,
    Reset,
}

/// Reducer for the symptom checker.
///
/// # Example
///
/// ```rust
/// use careflow::wizard::{DurationBucket, Severity, WizardEngine, WizardEvent, WizardState, WizardStep};
///
/// let engine = WizardEngine::new();
/// let events = [
///     WizardEvent::Next,
///     WizardEvent::SelectSymptom("Cough".into()),
///     WizardEvent::Next,
///     WizardEvent::SetSeverity(Severity::Mild),
///     WizardEvent::Next,
///     WizardEvent::SetDuration(DurationBucket::OneToThreeDays),
///     WizardEvent::Next,
/// ];
///
/// let state = events
///     .into_iter()
///     .fold(WizardState::new(), |state, event| engine.advance(&state, event));
///
/// assert_eq!(state.step(), WizardStep::Results);
/// assert!(state.assessment().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct WizardEngine {
    gates: Vec<(WizardStep, Guard<WizardState>)>,
}

impl Default for WizardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardEngine {
    pub fn new() -> Self {
        Self {
            gates: vec![
                (
                    WizardStep::Symptoms,
                    Guard::new(|s: &WizardState| !s.selected_symptoms.is_empty()),
                ),
                (
                    WizardStep::Severity,
                    Guard::new(|s: &WizardState| s.severity.is_some()),
                ),
                (
                    WizardStep::Duration,
                    Guard::new(|s: &WizardState| s.duration.is_some()),
                ),
            ],
        }
    }

    /// Whether `Next` would leave the current step.
    pub fn can_advance(&self, state: &WizardState) -> bool {
        if state.step.next().is_none() {
            return false;
        }
        self.gates
            .iter()
            .find(|(step, _)| *step == state.step)
            .is_none_or(|(_, gate)| gate.check(state))
    }

    /// Apply one event. Never fails; inapplicable events return an equal
    /// state.
    pub fn advance(&self, state: &WizardState, event: WizardEvent) -> WizardState {
        match event {
            WizardEvent::SelectSymptom(name) => {
                self.edit_symptoms(state, &name, |set, name| {
                    set.insert(name.to_string());
                })
            }
            WizardEvent::DeselectSymptom(name) => {
                self.edit_symptoms(state, &name, |set, name| {
                    set.remove(name);
                })
            }
            WizardEvent::ToggleSymptom(name) => {
                self.edit_symptoms(state, &name, |set, name| {
                    if !set.remove(name) {
                        set.insert(name.to_string());
                    }
                })
            }
            WizardEvent::SetSeverity(level) => {
                if state.step != WizardStep::Severity {
                    debug!(step = state.step.label(), "ignoring severity outside its step");
                    return state.clone();
                }
                WizardState {
                    severity: Some(level),
                    ..state.clone()
                }
            }
            WizardEvent::SetDuration(bucket) => {
                if state.step != WizardStep::Duration {
                    debug!(step = state.step.label(), "ignoring duration outside its step");
                    return state.clone();
                }
                WizardState {
                    duration: Some(bucket),
                    ..state.clone()
                }
            }
            WizardEvent::Next => match state.step.next() {
                Some(step) if self.can_advance(state) => WizardState {
                    step,
                    ..state.clone()
                },
                _ => {
                    debug!(step = state.step.label(), "next rejected by gate");
                    state.clone()
                }
            },
            WizardEvent::Back => {
                // Results is terminal; only Reset leaves it.
                if state.step == WizardStep::Results {
                    return state.clone();
                }
                match state.step.previous() {
                    Some(step) => WizardState {
                        step,
                        ..state.clone()
                    },
                    None => state.clone(),
                }
            }
            WizardEvent::Reset => WizardState::new(),
        }
    }

    fn edit_symptoms<F>(&self, state: &WizardState, name: &str, edit: F) -> WizardState
    where
        F: FnOnce(&mut std::collections::BTreeSet<String>, &str),
    {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring blank symptom");
            return state.clone();
        }
        if state.step != WizardStep::Symptoms {
            debug!(step = state.step.label(), symptom = name, "ignoring symptom edit outside its step");
            return state.clone();
        }

        let mut next = state.clone();
        edit(&mut next.selected_symptoms, name);
        next
    }
}

impl Reducer for WizardEngine {
    type State = WizardState;
    type Event = WizardEvent;
    type Phase = WizardStep;

    fn initial(&self) -> WizardState {
        WizardState::new()
    }

    fn reduce(&self, state: &WizardState, event: WizardEvent) -> WizardState {
        self.advance(state, event)
    }

    fn phase(&self, state: &WizardState) -> WizardStep {
        state.step
    }
}
