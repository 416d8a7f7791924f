//! Session host: owns one engine and its current state.

use super::submission::{deliver, SubmissionSink};
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{Reducer, State, StateHistory, StateTransition};
use crate::form::{FormEngine, FormKind, PendingSubmission};
use chrono::Utc;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::{debug, info};

/// Holds the live state of one interaction and records phase changes.
///
/// Reducers stay pure; the session is where time is read and log output is
/// produced.
///
/// # Example
///
/// ```rust
/// use careflow::effects::Session;
/// use careflow::wizard::{WizardEngine, WizardEvent, WizardStep};
///
/// let mut session = Session::new(WizardEngine::new());
/// session.dispatch(WizardEvent::SelectSymptom("Fever".into()));
/// session.dispatch(WizardEvent::Next);
///
/// assert_eq!(session.phase(), WizardStep::Severity);
/// assert_eq!(session.history().transitions().len(), 1);
/// ```
pub struct Session<R: Reducer> {
    engine: R,
    state: R::State,
    history: StateHistory<R::Phase>,
    events_in_phase: usize,
}

impl<R: Reducer> Session<R> {
    /// Start a session at the engine's initial state.
    pub fn new(engine: R) -> Self {
        let state = engine.initial();
        Self {
            engine,
            state,
            history: StateHistory::new(),
            events_in_phase: 0,
        }
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    pub fn phase(&self) -> R::Phase {
        self.engine.phase(&self.state)
    }

    pub fn history(&self) -> &StateHistory<R::Phase> {
        &self.history
    }

    /// Reduce `event` and commit the result. Returns whether the state
    /// changed.
    pub fn dispatch(&mut self, event: R::Event) -> bool {
        debug!(?event, "dispatching");
        let next = self.engine.reduce(&self.state, event);
        self.commit(next)
    }

    /// Replace the current state with one computed outside `reduce`.
    ///
    /// Counts as one handled event. A phase change is recorded in history.
    pub fn commit(&mut self, next: R::State) -> bool {
        self.events_in_phase += 1;
        if next == self.state {
            debug!(phase = self.phase().name(), "state unchanged");
            return false;
        }

        let from = self.phase();
        let to = self.engine.phase(&next);
        if from != to {
            info!(from = from.name(), to = to.name(), "phase changed");
            self.history = self.history.record(StateTransition {
                from,
                to,
                timestamp: Utc::now(),
                events: self.events_in_phase,
            });
            self.events_in_phase = 0;
        }
        self.state = next;
        true
    }

    /// Snapshot the session.
    pub fn checkpoint(&self) -> Checkpoint<R::State, R::Phase> {
        Checkpoint::new(self.state.clone(), self.history.clone(), self.events_in_phase)
    }

    /// Continue a session from a snapshot.
    ///
    /// The last recorded phase must be the phase of the stored state.
    pub fn resume(
        engine: R,
        checkpoint: Checkpoint<R::State, R::Phase>,
    ) -> Result<Self, CheckpointError> {
        checkpoint.check_version()?;

        let phase = engine.phase(&checkpoint.state);
        if let Some(last) = checkpoint.history.transitions().last() {
            if last.to != phase {
                return Err(CheckpointError::Mismatch(format!(
                    "history ends in '{}' but state is in '{}'",
                    last.to.name(),
                    phase.name()
                )));
            }
        }

        info!(id = %checkpoint.id, phase = phase.name(), "resuming session");
        Ok(Self {
            engine,
            state: checkpoint.state,
            history: checkpoint.history,
            events_in_phase: checkpoint.events_in_phase,
        })
    }
}

impl<F: FormKind> Session<FormEngine<F>> {
    /// Submit the form to `sink`, committing the `Submitting` and final
    /// states in turn.
    pub async fn submit<Env>(&mut self, sink: &Env)
    where
        Env: SubmissionSink<F::Record>,
    {
        let (next, pending) = self.engine.begin_submit(&self.state);
        self.commit(next);
        let Some(PendingSubmission { ticket, record }) = pending else {
            return;
        };

        let outcome = deliver(record).run(sink).await;
        let next = self.engine.finish_submit(&self.state, ticket, outcome);
        self.commit(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartEngine, CartEvent, CartStatus, Catalog, ProductId};
    use crate::config::PharmacyConfig;
    use crate::form::{Contact, FormEvent, FormStatus};
    use crate::wizard::{DurationBucket, Severity, WizardEngine, WizardEvent, WizardStep};

    fn cart_engine() -> CartEngine {
        CartEngine::from_config(&PharmacyConfig::default()).unwrap()
    }

    fn completed_wizard() -> Session<WizardEngine> {
        let mut session = Session::new(WizardEngine::new());
        for event in [
            WizardEvent::SelectSymptom("Cough".to_string()),
            WizardEvent::SelectSymptom("Fever".to_string()),
            WizardEvent::Next,
            WizardEvent::SetSeverity(Severity::Moderate),
            WizardEvent::Next,
            WizardEvent::SetDuration(DurationBucket::OneToThreeDays),
            WizardEvent::Next,
        ] {
            session.dispatch(event);
        }
        session
    }

    #[derive(Clone)]
    struct Accepting;

    impl SubmissionSink<crate::form::ContactRecord> for Accepting {
        fn deliver(&self, _record: &crate::form::ContactRecord) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn new_session_starts_at_initial_phase() {
        let session = Session::new(cart_engine());
        assert_eq!(session.phase(), CartStatus::Empty);
        assert!(session.history().transitions().is_empty());
    }

    #[test]
    fn rejected_event_reports_no_change() {
        let mut session = Session::new(WizardEngine::new());
        assert!(!session.dispatch(WizardEvent::Next));
        assert_eq!(session.phase(), WizardStep::Symptoms);
    }

    #[test]
    fn phase_changes_are_recorded_with_event_counts() {
        let session = completed_wizard();

        let path: Vec<WizardStep> = session.history().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![
                WizardStep::Symptoms,
                WizardStep::Severity,
                WizardStep::Duration,
                WizardStep::Results,
            ]
        );
        assert_eq!(session.history().transitions()[0].events, 3);
        assert_eq!(session.history().total_events(), 7);
    }

    #[test]
    fn edits_within_a_phase_are_not_transitions() {
        let mut session = Session::new(cart_engine());
        session.dispatch(CartEvent::Add(ProductId::from("aspirin-75")));
        session.dispatch(CartEvent::Add(ProductId::from("aspirin-75")));
        session.dispatch(CartEvent::Remove(ProductId::from("aspirin-75")));

        assert_eq!(session.history().transitions().len(), 1);
        assert_eq!(session.state().count(), 1);
    }

    #[test]
    fn checkpoint_resume_continues_where_it_left_off() {
        let session = completed_wizard();
        let bytes = session.checkpoint().to_bytes().unwrap();

        let restored = Session::resume(WizardEngine::new(), Checkpoint::from_bytes(&bytes).unwrap())
            .unwrap();

        assert_eq!(restored.state(), session.state());
        assert_eq!(restored.history(), session.history());
        assert_eq!(
            restored.state().assessment(),
            session.state().assessment()
        );
    }

    #[test]
    fn resume_rejects_history_that_disagrees_with_state() {
        let session = completed_wizard();
        let mut checkpoint = session.checkpoint();
        checkpoint.state = crate::wizard::WizardState::new();

        let result = Session::resume(WizardEngine::new(), checkpoint);
        assert!(matches!(result, Err(CheckpointError::Mismatch(_))));
    }

    #[test]
    fn resume_rejects_unknown_version() {
        let mut checkpoint = Session::new(cart_engine()).checkpoint();
        checkpoint.version += 1;

        let result = Session::resume(cart_engine(), checkpoint);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { .. })
        ));
    }

    #[tokio::test]
    async fn form_submission_passes_through_submitting() {
        let mut session = Session::new(Contact::engine().unwrap());
        for (field, value) in [
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("subject", "Hi"),
            ("message", "Hello there!"),
        ] {
            session.dispatch(FormEvent::set(field, value));
        }

        session.submit(&Accepting).await;

        let path: Vec<FormStatus> = session.history().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![FormStatus::Editing, FormStatus::Submitting, FormStatus::Submitted]
        );
        assert!(session.state().submitted());
    }

    #[tokio::test]
    async fn invalid_form_submission_stays_editing() {
        let mut session = Session::new(Contact::engine().unwrap());
        session.submit(&Accepting).await;

        assert_eq!(session.phase(), FormStatus::Editing);
        assert!(session.history().transitions().is_empty());
        assert!(!session.state().errors().is_empty());
    }

    #[test]
    fn cart_catalog_is_reachable_through_engine() {
        let session = Session::new(CartEngine::new(
            Catalog::new(PharmacyConfig::default().products).unwrap(),
        ));
        assert_eq!(session.engine().catalog().products().len(), 8);
    }
}
