//! Property-based tests for the engines.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use careflow::cart::{CartEngine, CartState, CartStatus, Catalog, ProductId};
use careflow::checkpoint::Checkpoint;
use careflow::config::PharmacyConfig;
use careflow::core::{Guard, Reducer, State, StateHistory, StateTransition};
use careflow::form::{Contact, FormEngine};
use careflow::schema::{FieldBuilder, FieldValues, Rule, SchemaBuilder, ValidationContext};
use careflow::wizard::{
    assess, DurationBucket, Severity, WizardEngine, WizardEvent, WizardState, WizardStep,
    COMMON_SYMPTOMS, MAX_FINDINGS,
};
use chrono::{Days, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

fn catalog_ids() -> Vec<ProductId> {
    PharmacyConfig::default()
        .products
        .into_iter()
        .map(|p| p.id)
        .collect()
}

fn cart_engine() -> CartEngine {
    CartEngine::new(Catalog::new(PharmacyConfig::default().products).unwrap())
}

prop_compose! {
    fn arbitrary_step()(variant in 0..4usize) -> WizardStep {
        WizardStep::ALL[variant]
    }
}

fn arbitrary_symptom() -> impl Strategy<Value = String> {
    prop::sample::select(COMMON_SYMPTOMS.to_vec()).prop_map(String::from)
}

fn arbitrary_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn arbitrary_duration() -> impl Strategy<Value = DurationBucket> {
    prop::sample::select(DurationBucket::ALL.to_vec())
}

fn arbitrary_wizard_event() -> impl Strategy<Value = WizardEvent> {
    prop_oneof![
        arbitrary_symptom().prop_map(WizardEvent::SelectSymptom),
        arbitrary_symptom().prop_map(WizardEvent::DeselectSymptom),
        arbitrary_symptom().prop_map(WizardEvent::ToggleSymptom),
        arbitrary_severity().prop_map(WizardEvent::SetSeverity),
        arbitrary_duration().prop_map(WizardEvent::SetDuration),
        Just(WizardEvent::Next),
        Just(WizardEvent::Next),
        Just(WizardEvent::Back),
        Just(WizardEvent::Reset),
    ]
}

fn arbitrary_cart() -> impl Strategy<Value = CartState> {
    prop::collection::vec(prop::sample::select(catalog_ids()), 0..12).prop_map(|ids| {
        let engine = cart_engine();
        ids.iter()
            .fold(CartState::new(), |cart, id| engine.add(&cart, id))
    })
}

proptest! {
    #[test]
    fn guard_is_deterministic(step in arbitrary_step()) {
        let guard = Guard::new(|s: &WizardStep| !s.is_final());
        prop_assert_eq!(guard.check(&step), guard.check(&step));
    }

    #[test]
    fn next_advances_iff_gate_holds(events in prop::collection::vec(arbitrary_wizard_event(), 0..30)) {
        let engine = WizardEngine::new();
        let mut state = WizardState::new();

        for event in events {
            let gate = engine.can_advance(&state);
            let after_next = engine.advance(&state, WizardEvent::Next);
            prop_assert_eq!(after_next.step() != state.step(), gate);
            if gate {
                prop_assert_eq!(after_next.step().number(), state.step().number() + 1);
            }

            state = engine.advance(&state, event);
        }
    }

    #[test]
    fn steps_move_one_at_a_time(events in prop::collection::vec(arbitrary_wizard_event(), 0..30)) {
        let engine = WizardEngine::new();
        let mut state = WizardState::new();

        for event in events {
            let reset = event == WizardEvent::Reset;
            let next = engine.advance(&state, event);
            let before = i16::from(state.step().number());
            let after = i16::from(next.step().number());
            prop_assert!(reset || (after - before).abs() <= 1);
            state = next;
        }
    }

    #[test]
    fn toggles_track_a_set(names in prop::collection::vec(arbitrary_symptom(), 0..40)) {
        let engine = WizardEngine::new();
        let mut state = WizardState::new();
        let mut expected = BTreeSet::new();

        for name in names {
            if !expected.remove(&name) {
                expected.insert(name.clone());
            }
            state = engine.advance(&state, WizardEvent::ToggleSymptom(name));
        }

        prop_assert_eq!(state.selected_symptoms(), &expected);
    }

    #[test]
    fn assessment_is_deterministic(
        symptoms in prop::collection::btree_set(arbitrary_symptom(), 1..6),
        severity in arbitrary_severity(),
        duration in arbitrary_duration(),
    ) {
        let first = assess(&symptoms, severity, duration);
        let second = assess(&symptoms, severity, duration);

        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        prop_assert!(!first.findings.is_empty());
        prop_assert!(first.findings.len() <= MAX_FINDINGS);

        let names: BTreeSet<&str> = first.findings.iter().map(|f| f.condition.as_str()).collect();
        prop_assert_eq!(names.len(), first.findings.len());
    }

    #[test]
    fn editing_a_field_clears_exactly_its_error(
        field_index in 0..5usize,
        value in ".{0,20}",
    ) {
        let engine: FormEngine<Contact> = Contact::engine().unwrap();
        let checked = engine.check(&engine.initial());
        let field = ["name", "email", "phone", "subject", "message"][field_index];

        let edited = engine.set_field(&checked, field, &value);

        prop_assert_eq!(edited.error(field), None);
        for (other, message) in checked.errors() {
            if other != field {
                prop_assert_eq!(edited.error(other), Some(message.as_str()));
            }
        }
    }

    #[test]
    fn add_then_remove_restores_cart(cart in arbitrary_cart(), id in prop::sample::select(catalog_ids())) {
        let engine = cart_engine();
        prop_assert_eq!(engine.remove(&engine.add(&cart, &id), &id), cart);
    }

    #[test]
    fn totals_are_derived_from_lines(cart in arbitrary_cart()) {
        let total: Decimal = cart
            .items()
            .values()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();
        let count: u32 = cart.items().values().map(|line| line.quantity).sum();

        prop_assert_eq!(cart.total(), total);
        prop_assert_eq!(cart.count(), count);
        prop_assert!(cart.items().values().all(|line| line.quantity >= 1));
    }

    #[test]
    fn repeated_adds_scale_total(times in 1..20u32) {
        let engine = cart_engine();
        let id = ProductId::from("paracetamol-500");
        let cart = (0..times).fold(CartState::new(), |cart, _| engine.add(&cart, &id));

        prop_assert_eq!(cart.count(), times);
        prop_assert_eq!(cart.total(), Decimal::new(599, 2) * Decimal::from(times));
    }

    #[test]
    fn out_of_stock_add_never_changes_cart(cart in arbitrary_cart()) {
        let engine = cart_engine();
        prop_assert_eq!(engine.add(&cart, &ProductId::from("metformin-500")), cart);
    }

    #[test]
    fn dates_before_today_are_rejected(offset in -1000i64..1000) {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let date = if offset < 0 {
            today.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap()
        } else {
            today.checked_add_days(Days::new(offset.unsigned_abs())).unwrap()
        };

        let schema = SchemaBuilder::new()
            .field(FieldBuilder::new("date").rule(Rule::not_before_today("Date cannot be in the past")))
            .and_then(|b| b.build())
            .unwrap();
        let mut values = FieldValues::new();
        values.insert("date".to_string(), date.format("%Y-%m-%d").to_string());

        let accepted = schema.errors(&values, &ValidationContext::on(today)).is_empty();
        prop_assert_eq!(accepted, offset >= 0);
    }

    #[test]
    fn history_preserves_order(steps in prop::collection::vec(arbitrary_step(), 1..10)) {
        let mut history = StateHistory::new();
        let mut expected_path = vec![WizardStep::Symptoms];

        for (i, to) in steps.iter().enumerate() {
            let from = if i == 0 { WizardStep::Symptoms } else { steps[i - 1] };
            history = history.record(StateTransition {
                from,
                to: *to,
                timestamp: Utc::now(),
                events: 1,
            });
            expected_path.push(*to);
        }

        let path: Vec<WizardStep> = history.get_path().into_iter().copied().collect();
        prop_assert_eq!(path, expected_path);
        prop_assert_eq!(history.total_events(), steps.len());
    }

    #[test]
    fn history_record_is_pure(from in arbitrary_step(), to in arbitrary_step()) {
        let history = StateHistory::new();

        let new_history = history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            events: 1,
        });

        // Original history unchanged
        prop_assert_eq!(history.transitions().len(), 0);
        prop_assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn cart_checkpoint_survives_both_encodings(cart in arbitrary_cart()) {
        let engine = cart_engine();
        let phase = engine.phase(&cart);
        let checkpoint: Checkpoint<CartState, CartStatus> =
            Checkpoint::new(cart, StateHistory::new(), 0);

        let from_json = Checkpoint::from_json(&checkpoint.to_json().unwrap()).unwrap();
        let from_bytes = Checkpoint::from_bytes(&checkpoint.to_bytes().unwrap()).unwrap();

        prop_assert_eq!(&from_json, &checkpoint);
        prop_assert_eq!(&from_bytes, &checkpoint);
        prop_assert_eq!(engine.phase(&from_json.state), phase);
    }
}
