//! Result derivation for the symptom checker.
//!
//! A fixed table of reference conditions is ranked against the reported
//! symptoms, severity and duration. There is no learning and no randomness:
//! the same inputs always produce the same findings in the same order.
//!
//! Scoring, per condition sharing at least one symptom:
//! - coverage: share of the reported symptoms the condition explains (0-100)
//! - specificity: share of the condition's symptoms that were reported (0-100)
//! - severity fit: 20 for an exact match, 10 one level off, 0 otherwise
//! - duration fit: 15 when the duration is typical for the condition
//!
//! Findings are ordered by score, ties broken by condition name.

use super::state::{DurationBucket, Severity};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Symptoms offered as one-click choices.
pub const COMMON_SYMPTOMS: [&str; 16] = [
    "Headache",
    "Fever",
    "Cough",
    "Fatigue",
    "Chest Pain",
    "Shortness of Breath",
    "Nausea",
    "Dizziness",
    "Back Pain",
    "Sore Throat",
    "Runny Nose",
    "Joint Pain",
    "Stomach Ache",
    "Muscle Pain",
    "Skin Rash",
    "Insomnia",
];

/// Most findings reported for one assessment.
pub const MAX_FINDINGS: usize = 3;

const HIGH_SCORE: u32 = 150;
const MEDIUM_SCORE: u32 = 100;

const RED_FLAGS: [&str; 2] = ["Chest Pain", "Shortness of Breath"];

/// Qualitative likelihood band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Probability {
    High,
    Medium,
    Low,
}

impl Probability {
    fn from_score(score: u32) -> Self {
        if score >= HIGH_SCORE {
            Self::High
        } else if score >= MEDIUM_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// One candidate condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub condition: String,
    pub probability: Probability,
    pub severity: Severity,
    pub recommendation: String,
}

/// Ranked findings plus an urgent-care flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub findings: Vec<Finding>,
    /// Severe chest pain or shortness of breath; direct the user to
    /// emergency services instead of a regular booking.
    pub seek_emergency_care: bool,
}

struct Condition {
    name: &'static str,
    symptoms: &'static [&'static str],
    severity: Severity,
    typical: &'static [DurationBucket],
    recommendation: &'static str,
}

use super::state::DurationBucket::{OneToThreeDays, OverAWeek, ThreeToSevenDays, UnderADay};

const CONDITIONS: &[Condition] = &[
    Condition {
        name: "Common Cold",
        symptoms: &["Cough", "Runny Nose", "Sore Throat", "Fever", "Fatigue", "Headache"],
        severity: Severity::Mild,
        typical: &[UnderADay, OneToThreeDays, ThreeToSevenDays],
        recommendation: "Rest, hydration, and over-the-counter medication. Consult a doctor if symptoms persist beyond 7 days.",
    },
    Condition {
        name: "Influenza",
        symptoms: &["Fever", "Fatigue", "Muscle Pain", "Headache", "Cough", "Sore Throat"],
        severity: Severity::Moderate,
        typical: &[OneToThreeDays, ThreeToSevenDays],
        recommendation: "Rest and fluids. Antiviral treatment works best early, so book a consultation within 48 hours of onset.",
    },
    Condition {
        name: "Seasonal Allergies",
        symptoms: &["Runny Nose", "Sore Throat", "Skin Rash", "Cough", "Headache"],
        severity: Severity::Mild,
        typical: &[ThreeToSevenDays, OverAWeek],
        recommendation: "Antihistamines may help. Avoid known allergens. Consider allergy testing.",
    },
    Condition {
        name: "Migraine",
        symptoms: &["Headache", "Nausea", "Dizziness", "Insomnia"],
        severity: Severity::Moderate,
        typical: &[UnderADay, OneToThreeDays],
        recommendation: "Rest in a dark, quiet room. Track triggers and speak with a neurologist if episodes recur.",
    },
    Condition {
        name: "Gastroenteritis",
        symptoms: &["Nausea", "Stomach Ache", "Fever", "Fatigue"],
        severity: Severity::Moderate,
        typical: &[UnderADay, OneToThreeDays],
        recommendation: "Stay hydrated with oral rehydration fluids. See a doctor if you cannot keep fluids down.",
    },
    Condition {
        name: "Musculoskeletal Strain",
        symptoms: &["Back Pain", "Muscle Pain", "Joint Pain"],
        severity: Severity::Mild,
        typical: &[OneToThreeDays, ThreeToSevenDays],
        recommendation: "Rest the affected area, apply ice or heat, and use anti-inflammatory pain relief.",
    },
    Condition {
        name: "Arthritis Flare",
        symptoms: &["Joint Pain", "Muscle Pain", "Fatigue"],
        severity: Severity::Moderate,
        typical: &[ThreeToSevenDays, OverAWeek],
        recommendation: "Gentle movement and anti-inflammatory medication. Book an orthopedic review for persistent pain.",
    },
    Condition {
        name: "Stress-related",
        symptoms: &["Headache", "Insomnia", "Fatigue", "Stomach Ache", "Dizziness"],
        severity: Severity::Moderate,
        typical: &[ThreeToSevenDays, OverAWeek],
        recommendation: "Practice relaxation techniques. Consider consulting with a healthcare provider for persistent symptoms.",
    },
    Condition {
        name: "Respiratory Infection",
        symptoms: &["Cough", "Shortness of Breath", "Fever", "Chest Pain", "Fatigue"],
        severity: Severity::Moderate,
        typical: &[OneToThreeDays, ThreeToSevenDays],
        recommendation: "Book a consultation for a chest examination. Seek urgent care if breathing worsens.",
    },
    Condition {
        name: "Cardiac Concern",
        symptoms: &["Chest Pain", "Shortness of Breath", "Dizziness", "Fatigue", "Nausea"],
        severity: Severity::Severe,
        typical: &[UnderADay, OneToThreeDays],
        recommendation: "Seek immediate medical attention. Call emergency services if pain spreads to the arm, jaw or back.",
    },
    Condition {
        name: "Dermatitis",
        symptoms: &["Skin Rash"],
        severity: Severity::Mild,
        typical: &[OneToThreeDays, ThreeToSevenDays, OverAWeek],
        recommendation: "Keep the skin moisturised and avoid irritants. A dermatologist can advise on topical treatment.",
    },
];

/// Findings reported when no reference condition shares a symptom.
fn generic_findings() -> Vec<Finding> {
    let finding = |condition: &str, probability, severity, recommendation: &str| Finding {
        condition: condition.to_string(),
        probability,
        severity,
        recommendation: recommendation.to_string(),
    };

    vec![
        finding(
            "Common Cold",
            Probability::High,
            Severity::Mild,
            "Rest, hydration, and over-the-counter medication. Consult a doctor if symptoms persist beyond 7 days.",
        ),
        finding(
            "Seasonal Allergies",
            Probability::Medium,
            Severity::Mild,
            "Antihistamines may help. Avoid known allergens. Consider allergy testing.",
        ),
        finding(
            "Stress-related",
            Probability::Low,
            Severity::Moderate,
            "Practice relaxation techniques. Consider consulting with a healthcare provider for persistent symptoms.",
        ),
    ]
}

fn score(
    condition: &Condition,
    symptoms: &BTreeSet<String>,
    severity: Severity,
    duration: DurationBucket,
) -> Option<u32> {
    let matched = condition
        .symptoms
        .iter()
        .filter(|symptom| symptoms.contains(**symptom))
        .count() as u32;
    if matched == 0 {
        return None;
    }

    let coverage = matched * 100 / symptoms.len() as u32;
    let specificity = matched * 100 / condition.symptoms.len() as u32;
    let severity_fit = match severity.rank().abs_diff(condition.severity.rank()) {
        0 => 20,
        1 => 10,
        _ => 0,
    };
    let duration_fit = if condition.typical.contains(&duration) {
        15
    } else {
        0
    };

    Some(coverage + specificity + severity_fit + duration_fit)
}

/// Rank reference conditions against the reported data.
pub fn assess(
    symptoms: &BTreeSet<String>,
    severity: Severity,
    duration: DurationBucket,
) -> Assessment {
    let mut ranked: Vec<(u32, &Condition)> = CONDITIONS
        .iter()
        .filter_map(|condition| {
            score(condition, symptoms, severity, duration).map(|score| (score, condition))
        })
        .collect();
    ranked.sort_by_key(|(score, condition)| (Reverse(*score), condition.name));

    let findings = if ranked.is_empty() {
        generic_findings()
    } else {
        ranked
            .into_iter()
            .take(MAX_FINDINGS)
            .map(|(score, condition)| Finding {
                condition: condition.name.to_string(),
                probability: Probability::from_score(score),
                severity: condition.severity,
                recommendation: condition.recommendation.to_string(),
            })
            .collect()
    };

    let seek_emergency_care = severity == Severity::Severe
        && RED_FLAGS.iter().any(|flag| symptoms.contains(*flag));

    Assessment {
        findings,
        seek_emergency_care,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn conditions(assessment: &Assessment) -> Vec<(&str, Probability)> {
        assessment
            .findings
            .iter()
            .map(|f| (f.condition.as_str(), f.probability))
            .collect()
    }

    #[test]
    fn musculoskeletal_symptoms_rank_strain_first() {
        let assessment = assess(
            &symptoms(&["Back Pain", "Joint Pain", "Muscle Pain"]),
            Severity::Mild,
            DurationBucket::OverAWeek,
        );

        assert_eq!(
            conditions(&assessment),
            vec![
                ("Musculoskeletal Strain", Probability::High),
                ("Arthritis Flare", Probability::High),
                ("Influenza", Probability::Low),
            ]
        );
        assert!(!assessment.seek_emergency_care);
    }

    #[test]
    fn severe_chest_pain_flags_emergency() {
        let assessment = assess(
            &symptoms(&["Chest Pain", "Shortness of Breath"]),
            Severity::Severe,
            DurationBucket::UnderADay,
        );

        assert_eq!(
            conditions(&assessment),
            vec![
                ("Cardiac Concern", Probability::High),
                ("Respiratory Infection", Probability::High),
            ]
        );
        assert_eq!(assessment.findings[0].severity, Severity::Severe);
        assert!(assessment.seek_emergency_care);
    }

    #[test]
    fn moderate_chest_pain_is_not_an_emergency() {
        let assessment = assess(
            &symptoms(&["Chest Pain"]),
            Severity::Moderate,
            DurationBucket::OneToThreeDays,
        );
        assert!(!assessment.seek_emergency_care);
    }

    #[test]
    fn unmatched_symptoms_fall_back_to_generic_findings() {
        let assessment = assess(
            &symptoms(&["Hiccups"]),
            Severity::Mild,
            DurationBucket::UnderADay,
        );

        assert_eq!(assessment.findings, generic_findings());
        assert_eq!(
            conditions(&assessment),
            vec![
                ("Common Cold", Probability::High),
                ("Seasonal Allergies", Probability::Medium),
                ("Stress-related", Probability::Low),
            ]
        );
    }

    #[test]
    fn findings_are_capped() {
        let assessment = assess(
            &symptoms(&["Headache", "Fever", "Cough", "Fatigue"]),
            Severity::Moderate,
            DurationBucket::OneToThreeDays,
        );
        assert_eq!(assessment.findings.len(), MAX_FINDINGS);
    }

    #[test]
    fn derivation_is_deterministic() {
        let input = symptoms(&["Headache", "Nausea", "Dizziness"]);
        let first = assess(&input, Severity::Moderate, DurationBucket::UnderADay);
        let second = assess(&input, Severity::Moderate, DurationBucket::UnderADay);

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn reference_data_uses_offered_symptoms() {
        for condition in CONDITIONS {
            for symptom in condition.symptoms {
                assert!(
                    COMMON_SYMPTOMS.contains(symptom),
                    "{} lists unknown symptom {}",
                    condition.name,
                    symptom
                );
            }
        }
    }
}
