//! Assertion helpers for predicate trees.

use helios_patient_search::predicate::{Field, Predicate};

use super::evaluator::{StoreBehaviour, matching_ids};
use super::fixtures::PatientRecord;

/// Asserts that exactly the given patients match, ignoring order.
pub fn assert_matches_exactly(predicate: &Predicate, patients: &[PatientRecord], expected: &[&str]) {
    let mut actual = matching_ids(predicate, patients, StoreBehaviour::default());
    actual.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(
        actual, expected,
        "Match mismatch for predicate {}",
        predicate
    );
}

/// Asserts that the predicate only restricts the listed voided flags.
pub fn assert_unrestricted(predicate: &Predicate) {
    assert!(
        predicate.is_unrestricted_except(&[
            Field::PatientVoided,
            Field::IdentifierVoided,
            Field::NameVoided,
        ]),
        "Expected an unrestricted predicate, got {}",
        predicate
    );
}

/// Asserts that the tree is a conjunction ending in the patient voided check.
pub fn assert_patient_not_voided(predicate: &Predicate) {
    assert!(
        matches!(predicate, Predicate::And(_)),
        "Expected a conjunction, got {}",
        predicate
    );
    assert_eq!(
        predicate.children().last(),
        Some(&Predicate::not_voided(Field::PatientVoided)),
        "Missing patient voided restriction in {}",
        predicate
    );
}
