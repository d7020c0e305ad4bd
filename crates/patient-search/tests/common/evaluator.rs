//! In-memory predicate executor.
//!
//! Mirrors a relational store that inner-joins names and left-joins
//! identifiers and attributes: a patient matches when some combination of
//! its rows satisfies the predicate. Missing rows compare as NULL.

use regex::{Regex, RegexBuilder};

use helios_patient_search::predicate::{Field, Predicate, Value};

use super::fixtures::{AttributeRow, IdentifierRow, NameRow, PatientRecord};

/// Store behaviour for the evaluator.
#[derive(Debug, Clone, Copy)]
pub struct StoreBehaviour {
    /// Plain comparisons ignore case (typical default collation).
    pub case_insensitive_collation: bool,
}

impl Default for StoreBehaviour {
    fn default() -> Self {
        Self {
            case_insensitive_collation: true,
        }
    }
}

struct Row<'a> {
    patient: &'a PatientRecord,
    name: Option<&'a NameRow>,
    identifier: Option<&'a IdentifierRow>,
    attribute: Option<&'a AttributeRow>,
}

/// Returns the ids of patients matching `predicate`, in input order.
pub fn matching_ids(
    predicate: &Predicate,
    patients: &[PatientRecord],
    store: StoreBehaviour,
) -> Vec<String> {
    patients
        .iter()
        .filter(|p| matches_patient(predicate, p, store))
        .map(|p| p.id.clone())
        .collect()
}

/// Returns true if some row combination of `patient` satisfies `predicate`.
pub fn matches_patient(predicate: &Predicate, patient: &PatientRecord, store: StoreBehaviour) -> bool {
    // Names are inner-joined: a patient without names never matches.
    let names: Vec<Option<&NameRow>> = patient.names.iter().map(Some).collect();
    let identifiers: Vec<Option<&IdentifierRow>> = if patient.identifiers.is_empty() {
        vec![None]
    } else {
        patient.identifiers.iter().map(Some).collect()
    };
    let attributes: Vec<Option<&AttributeRow>> = if patient.attributes.is_empty() {
        vec![None]
    } else {
        patient.attributes.iter().map(Some).collect()
    };

    names.iter().any(|name| {
        identifiers.iter().any(|identifier| {
            attributes.iter().any(|attribute| {
                let row = Row {
                    patient,
                    name: *name,
                    identifier: *identifier,
                    attribute: *attribute,
                };
                eval(predicate, &row, store)
            })
        })
    })
}

fn eval(predicate: &Predicate, row: &Row<'_>, store: StoreBehaviour) -> bool {
    match predicate {
        Predicate::And(children) => children.iter().all(|c| eval(c, row, store)),
        Predicate::Or(children) => children.iter().any(|c| eval(c, row, store)),
        Predicate::Eq {
            field,
            value,
            ignore_case,
        } => match (lookup(*field, row), value) {
            (Some(Value::Text(actual)), Value::Text(expected)) => {
                if *ignore_case || store.case_insensitive_collation {
                    actual.to_lowercase() == expected.to_lowercase()
                } else {
                    actual == *expected
                }
            }
            (Some(actual), expected) => actual == *expected,
            (None, _) => false,
        },
        Predicate::Like {
            field,
            value,
            mode,
            ignore_case,
        } => match lookup(*field, row) {
            Some(Value::Text(actual)) => {
                let insensitive = *ignore_case || store.case_insensitive_collation;
                like_regex(&mode.to_pattern(value), insensitive).is_match(&actual)
            }
            _ => false,
        },
        Predicate::In { field, values } => match lookup(*field, row) {
            Some(actual) => values.contains(&actual),
            None => false,
        },
        Predicate::RawPattern { field, pattern } => match lookup(*field, row) {
            Some(Value::Text(actual)) => Regex::new(pattern)
                .map(|re| re.is_match(&actual))
                .unwrap_or(false),
            _ => false,
        },
    }
}

fn lookup(field: Field, row: &Row<'_>) -> Option<Value> {
    let text = |s: &Option<String>| s.clone().map(Value::Text);
    match field {
        Field::GivenName => row.name.and_then(|n| text(&n.given)),
        Field::MiddleName => row.name.and_then(|n| text(&n.middle)),
        Field::FamilyName => row.name.and_then(|n| text(&n.family)),
        Field::FamilyName2 => row.name.and_then(|n| text(&n.family2)),
        Field::NameVoided => row.name.map(|n| Value::Bool(n.voided)),
        Field::IdentifierValue => row.identifier.map(|i| Value::Text(i.value.clone())),
        Field::IdentifierType => row.identifier.map(|i| Value::Text(i.type_uuid.clone())),
        Field::IdentifierVoided => row.identifier.map(|i| Value::Bool(i.voided)),
        Field::PatientVoided => Some(Value::Bool(row.patient.voided)),
        Field::AttributeValue => row.attribute.map(|a| Value::Text(a.value.clone())),
        Field::AttributeType => row.attribute.map(|a| Value::Text(a.type_uuid.clone())),
        Field::AttributeVoided => row.attribute.map(|a| Value::Bool(a.voided)),
    }
}

/// Compiles a LIKE pattern using `\` as the escape character.
fn like_regex(pattern: &str, case_insensitive: bool) -> Regex {
    let mut source = String::from("^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    source.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(case_insensitive)
        .dot_matches_new_line(true)
        .build()
        .expect("LIKE pattern compiles")
}
