//! Predicate tree handed to the persistence layer.
//!
//! A [`Predicate`] is a pure, storage-agnostic description of which patients
//! match a search. Field references are logical ([`Field`]) and must be mapped
//! to physical columns by whoever executes the tree.
//!
//! Trees are assembled bottom-up from owned children and never mutated after
//! a builder returns them.
//!
//! # Example
//!
//! ```
//! use helios_patient_search::predicate::{Field, MatchMode, Predicate};
//!
//! let tree = Predicate::and([
//!     Predicate::not_voided(Field::NameVoided),
//!     Predicate::like(Field::FamilyName, "smi", MatchMode::Start),
//! ]);
//!
//! assert_eq!(tree.to_string(), "(name.voided = false and name.familyName like 'smi%')");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical fields a predicate may restrict.
// Variants are self-documenting via their serde paths
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "name.givenName")]
    GivenName,
    #[serde(rename = "name.middleName")]
    MiddleName,
    #[serde(rename = "name.familyName")]
    FamilyName,
    #[serde(rename = "name.familyName2")]
    FamilyName2,
    #[serde(rename = "name.voided")]
    NameVoided,
    #[serde(rename = "identifier.identifier")]
    IdentifierValue,
    #[serde(rename = "identifier.identifierType")]
    IdentifierType,
    #[serde(rename = "identifier.voided")]
    IdentifierVoided,
    #[serde(rename = "voided")]
    PatientVoided,
    #[serde(rename = "attribute.value")]
    AttributeValue,
    #[serde(rename = "attribute.attributeType")]
    AttributeType,
    #[serde(rename = "attribute.voided")]
    AttributeVoided,
}

impl Field {
    /// The person-name fields a name token is compared against, in match order.
    pub const NAME_PARTS: [Field; 4] = [
        Field::GivenName,
        Field::MiddleName,
        Field::FamilyName,
        Field::FamilyName2,
    ];

    /// Returns the dotted logical path of this field.
    pub fn path(&self) -> &'static str {
        match self {
            Field::GivenName => "name.givenName",
            Field::MiddleName => "name.middleName",
            Field::FamilyName => "name.familyName",
            Field::FamilyName2 => "name.familyName2",
            Field::NameVoided => "name.voided",
            Field::IdentifierValue => "identifier.identifier",
            Field::IdentifierType => "identifier.identifierType",
            Field::IdentifierVoided => "identifier.voided",
            Field::PatientVoided => "voided",
            Field::AttributeValue => "attribute.value",
            Field::AttributeType => "attribute.attributeType",
            Field::AttributeVoided => "attribute.voided",
        }
    }

    /// Returns true if the field lives on the person name association.
    pub fn is_name_field(&self) -> bool {
        matches!(
            self,
            Field::GivenName
                | Field::MiddleName
                | Field::FamilyName
                | Field::FamilyName2
                | Field::NameVoided
        )
    }

    /// Returns true if the field lives on the identifier association.
    pub fn is_identifier_field(&self) -> bool {
        matches!(
            self,
            Field::IdentifierValue | Field::IdentifierType | Field::IdentifierVoided
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A literal compared against a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A string.
    Text(String),
}

impl Value {
    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// How a LIKE comparison anchors its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The text is the whole pattern.
    Exact,
    /// The field starts with the text.
    #[default]
    Start,
    /// The field ends with the text.
    End,
    /// The text occurs anywhere in the field.
    Anywhere,
}

impl MatchMode {
    /// Decorates `text` with `%` wildcards for this mode.
    pub fn to_pattern(&self, text: &str) -> String {
        match self {
            MatchMode::Exact => text.to_string(),
            MatchMode::Start => format!("{}%", text),
            MatchMode::End => format!("%{}", text),
            MatchMode::Anywhere => format!("%{}%", text),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Start => write!(f, "start"),
            MatchMode::End => write!(f, "end"),
            MatchMode::Anywhere => write!(f, "anywhere"),
        }
    }
}

/// A boolean restriction over patient fields.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// All children must hold. An empty conjunction is always true.
    And(Vec<Predicate>),
    /// At least one child must hold. An empty disjunction is always false.
    Or(Vec<Predicate>),
    /// Equality, optionally ignoring case.
    Eq {
        field: Field,
        value: Value,
        ignore_case: bool,
    },
    /// Wildcard match; `value` is undecorated and `mode` says where `%` goes.
    Like {
        field: Field,
        value: String,
        mode: MatchMode,
        ignore_case: bool,
    },
    /// Membership in a value set.
    In { field: Field, values: Vec<Value> },
    /// Store-native regular expression restriction.
    RawPattern { field: Field, pattern: String },
}

impl Predicate {
    /// Creates a conjunction.
    pub fn and(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And(children.into_iter().collect())
    }

    /// Creates a disjunction.
    pub fn or(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Or(children.into_iter().collect())
    }

    /// The empty conjunction: matches everything.
    pub fn always() -> Self {
        Predicate::And(Vec::new())
    }

    /// Case-sensitive equality.
    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field,
            value: value.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive equality.
    pub fn eq_ignore_case(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field,
            value: value.into(),
            ignore_case: true,
        }
    }

    /// Wildcard match using the store's default collation.
    pub fn like(field: Field, value: impl Into<String>, mode: MatchMode) -> Self {
        Predicate::Like {
            field,
            value: value.into(),
            mode,
            ignore_case: false,
        }
    }

    /// Case-insensitive wildcard match.
    pub fn ilike(field: Field, value: impl Into<String>, mode: MatchMode) -> Self {
        Predicate::Like {
            field,
            value: value.into(),
            mode,
            ignore_case: true,
        }
    }

    /// Membership restriction.
    pub fn in_values<V: Into<Value>>(field: Field, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Store-native regex restriction.
    pub fn raw_pattern(field: Field, pattern: impl Into<String>) -> Self {
        Predicate::RawPattern {
            field,
            pattern: pattern.into(),
        }
    }

    /// `field = false`, for the voided flags.
    pub fn not_voided(field: Field) -> Self {
        Predicate::eq(field, false)
    }

    /// Returns true for `And([])`.
    pub fn is_empty_conjunction(&self) -> bool {
        matches!(self, Predicate::And(children) if children.is_empty())
    }

    /// Returns the children of a conjunction or disjunction.
    pub fn children(&self) -> &[Predicate] {
        match self {
            Predicate::And(children) | Predicate::Or(children) => children,
            _ => &[],
        }
    }

    /// Returns true if the tree places no restriction besides the given voided flags.
    ///
    /// Empty conjunctions and `flag = false` leaves on the listed fields are
    /// treated as neutral. Used to recognise "blank search" trees.
    pub fn is_unrestricted_except(&self, voided_flags: &[Field]) -> bool {
        match self {
            Predicate::And(children) => children
                .iter()
                .all(|c| c.is_unrestricted_except(voided_flags)),
            Predicate::Or(children) => children
                .iter()
                .any(|c| c.is_unrestricted_except(voided_flags)),
            Predicate::Eq {
                field,
                value: Value::Bool(false),
                ..
            } => voided_flags.contains(field),
            _ => false,
        }
    }

    /// Collects every field referenced anywhere in the tree.
    ///
    /// Lets the executor decide which associations need to be joined.
    pub fn referenced_fields(&self) -> BTreeSet<Field> {
        let mut fields = BTreeSet::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields(&self, out: &mut BTreeSet<Field>) {
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.collect_fields(out);
                }
            }
            Predicate::Eq { field, .. }
            | Predicate::Like { field, .. }
            | Predicate::In { field, .. }
            | Predicate::RawPattern { field, .. } => {
                out.insert(*field);
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::And(children) => write_junction(f, children, "and", "true"),
            Predicate::Or(children) => write_junction(f, children, "or", "false"),
            Predicate::Eq {
                field,
                value,
                ignore_case,
            } => {
                if *ignore_case {
                    write!(f, "lower({}) = lower({})", field, value)
                } else {
                    write!(f, "{} = {}", field, value)
                }
            }
            Predicate::Like {
                field,
                value,
                mode,
                ignore_case,
            } => {
                let op = if *ignore_case { "ilike" } else { "like" };
                let pattern = Value::Text(mode.to_pattern(value));
                write!(f, "{} {} {}", field, op, pattern)
            }
            Predicate::In { field, values } => {
                write!(f, "{} in (", field)?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
            Predicate::RawPattern { field, pattern } => {
                write!(f, "{} regexp {}", field, Value::Text(pattern.clone()))
            }
        }
    }
}

fn write_junction(
    f: &mut fmt::Formatter<'_>,
    children: &[Predicate],
    op: &str,
    empty: &str,
) -> fmt::Result {
    match children {
        [] => write!(f, "{}", empty),
        [only] => write!(f, "{}", only),
        _ => {
            write!(f, "(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op)?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")
        }
    }
}
