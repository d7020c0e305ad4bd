//! Patient record and configuration fixtures.

use helios_patient_search::config::{InMemoryConfiguration, keys};
use helios_patient_search::types::IdentifierTypeRef;

/// Identifier type uuid used for medical record numbers.
pub const MRN_TYPE: &str = "8d79403a-c2cc-11de-8d13-0010c6dffd0f";
/// Identifier type uuid used for national ids.
pub const NATIONAL_ID_TYPE: &str = "a5d38e09-efcb-4d91-a526-50ce1ba5011a";
/// Attribute type uuid used for phone numbers.
pub const PHONE_ATTRIBUTE: &str = "14d4f066-15f5-102d-96e4-000c29c2a5d7";

/// A person name row.
#[derive(Debug, Clone, Default)]
pub struct NameRow {
    pub given: Option<String>,
    pub middle: Option<String>,
    pub family: Option<String>,
    pub family2: Option<String>,
    pub voided: bool,
}

/// A patient identifier row.
#[derive(Debug, Clone)]
pub struct IdentifierRow {
    pub value: String,
    pub type_uuid: String,
    pub voided: bool,
}

/// A person attribute row.
#[derive(Debug, Clone)]
pub struct AttributeRow {
    pub value: String,
    pub type_uuid: String,
    pub voided: bool,
}

/// A patient with its associated rows.
#[derive(Debug, Clone, Default)]
pub struct PatientRecord {
    pub id: String,
    pub names: Vec<NameRow>,
    pub identifiers: Vec<IdentifierRow>,
    pub attributes: Vec<AttributeRow>,
    pub voided: bool,
}

impl PatientRecord {
    /// Creates a patient with no rows.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Adds a given/family name.
    pub fn with_name(mut self, given: &str, family: &str) -> Self {
        self.names.push(NameRow {
            given: Some(given.to_string()),
            family: Some(family.to_string()),
            ..Default::default()
        });
        self
    }

    /// Adds a fully specified name row.
    pub fn with_name_row(mut self, row: NameRow) -> Self {
        self.names.push(row);
        self
    }

    /// Adds an identifier of the given type.
    pub fn with_identifier(mut self, value: &str, type_uuid: &str) -> Self {
        self.identifiers.push(IdentifierRow {
            value: value.to_string(),
            type_uuid: type_uuid.to_string(),
            voided: false,
        });
        self
    }

    /// Adds a voided identifier.
    pub fn with_voided_identifier(mut self, value: &str, type_uuid: &str) -> Self {
        self.identifiers.push(IdentifierRow {
            value: value.to_string(),
            type_uuid: type_uuid.to_string(),
            voided: true,
        });
        self
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, value: &str, type_uuid: &str) -> Self {
        self.attributes.push(AttributeRow {
            value: value.to_string(),
            type_uuid: type_uuid.to_string(),
            voided: false,
        });
        self
    }

    /// Marks the patient voided.
    pub fn voided(mut self) -> Self {
        self.voided = true;
        self
    }
}

/// A small registry of patients used across tests.
pub fn seed_patients() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new("john-smith")
            .with_name("John", "Smith")
            .with_identifier("1000-4", MRN_TYPE),
        PatientRecord::new("jo-doe")
            .with_name("Jo", "Doe")
            .with_identifier("00042", MRN_TYPE)
            .with_identifier("NAT-77", NATIONAL_ID_TYPE),
        PatientRecord::new("mary-ann-lee").with_name_row(NameRow {
            given: Some("Mary Ann".to_string()),
            family: Some("Lee".to_string()),
            ..Default::default()
        }),
        PatientRecord::new("johnson")
            .with_name("Emily", "Johnson")
            .with_identifier("1234", MRN_TYPE)
            .with_attribute("555-0101", PHONE_ATTRIBUTE),
        PatientRecord::new("voided-smith")
            .with_name("Jane", "Smith")
            .voided(),
        PatientRecord::new("old-id")
            .with_name("Olga", "Ivanova")
            .with_voided_identifier("9999", MRN_TYPE),
        PatientRecord::new("percent").with_name("50%", "Discount"),
    ]
}

/// Identifier type reference for the MRN fixture type.
pub fn mrn_type() -> IdentifierTypeRef {
    IdentifierTypeRef::new(MRN_TYPE).with_name("MRN")
}

/// Identifier type reference for the national id fixture type.
pub fn national_id_type() -> IdentifierTypeRef {
    IdentifierTypeRef::new(NATIONAL_ID_TYPE).with_name("National ID")
}

/// Default configuration.
pub fn default_config() -> InMemoryConfiguration {
    InMemoryConfiguration::new()
}

/// Configuration with an identifier regex template.
pub fn regex_config(regex: &str) -> InMemoryConfiguration {
    InMemoryConfiguration::new().with_property(keys::IDENTIFIER_REGEX, regex)
}

/// Configuration with an identifier search pattern list.
pub fn pattern_config(patterns: &str) -> InMemoryConfiguration {
    InMemoryConfiguration::new().with_property(keys::IDENTIFIER_SEARCH_PATTERN, patterns)
}
