//! Patient search predicate builders.
//!
//! - [`tokenizer`] - splits free text into words
//! - [`name`] - name restrictions with the short/long name policy
//! - [`identifier`] - identifier restrictions driven by templates
//! - [`attribute`] - person attribute restrictions for free-text search
//! - [`criteria`] - classification and composition of the above
//!
//! # Example
//!
//! ```
//! use helios_patient_search::config::InMemoryConfiguration;
//! use helios_patient_search::search::PatientSearchCriteria;
//! use helios_patient_search::types::PatientSearchQuery;
//!
//! let config = InMemoryConfiguration::new();
//! let criteria = PatientSearchCriteria::new(&config);
//!
//! let predicate = criteria
//!     .prepare(&PatientSearchQuery::new().with_name("jo"))
//!     .unwrap();
//!
//! assert!(predicate.to_string().contains("lower(name.givenName) = lower('jo')"));
//! ```

pub mod attribute;
pub mod criteria;
pub mod identifier;
pub mod name;
pub mod tokenizer;

pub use attribute::{AttributeCriteria, SearchableAttributes, attribute_predicate};
pub use criteria::PatientSearchCriteria;
pub use identifier::{IdentifierCriteria, replace_search_string};
pub use name::NameCriteria;
pub use tokenizer::query_parts;
