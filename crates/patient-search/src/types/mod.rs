//! Input types for patient search.
//!
//! - [`PatientSearchQuery`] - the request, with a builder
//! - [`IdentifierTypeRef`] - an identifier type filter entry
//! - [`SearchMode`] - the strategy chosen for a request
//!
//! # Example
//!
//! ```
//! use helios_patient_search::types::{PatientSearchQuery, SearchMode};
//!
//! let query = PatientSearchQuery::new().with_name("john");
//! assert_eq!(query.search_mode(), SearchMode::ByName);
//!
//! let query = query.with_identifier("1000").search_names_or_identifiers(true);
//! assert_eq!(query.search_mode(), SearchMode::ByNameOrIdentifier);
//! ```

mod query;

pub use query::{
    IdentifierTypeRef, PatientSearchQuery, SearchMode, copy_search_parameter, is_blank,
};
