//! Helios FHIR Server Patient Search
//!
//! This crate turns patient search requests (a name, an identifier, a set of
//! identifier types, or one free-text query) into a storage-agnostic
//! [`Predicate`](predicate::Predicate) tree that the persistence layer executes.
//!
//! # Features
//!
//! - **Search modes**: name, identifier, name-and-identifier, name-or-identifier
//! - **Name matching**: multi-word queries, exact matching for short names,
//!   prefix or substring matching for longer ones
//! - **Identifier matching**: exact, template list, store-native regex with
//!   padding removal and check digits, or decorated wildcard fallback
//! - **Live configuration**: settings are read from a
//!   [`ConfigurationProvider`](config::ConfigurationProvider) on every build
//!
//! # Architecture
//!
//! - [`types`] - Search request and search mode
//! - [`predicate`] - The predicate tree handed to the persistence layer
//! - [`config`] - Configuration provider, policies and store dialect
//! - [`search`] - Tokenizer and predicate builders
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```
//! use helios_patient_search::config::{InMemoryConfiguration, keys};
//! use helios_patient_search::search::PatientSearchCriteria;
//! use helios_patient_search::types::PatientSearchQuery;
//!
//! let config = InMemoryConfiguration::new()
//!     .with_property(keys::IDENTIFIER_REGEX, "^0*@SEARCH@$");
//! let criteria = PatientSearchCriteria::new(&config);
//!
//! let query = PatientSearchQuery::new().with_identifier("0042");
//! let predicate = criteria.prepare(&query).unwrap();
//!
//! assert_eq!(
//!     predicate.to_string(),
//!     "((identifier.voided = false and identifier.identifier regexp '^0*42$') and voided = false)"
//! );
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod predicate;
pub mod search;
pub mod types;

pub use error::{ConfigError, SearchError, SearchResult};
pub use predicate::{Field, MatchMode, Predicate, Value};
pub use search::PatientSearchCriteria;
pub use types::{IdentifierTypeRef, PatientSearchQuery, SearchMode};
