//! Top-level patient search predicate construction.

use tracing::debug;

use crate::config::{ConfigurationProvider, IdentifierSearchPolicy, MatchPolicy, StoreDialect};
use crate::error::SearchResult;
use crate::predicate::{Field, Predicate};
use crate::types::{IdentifierTypeRef, PatientSearchQuery, SearchMode};

use super::attribute::{AttributeCriteria, attribute_predicate};
use super::identifier::IdentifierCriteria;
use super::name::NameCriteria;

/// Builds patient search predicates from queries and live configuration.
///
/// Holds no state between calls besides its collaborators; the configuration
/// is read again on every build.
pub struct PatientSearchCriteria<'a> {
    config: &'a dyn ConfigurationProvider,
    dialect: StoreDialect,
    attributes: Option<&'a dyn AttributeCriteria>,
}

impl<'a> PatientSearchCriteria<'a> {
    /// Creates criteria for a store with the default dialect.
    pub fn new(config: &'a dyn ConfigurationProvider) -> Self {
        Self {
            config,
            dialect: StoreDialect::default(),
            attributes: None,
        }
    }

    /// Sets the store dialect.
    pub fn with_dialect(mut self, dialect: StoreDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enables person attribute matching for free-text queries.
    pub fn with_attributes(mut self, attributes: &'a dyn AttributeCriteria) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Returns the store dialect.
    pub fn dialect(&self) -> &StoreDialect {
        &self.dialect
    }

    /// Builds the predicate for a structured name/identifier search.
    ///
    /// The result always requires a non-voided patient.
    pub fn prepare(&self, query: &PatientSearchQuery) -> SearchResult<Predicate> {
        let mode = query.search_mode();
        debug!(mode = %mode, "Preparing patient search");

        let restriction = match mode {
            SearchMode::ByName => self.name_predicate(query.name.as_deref())?,
            SearchMode::ByIdentifier => self.identifier_predicate(
                query.identifier.as_deref(),
                &query.identifier_types,
                query.match_identifier_exactly,
            )?,
            SearchMode::ByNameOrIdentifier => {
                let (name, identifier) = query.mirrored_terms();
                Predicate::or([
                    self.name_predicate(name.as_deref())?,
                    self.identifier_predicate(
                        identifier.as_deref(),
                        &query.identifier_types,
                        query.match_identifier_exactly,
                    )?,
                ])
            }
            SearchMode::ByNameAndIdentifier => Predicate::and([
                self.name_predicate(query.name.as_deref())?,
                self.identifier_predicate(
                    query.identifier.as_deref(),
                    &query.identifier_types,
                    query.match_identifier_exactly,
                )?,
            ]),
        };

        let predicate = Predicate::and([restriction, Predicate::not_voided(Field::PatientVoided)]);
        debug!(predicate = %predicate, "Prepared patient search");
        Ok(predicate)
    }

    /// Builds the predicate for a single free-text query.
    ///
    /// The query is tried as a name, as a person attribute (when attribute
    /// matching is enabled) and as a non-exact identifier of any type.
    pub fn prepare_for_query(&self, query: &str) -> SearchResult<Predicate> {
        let mut alternatives = vec![self.name_predicate(Some(query))?];

        if let Some(attributes) = self.attributes {
            let mode = attributes.match_mode(self.config)?;
            let escaped = self.dialect.escape_wildcards(query);
            alternatives.push(attribute_predicate(attributes, &escaped, mode));
        }

        alternatives.push(self.identifier_predicate(Some(query), &[], false)?);

        let predicate = Predicate::and([
            Predicate::Or(alternatives),
            Predicate::not_voided(Field::PatientVoided),
        ]);
        debug!(query = %query, predicate = %predicate, "Prepared free-text patient search");
        Ok(predicate)
    }

    /// Builds the name restriction. An absent or blank name restricts nothing.
    pub fn name_predicate(&self, name: Option<&str>) -> SearchResult<Predicate> {
        let policy = MatchPolicy::load(self.config)?;
        let escaped = self.dialect.escape_wildcards(name.unwrap_or_default());
        Ok(NameCriteria::new(policy).build(&escaped))
    }

    /// Builds the identifier restriction.
    pub fn identifier_predicate(
        &self,
        identifier: Option<&str>,
        identifier_types: &[IdentifierTypeRef],
        match_exactly: bool,
    ) -> SearchResult<Predicate> {
        let policy = IdentifierSearchPolicy::load(self.config, match_exactly)?;
        Ok(IdentifierCriteria::new(policy, &self.dialect).build(identifier, identifier_types))
    }
}
